//! Crate-wide error type.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The literal statistics data is not a comma separated list of
    /// non-negative decimals.  Construction of the view is aborted.
    #[error("statistics data must look like \"a, b, c, d, e\" (non-negative decimals), got {text:?}")]
    InvalidStatisticsData { text: String },

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Saved state error: {0}")]
    State(#[from] serde_json::Error),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

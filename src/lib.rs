//! Star rating bar and rating statistics widgets.
//!
//! [`core`] holds the pure geometry and quantization, [`widget`] wraps it in
//! host-driven views, and [`ui`] renders those views into a terminal.

pub mod config;
pub mod core;
pub mod error;
pub mod ui;
pub mod widget;

pub use error::{Error, Result};

//! Minimal widget state that survives a widget being rebuilt.
//!
//! Records are JSON objects with a `version` field.  Readers ignore fields
//! they do not know and default the ones that are missing, so records
//! written by a newer version still restore.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::Result;

/// Current record version: the number of payload fields.
pub const RATING_BAR_STATE_VERSION: u32 = 1;
pub const STATISTICS_STATE_VERSION: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingBarState {
    pub version: u32,
    pub rating: f32,
}

impl Default for RatingBarState {
    fn default() -> Self {
        Self {
            version: RATING_BAR_STATE_VERSION,
            rating: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsState {
    pub version: u32,
    pub row_count: usize,
    pub data: Vec<f32>,
}

impl Default for StatisticsState {
    fn default() -> Self {
        Self {
            version: STATISTICS_STATE_VERSION,
            row_count: 0,
            data: Vec::new(),
        }
    }
}

pub fn serialize<T: Serialize>(state: &T) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

pub fn deserialize<T: DeserializeOwned>(text: &str) -> Result<T> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statistics_state_round_trips() {
        let state = StatisticsState {
            row_count: 3,
            data: vec![0.5, 0.25, 0.0],
            ..Default::default()
        };
        let text = serialize(&state).unwrap();
        assert_eq!(deserialize::<StatisticsState>(&text).unwrap(), state);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let state: RatingBarState =
            deserialize(r#"{"version":3,"rating":2.5,"max_rating":5}"#).unwrap();
        assert_eq!(state.rating, 2.5);
        assert_eq!(state.version, 3);
    }

    #[test]
    fn missing_fields_default() {
        let state: StatisticsState = deserialize(r#"{"row_count":4}"#).unwrap();
        assert_eq!(state.row_count, 4);
        assert!(state.data.is_empty());
        assert_eq!(state.version, STATISTICS_STATE_VERSION);
    }

    #[test]
    fn garbage_is_a_state_error() {
        let err = deserialize::<RatingBarState>("not json").unwrap_err();
        assert!(matches!(err, crate::error::Error::State(_)));
    }
}

//! Error types for the station geometry pipeline.

use stationmap_types::bbox::BoundingBox;
use thiserror::Error;

/// Offending values longer than this are cut in error messages.
const MAX_VALUE_LEN: usize = 120;

/// Result type alias for stationmap operations.
pub type Result<T> = std::result::Result<T, StationError>;

#[derive(Error, Debug)]
pub enum StationError {
    /// A geography value could not be turned into a point.
    #[error("Failed to parse location {value}: {reason}")]
    Parse { value: String, reason: String },

    /// A bounding box with inverted or non-finite corners.
    #[error("Invalid bounds [{min_lon}, {min_lat}, {max_lon}, {max_lat}]: {reason}")]
    InvalidBounds {
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
        reason: String,
    },

    /// A required field is missing or has the wrong shape.
    #[error("Invalid input shape: {0}")]
    InputShape(String),

    /// A longitude/latitude pair outside the WGS84 ranges.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// A station record failed validation.
    #[error("Invalid station '{station_id}': {reason}")]
    InvalidStation { station_id: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StationError {
    pub(crate) fn parse(value: impl AsRef<str>, reason: impl Into<String>) -> Self {
        Self::Parse {
            value: truncate(value.as_ref()),
            reason: reason.into(),
        }
    }

    pub(crate) fn bounds(bounds: &BoundingBox, reason: impl Into<String>) -> Self {
        Self::InvalidBounds {
            min_lon: bounds.min_lon,
            min_lat: bounds.min_lat,
            max_lon: bounds.max_lon,
            max_lat: bounds.max_lat,
            reason: reason.into(),
        }
    }
}

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_VALUE_LEN {
        return value.to_string();
    }
    let cut: String = value.chars().take(MAX_VALUE_LEN).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_carries_offending_value() {
        let err = StationError::parse("{not json", "expected value");
        let msg = err.to_string();
        assert!(msg.contains("{not json"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn long_values_are_truncated() {
        let long = "x".repeat(500);
        match StationError::parse(&long, "bad") {
            StationError::Parse { value, .. } => {
                assert_eq!(value.len(), MAX_VALUE_LEN + 3);
                assert!(value.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bounds_error_reports_corners() {
        let err = StationError::bounds(
            &BoundingBox::new(25.3, 60.0, 24.6, 60.4),
            "min_lon > max_lon",
        );
        assert!(err.to_string().contains("25.3"));
    }
}

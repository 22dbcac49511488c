//! Unified error handling for the road-explorer library.
//!
//! The exploration core is total over well-formed input. Everything that can
//! fail here is malformed input rejected at the engine boundary, or an
//! invalid configuration.

use std::fmt;

/// Unified error type for road-explorer operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Error), uniffi(flat_error))]
pub enum ExploreError {
    /// A road or route contains a non-finite or out-of-range coordinate
    InvalidCoordinates {
        entity_id: String,
        index: usize,
        latitude: f64,
        longitude: f64,
    },
    /// Route creation timestamp is negative
    InvalidTimestamp { route_id: String, timestamp: i64 },
    /// Activity tag outside the supported set
    UnknownActivityType { value: String },
    /// Two catalog roads share the same id
    DuplicateRoad { road_id: String },
    /// Configuration error
    ConfigError { message: String },
}

impl fmt::Display for ExploreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExploreError::InvalidCoordinates {
                entity_id,
                index,
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "'{}' has an invalid coordinate at index {}: ({}, {})",
                    entity_id, index, latitude, longitude
                )
            }
            ExploreError::InvalidTimestamp {
                route_id,
                timestamp,
            } => {
                write!(
                    f,
                    "Route '{}' has an invalid timestamp: {}",
                    route_id, timestamp
                )
            }
            ExploreError::UnknownActivityType { value } => {
                write!(f, "Unknown activity type: '{}'", value)
            }
            ExploreError::DuplicateRoad { road_id } => {
                write!(f, "Road '{}' appears more than once in the catalog", road_id)
            }
            ExploreError::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
        }
    }
}

impl std::error::Error for ExploreError {}

/// Result type alias for road-explorer operations.
pub type Result<T> = std::result::Result<T, ExploreError>;

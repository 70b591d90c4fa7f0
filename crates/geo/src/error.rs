//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Latitude or longitude outside its valid range, or not finite
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Bounding box with min >= max on some axis
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),
}

/// Error code for integration with footprint-core error handling.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Invalid coordinate values
    InvalidCoordinate = 10001,
    /// Invalid bounding box
    InvalidBounds = 10002,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::InvalidBounds(_) => GeoErrorCode::InvalidBounds,
        }
    }
}

//! Estimation failures

use footprint_core::error::exit_codes;
use footprint_core::validation::ValidationResult;
use footprint_core::ErrorCode;
use footprint_geocoding::GeocodeError;
use thiserror::Error;

/// Result type alias for estimation
pub type Result<T> = std::result::Result<T, EstimateError>;

/// Why a journey submission was discarded.
///
/// None of these are fatal; the journey log is left untouched.
#[derive(Error, Debug)]
pub enum EstimateError {
    /// Missing or invalid input
    #[error("{message}")]
    Validation {
        /// Fields that failed, in check order
        fields: Vec<String>,
        /// Human-readable description
        message: String,
        /// Shared error code
        code: ErrorCode,
    },

    /// One or both place names had no geocoding match
    #[error("Couldn't find one or both locations: {}", .places.join(", "))]
    LocationNotFound {
        /// The unresolved names, origin first
        places: Vec<String>,
    },

    /// The geocoding collaborator failed
    #[error("Error calculating distance: {0}")]
    Lookup(#[source] GeocodeError),
}

impl EstimateError {
    /// Validation failure for a text that names no transport mode
    pub fn unknown_vehicle(input: &str) -> Self {
        Self::Validation {
            fields: vec!["vehicle".to_string()],
            message: format!(
                "Unknown transport mode '{}'; expected one of Car, Bus, Train, Plane, Bicycle, Walk",
                input.trim()
            ),
            code: ErrorCode::UnknownVehicle,
        }
    }

    /// Convert a failed [`ValidationResult`]; `None` if it passed
    #[must_use]
    pub fn from_validation(result: &ValidationResult) -> Option<Self> {
        if result.is_valid() {
            return None;
        }

        let fields = result
            .failed_fields()
            .into_iter()
            .map(str::to_string)
            .collect();
        let message = result
            .errors()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        let code = if result.errors().iter().all(|e| e.code == "REQUIRED") {
            ErrorCode::MissingField
        } else {
            ErrorCode::ValidationError
        };

        Some(Self::Validation { fields, message, code })
    }

    /// Map onto the shared error code table
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation { code, .. } => *code,
            Self::LocationNotFound { .. } => ErrorCode::LocationNotFound,
            Self::Lookup(e) => e.code(),
        }
    }

    /// Returns true if resubmitting the same journey later could succeed
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Lookup(e) if e.is_transient())
    }

    /// Coded error with a recovery hint, for reports
    #[must_use]
    pub fn to_error(&self) -> footprint_core::Error {
        let err = footprint_core::Error::new(self.code(), self.to_string());
        match self {
            Self::Validation { code, .. } if *code == ErrorCode::UnknownVehicle => {
                err.with_suggestion("Use one of car, bus, train, plane, bicycle or walk")
            }
            Self::Validation { .. } => err.with_suggestion("Enter both an origin and a destination"),
            Self::LocationNotFound { .. } => {
                err.with_suggestion("Check the spelling or try a larger nearby place")
            }
            Self::Lookup(_) if self.is_transient() => {
                err.with_suggestion("The geocoding service is busy or unreachable; try again shortly")
            }
            Self::Lookup(_) => err,
        }
    }

    /// Process exit code for one-shot commands
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation { .. } => exit_codes::VALIDATION_ERROR,
            Self::LocationNotFound { .. } => exit_codes::LOCATION_NOT_FOUND,
            Self::Lookup(_) => exit_codes::LOOKUP_ERROR,
        }
    }
}

impl From<GeocodeError> for EstimateError {
    fn from(err: GeocodeError) -> Self {
        Self::Lookup(err)
    }
}

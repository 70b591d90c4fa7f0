//! Core utilities for Rojo Footprint
//!
//! This crate provides shared functionality used by the estimator, the
//! geocoding client and the CLI:
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with defaults and validation
//! - **Validation**: fluent field validation for user input and config values
//! - **Rate limiting**: token bucket throttle for external lookup services
//!
//! # Example
//!
//! ```rust,no_run
//! use footprint_core::config::Config;
//!
//! let config = Config::load(None).expect("invalid configuration");
//! println!("distance policy: {:?}", config.schema.estimator.policy);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema, DistancePolicyKind, GeocoderProvider};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::validation::{ValidationResult, Validator};
}

//! Configuration loading and schema definitions
//!
//! Settings shared by the estimator, the geocoding client and the dashboard.

mod loader;
mod schema;

pub use loader::{Config, CONFIG_FILE_NAME};
pub use schema::*;

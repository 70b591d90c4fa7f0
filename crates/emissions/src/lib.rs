//! Journey CO2 estimation for Rojo Footprint
//!
//! This crate holds the domain of the tool:
//!
//! - [`VehicleType`] and the fixed [`EmissionRateTable`]
//! - [`EmissionEstimator`], which turns origin, destination and mode into a
//!   [`JourneyEntry`] using a geocoded or synthetic distance
//! - [`JourneyLog`], the ordered journeys of one session and their total
//! - [`Dashboard`], the metric, progress, rows and map markers of a log
//!
//! # Example
//!
//! ```rust
//! use footprint_emissions::{Dashboard, EmissionEstimator, JourneyLog, VehicleType};
//!
//! let estimator = EmissionEstimator::synthetic().with_seed(42);
//! let mut log = JourneyLog::new();
//!
//! tokio_test::block_on(log.submit(&estimator, "Madrid", "Toledo", VehicleType::Bus))
//!     .expect("synthetic estimates cannot fail on valid input");
//!
//! let dashboard = Dashboard::default();
//! println!("{}", dashboard.metric(&log).label);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dashboard;
pub mod error;
pub mod estimator;
pub mod journey;
pub mod log;
pub mod vehicle;

#[cfg(test)]
mod test_support;

pub use dashboard::{format_tonnes, Dashboard, DashboardSnapshot, Marker, MarkerRole, Metric, TableRow};
pub use error::{EstimateError, Result};
pub use estimator::{DistancePolicy, EmissionEstimator};
pub use journey::{JourneyEntry, Route, DATE_FORMAT};
pub use log::JourneyLog;
pub use vehicle::{EmissionRateTable, MarkerColor, VehicleType, EMISSION_RATES};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::dashboard::{Dashboard, DashboardSnapshot};
    pub use crate::error::EstimateError;
    pub use crate::estimator::{DistancePolicy, EmissionEstimator};
    pub use crate::journey::JourneyEntry;
    pub use crate::log::JourneyLog;
    pub use crate::vehicle::{MarkerColor, VehicleType};
}

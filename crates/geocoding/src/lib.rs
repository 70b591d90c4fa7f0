//! Place name geocoding for Rojo Footprint
//!
//! This crate turns free-text place names into coordinates. Two backends
//! share the [`Geocoder`] trait:
//!
//! - **Nominatim**: the OpenStreetMap search service over HTTP, with a
//!   client-side throttle, a mandatory User-Agent and request correlation IDs
//! - **Static gazetteer**: a built-in table of places for offline use and tests
//!
//! A lookup that finds nothing returns `Ok(None)`; only service failures
//! are errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use footprint_geocoding::{Geocoder, NominatimClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NominatimClient::new()?;
//!
//!     if let Some(madrid) = client.geocode("Madrid").await? {
//!         println!("Madrid is at {madrid}");
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod gazetteer;
pub mod geocoder;

pub use client::{NominatimClient, Place};
pub use config::NominatimConfig;
pub use error::{GeocodeError, GeocodeResult};
pub use gazetteer::StaticGeocoder;
pub use geocoder::{AnyGeocoder, Geocoder};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::{NominatimClient, Place};
    pub use crate::config::NominatimConfig;
    pub use crate::error::{GeocodeError, GeocodeResult};
    pub use crate::gazetteer::StaticGeocoder;
    pub use crate::geocoder::{AnyGeocoder, Geocoder};
}

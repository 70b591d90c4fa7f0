//! CLI command implementations

pub mod distance;
pub mod estimate;
pub mod rates;
pub mod session;

use footprint_emissions::{DistancePolicy, EmissionEstimator};
use footprint_geocoding::Geocoder;

/// Spinner label for the lookups an estimate will perform, if any
pub(crate) fn lookup_message(estimator: &EmissionEstimator, origin: &str, destination: &str) -> Option<String> {
    match estimator.policy() {
        DistancePolicy::Synthetic => None,
        DistancePolicy::Geocoded(geocoder) => Some(format!(
            "Looking up {} and {} ({})...",
            origin.trim(),
            destination.trim(),
            geocoder.name()
        )),
    }
}

//! Journey-to-emissions computation
//!
//! [`EmissionEstimator`] turns an origin, a destination and a transport mode
//! into a [`JourneyEntry`]. The distance comes from one of two policies:
//!
//! - **Geocoded**: both places are resolved through a [`Geocoder`] and the
//!   great-circle distance is rounded to whole kilometres
//! - **Synthetic**: a whole number of kilometres drawn uniformly from the
//!   configured range, with placeholder map positions inside the map bounds

use crate::error::{EstimateError, Result};
use crate::journey::{JourneyEntry, Route};
use crate::vehicle::VehicleType;
use footprint_core::config::{ConfigSchema, DistancePolicyKind};
use footprint_core::validation::validate_places;
use footprint_geo::{rounded_distance_km, BoundingBox, Coordinate};
use footprint_geocoding::{AnyGeocoder, Geocoder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::RangeInclusive;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Default synthetic distance range in km
pub const DEFAULT_SYNTHETIC_RANGE: RangeInclusive<u32> = 10..=500;

/// How distances are obtained
#[derive(Debug, Clone)]
pub enum DistancePolicy<G> {
    /// Random distance, no lookups
    Synthetic,
    /// Resolve both places and measure the great-circle distance
    Geocoded(G),
}

impl<G> DistancePolicy<G> {
    /// Short name for logs and output
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Synthetic => "synthetic",
            Self::Geocoded(_) => "geocoded",
        }
    }
}

/// Estimates distance and CO2 for journey submissions
#[derive(Debug)]
pub struct EmissionEstimator<G = AnyGeocoder> {
    policy: DistancePolicy<G>,
    distance_range: RangeInclusive<u32>,
    bounds: BoundingBox,
    rng: Mutex<StdRng>,
}

impl EmissionEstimator<AnyGeocoder> {
    /// Estimator that never performs lookups
    #[must_use]
    pub fn synthetic() -> Self {
        Self::with_policy(DistancePolicy::Synthetic)
    }

    /// Build the estimator described by the configuration
    pub fn from_config(schema: &ConfigSchema) -> footprint_core::Result<Self> {
        let policy = match schema.estimator.policy {
            DistancePolicyKind::Synthetic => DistancePolicy::Synthetic,
            DistancePolicyKind::Geocoded => {
                let geocoder = AnyGeocoder::from_config(&schema.geocoder).map_err(|e| {
                    footprint_core::Error::config(format!("Cannot set up geocoder: {e}"))
                        .with_source(e)
                })?;
                DistancePolicy::Geocoded(geocoder)
            }
        };

        let map = &schema.map;
        let bounds = BoundingBox::new(map.min_lat, map.max_lat, map.min_lon, map.max_lon)
            .map_err(|e| footprint_core::Error::config_invalid(format!("map: {e}")))?;

        let mut estimator = Self::with_policy(policy)
            .with_bounds(bounds)
            .with_distance_range(schema.estimator.min_distance_km, schema.estimator.max_distance_km)
            .map_err(|e| footprint_core::Error::config_invalid(format!("estimator: {e}")))?;
        if let Some(seed) = schema.estimator.seed {
            estimator = estimator.with_seed(seed);
        }

        info!(
            policy = estimator.policy.name(),
            min_km = schema.estimator.min_distance_km,
            max_km = schema.estimator.max_distance_km,
            "Estimator configured"
        );

        Ok(estimator)
    }
}

impl<G: Geocoder> EmissionEstimator<G> {
    /// Estimator that resolves places with `geocoder`
    #[must_use]
    pub fn geocoded(geocoder: G) -> Self {
        Self::with_policy(DistancePolicy::Geocoded(geocoder))
    }

    /// Estimator with an explicit policy and default range and bounds
    #[must_use]
    pub fn with_policy(policy: DistancePolicy<G>) -> Self {
        Self {
            policy,
            distance_range: DEFAULT_SYNTHETIC_RANGE,
            bounds: BoundingBox::default(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reseed the synthetic RNG for reproducible output
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Set the synthetic distance range (inclusive)
    pub fn with_distance_range(mut self, min_km: u32, max_km: u32) -> Result<Self> {
        if min_km > max_km {
            return Err(EstimateError::Validation {
                fields: vec!["min_distance_km".to_string(), "max_distance_km".to_string()],
                message: format!("Distance range is empty: {min_km} > {max_km}"),
                code: footprint_core::ErrorCode::ValidationError,
            });
        }
        self.distance_range = min_km..=max_km;
        Ok(self)
    }

    /// Set the region placeholder positions are drawn from
    #[must_use]
    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Active distance policy
    #[must_use]
    pub fn policy(&self) -> &DistancePolicy<G> {
        &self.policy
    }

    /// Synthetic distance range
    #[must_use]
    pub fn distance_range(&self) -> &RangeInclusive<u32> {
        &self.distance_range
    }

    /// Estimate a journey.
    ///
    /// Fails with [`EstimateError::Validation`] for blank place names,
    /// [`EstimateError::LocationNotFound`] when a place has no match and
    /// [`EstimateError::Lookup`] when the geocoder itself fails. The
    /// synthetic policy cannot fail on valid input.
    pub async fn estimate(
        &self,
        origin: &str,
        destination: &str,
        vehicle: VehicleType,
    ) -> Result<JourneyEntry> {
        let (distance_km, route) = self.resolve_distance(origin, destination).await?;
        let entry = JourneyEntry::new(origin, destination, vehicle, distance_km, Some(route));

        info!(
            origin = entry.origin(),
            destination = entry.destination(),
            vehicle = %vehicle,
            distance_km,
            co2_kg = entry.co2_kg(),
            "Journey estimated"
        );

        Ok(entry)
    }

    /// Validate the place names and obtain the distance in whole km together
    /// with the map positions used.
    pub async fn resolve_distance(&self, origin: &str, destination: &str) -> Result<(u32, Route)> {
        if let Some(err) = EstimateError::from_validation(&validate_places(origin, destination)) {
            debug!(%err, "Rejected journey input");
            return Err(err);
        }

        match &self.policy {
            DistancePolicy::Synthetic => Ok(self.synthetic_distance()),
            DistancePolicy::Geocoded(geocoder) => {
                geocoded_distance(geocoder, origin.trim(), destination.trim()).await
            }
        }
    }

    fn synthetic_distance(&self) -> (u32, Route) {
        // A poisoned lock still holds a usable RNG
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let distance = rng.gen_range(self.distance_range.clone());
        let origin = self.bounds.interpolate(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));
        let destination = self.bounds.interpolate(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0));

        debug!(distance_km = distance, "Synthetic distance");
        (distance, Route::placeholder(origin, destination))
    }
}

async fn geocoded_distance<G: Geocoder>(
    geocoder: &G,
    origin: &str,
    destination: &str,
) -> Result<(u32, Route)> {
    let from = lookup(geocoder, origin).await?;
    let to = lookup(geocoder, destination).await?;

    match (from, to) {
        (Some(from), Some(to)) => {
            let distance = rounded_distance_km(&from, &to);
            debug!(%from, %to, distance_km = distance, "Geocoded distance");
            Ok((distance, Route::resolved(from, to)))
        }
        (from, to) => {
            let places: Vec<String> = [(origin, from), (destination, to)]
                .into_iter()
                .filter(|(_, found)| found.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            info!(?places, "Location not found");
            Err(EstimateError::LocationNotFound { places })
        }
    }
}

async fn lookup<G: Geocoder>(geocoder: &G, place: &str) -> Result<Option<Coordinate>> {
    geocoder.geocode(place).await.map_err(|e| {
        warn!(backend = geocoder.name(), place, error = %e, "Geocoding failed");
        EstimateError::Lookup(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use footprint_core::ErrorCode;
    use footprint_geocoding::{GeocodeError, GeocodeResult, StaticGeocoder};
    use proptest::prelude::*;
    use std::time::Duration;
    use crate::test_support::{hit, nominatim_stub};
    use tokio_test::block_on;

    /// Records every lookup and answers from a gazetteer
    struct RecordingGeocoder {
        inner: StaticGeocoder,
        calls: Mutex<Vec<String>>,
    }

    impl RecordingGeocoder {
        fn new() -> Self {
            Self {
                inner: StaticGeocoder::with_defaults(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Geocoder for RecordingGeocoder {
        async fn geocode(&self, place: &str) -> GeocodeResult<Option<Coordinate>> {
            self.calls.lock().unwrap().push(place.to_string());
            Ok(self.inner.lookup(place))
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    /// Always times out
    struct DownGeocoder;

    impl Geocoder for DownGeocoder {
        async fn geocode(&self, _place: &str) -> GeocodeResult<Option<Coordinate>> {
            Err(GeocodeError::Timeout(Duration::from_secs(10)))
        }

        fn name(&self) -> &'static str {
            "down"
        }
    }

    #[test]
    fn test_geocoded_madrid_barcelona() {
        let estimator = EmissionEstimator::geocoded(StaticGeocoder::with_defaults());
        let entry = block_on(estimator.estimate("Madrid", "Barcelona", VehicleType::Train)).unwrap();

        assert!((480..=510).contains(&entry.distance_km()));
        assert_eq!(entry.distance_km(), 505);
        assert_eq!(entry.co2_kg(), 505.0 * 40.0 / 1000.0);

        let route = entry.route().unwrap();
        assert!(!route.placeholder);
        assert_eq!(route.origin, Coordinate::new(40.4168, -3.7038));
    }

    #[tokio::test]
    async fn test_geocoded_over_nominatim_client() {
        let (client, server) = nominatim_stub(vec![hit(40.4168, -3.7038), hit(41.3874, 2.1686)]);
        let estimator = EmissionEstimator::geocoded(client);

        let entry = estimator
            .estimate("Madrid", "Barcelona", VehicleType::Car)
            .await
            .unwrap();
        assert_eq!(entry.distance_km(), 505);
        assert_eq!(entry.co2_kg(), 60.6);

        let requests = server.join().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(requests[0].contains("q=Madrid"));
        assert!(requests[1].contains("q=Barcelona"));
    }

    #[test]
    fn test_lookups_origin_first_once_each() {
        let geocoder = RecordingGeocoder::new();
        let estimator = EmissionEstimator::geocoded(&geocoder);
        block_on(estimator.estimate(" Bilbao ", "Valencia", VehicleType::Car)).unwrap();
        assert_eq!(geocoder.calls(), ["Bilbao", "Valencia"]);
    }

    #[test]
    fn test_location_not_found_names_places() {
        let estimator = EmissionEstimator::geocoded(StaticGeocoder::with_defaults());

        let err = block_on(estimator.estimate("Atlantis", "Madrid", VehicleType::Car)).unwrap_err();
        match err {
            EstimateError::LocationNotFound { ref places } => assert_eq!(places, &["Atlantis"]),
            other => panic!("unexpected error: {other}"),
        }

        let err = block_on(estimator.estimate("Atlantis", "Lemuria", VehicleType::Car)).unwrap_err();
        match err {
            EstimateError::LocationNotFound { ref places } => {
                assert_eq!(places, &["Atlantis", "Lemuria"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookup_failure() {
        let estimator = EmissionEstimator::geocoded(DownGeocoder);
        let err = block_on(estimator.estimate("Madrid", "Barcelona", VehicleType::Bus)).unwrap_err();
        assert!(matches!(err, EstimateError::Lookup(GeocodeError::Timeout(_))));
        assert_eq!(err.code(), ErrorCode::LookupTimeout);
    }

    #[test]
    fn test_validation_happens_before_lookup() {
        let geocoder = RecordingGeocoder::new();
        let estimator = EmissionEstimator::geocoded(&geocoder);

        let err = block_on(estimator.estimate("", "Madrid", VehicleType::Car)).unwrap_err();
        assert!(matches!(err, EstimateError::Validation { .. }));
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert!(geocoder.calls().is_empty());
    }

    #[test]
    fn test_synthetic_is_reproducible_with_seed() {
        let a = EmissionEstimator::synthetic().with_seed(7);
        let b = EmissionEstimator::synthetic().with_seed(7);

        for _ in 0..5 {
            let x = block_on(a.resolve_distance("A", "B")).unwrap();
            let y = block_on(b.resolve_distance("A", "B")).unwrap();
            assert_eq!(x, y);
        }
    }

    #[test]
    fn test_synthetic_placeholder_route_in_bounds() {
        let estimator = EmissionEstimator::synthetic().with_seed(1);
        let entry = block_on(estimator.estimate("Here", "There", VehicleType::Plane)).unwrap();
        let route = entry.route().unwrap();

        assert!(route.placeholder);
        assert!(BoundingBox::SPAIN.contains(&route.origin));
        assert!(BoundingBox::SPAIN.contains(&route.destination));
    }

    #[test]
    fn test_custom_distance_range() {
        let estimator = EmissionEstimator::synthetic()
            .with_seed(3)
            .with_distance_range(42, 42)
            .unwrap();
        let entry = block_on(estimator.estimate("A", "B", VehicleType::Car)).unwrap();
        assert_eq!(entry.distance_km(), 42);

        assert!(EmissionEstimator::synthetic().with_distance_range(9, 8).is_err());
    }

    #[test]
    fn test_from_config() {
        let mut schema = ConfigSchema::default();
        schema.estimator.policy = DistancePolicyKind::Synthetic;
        schema.estimator.seed = Some(11);
        let estimator = EmissionEstimator::from_config(&schema).unwrap();
        assert_eq!(estimator.policy().name(), "synthetic");
        assert_eq!(estimator.distance_range(), &(10..=500));

        schema.estimator.policy = DistancePolicyKind::Geocoded;
        schema.geocoder.provider = footprint_core::config::GeocoderProvider::Static;
        let estimator = EmissionEstimator::from_config(&schema).unwrap();
        assert_eq!(estimator.policy().name(), "geocoded");
        let entry = block_on(estimator.estimate("Paris", "Berlin", VehicleType::Plane)).unwrap();
        assert!((870..=890).contains(&entry.distance_km()));
    }

    proptest! {
        #[test]
        fn synthetic_distance_in_range(seed in any::<u64>(), vehicle_idx in 0usize..6) {
            let vehicle = VehicleType::ALL[vehicle_idx];
            let estimator = EmissionEstimator::synthetic().with_seed(seed);
            let entry = block_on(estimator.estimate("Origin", "Destination", vehicle)).unwrap();

            prop_assert!((10..=500).contains(&entry.distance_km()));
            prop_assert_eq!(
                entry.co2_kg(),
                f64::from(entry.distance_km()) * f64::from(vehicle.emission_rate()) / 1000.0
            );
        }
    }
}

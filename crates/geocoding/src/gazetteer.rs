//! In-memory gazetteer for offline use
//!
//! Names are matched case-insensitively after trimming. A query such as
//! `"Madrid, Spain"` falls back to its first comma-separated segment.

use crate::error::GeocodeResult;
use crate::geocoder::Geocoder;
use footprint_core::config::GeocoderConfig;
use footprint_geo::Coordinate;
use std::collections::HashMap;
use tracing::debug;

/// Built-in places: Spanish cities the demo centres on, plus a few European capitals
const DEFAULT_PLACES: &[(&str, f64, f64)] = &[
    ("Madrid", 40.4168, -3.7038),
    ("Barcelona", 41.3874, 2.1686),
    ("Valencia", 39.4699, -0.3763),
    ("Seville", 37.3891, -5.9845),
    ("Sevilla", 37.3891, -5.9845),
    ("Bilbao", 43.2630, -2.9350),
    ("Zaragoza", 41.6488, -0.8891),
    ("Malaga", 36.7213, -4.4214),
    ("Málaga", 36.7213, -4.4214),
    ("Paris", 48.8566, 2.3522),
    ("Berlin", 52.5200, 13.4050),
    ("London", 51.5074, -0.1278),
    ("Lisbon", 38.7223, -9.1393),
    ("Lisboa", 38.7223, -9.1393),
];

/// Static place-name lookup
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: HashMap<String, Coordinate>,
}

impl StaticGeocoder {
    /// An empty gazetteer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gazetteer seeded with the built-in places
    #[must_use]
    pub fn with_defaults() -> Self {
        DEFAULT_PLACES
            .iter()
            .fold(Self::new(), |g, &(name, lat, lon)| {
                g.with_place(name, Coordinate::new(lat, lon))
            })
    }

    /// Built-in places extended by the `[geocoder.places]` table
    pub fn from_config(config: &GeocoderConfig) -> GeocodeResult<Self> {
        let mut gazetteer = Self::with_defaults();
        for (name, &[lat, lon]) in &config.places {
            let coord = Coordinate::try_new(lat, lon).map_err(|e| {
                crate::GeocodeError::config(format!("geocoder.places.{name}: {e}"))
            })?;
            gazetteer.insert(name, coord);
        }
        Ok(gazetteer)
    }

    /// Builder-style insert
    #[must_use]
    pub fn with_place(mut self, name: &str, coord: Coordinate) -> Self {
        self.insert(name, coord);
        self
    }

    /// Add or replace a place
    pub fn insert(&mut self, name: &str, coord: Coordinate) {
        self.places.insert(normalize(name), coord);
    }

    /// Number of distinct names
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Returns true if no places are known
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Synchronous lookup
    #[must_use]
    pub fn lookup(&self, place: &str) -> Option<Coordinate> {
        let key = normalize(place);
        self.places.get(&key).copied().or_else(|| {
            let head = key.split(',').next()?.trim();
            self.places.get(head).copied()
        })
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Geocoder for StaticGeocoder {
    async fn geocode(&self, place: &str) -> GeocodeResult<Option<Coordinate>> {
        let found = self.lookup(place);
        debug!(place, found = found.is_some(), "Gazetteer lookup");
        Ok(found)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

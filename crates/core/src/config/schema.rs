//! Configuration schema definitions

use crate::error::{Error, Result};
use crate::validation::Validator;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigSchema {
    /// Distance resolution settings
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Geocoding collaborator settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Metric, progress and map view settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Bounds used to place markers for journeys without real coordinates
    #[serde(default)]
    pub map: MapBoundsConfig,
}

impl ConfigSchema {
    /// Validate every section, collecting all problems into one error
    pub fn validate(&self) -> Result<()> {
        let e = &self.estimator;
        let g = &self.geocoder;
        let d = &self.dashboard;
        let m = &self.map;

        Validator::new()
            .custom("estimator.min_distance_km", || {
                (e.min_distance_km > e.max_distance_km).then(|| {
                    format!(
                        "Must not exceed max_distance_km ({} > {})",
                        e.min_distance_km, e.max_distance_km
                    )
                })
            })
            .required("geocoder.base_url", &g.base_url)
            .custom("geocoder.base_url", || {
                (!g.base_url.starts_with("http://") && !g.base_url.starts_with("https://"))
                    .then(|| "Must start with http:// or https://".to_string())
            })
            .required("geocoder.user_agent", &g.user_agent)
            .range("geocoder.timeout_secs", g.timeout_secs, 1, 300)
            .range("geocoder.requests_per_second", g.requests_per_second, 1, 100)
            .custom("dashboard.progress_ceiling_tonnes", || {
                (d.progress_ceiling_tonnes.is_nan() || d.progress_ceiling_tonnes <= 0.0)
                    .then(|| "Must be a positive number of tonnes".to_string())
            })
            .range("dashboard.center.latitude", d.center[0], -90.0, 90.0)
            .range("dashboard.center.longitude", d.center[1], -180.0, 180.0)
            .custom("map", || {
                (m.min_lat >= m.max_lat || m.min_lon >= m.max_lon)
                    .then(|| "Bounds must satisfy min < max on both axes".to_string())
            })
            .range("map.min_lat", m.min_lat, -90.0, 90.0)
            .range("map.max_lat", m.max_lat, -90.0, 90.0)
            .range("map.min_lon", m.min_lon, -180.0, 180.0)
            .range("map.max_lon", m.max_lon, -180.0, 180.0)
            .validate()
            .to_result()
            .map_err(|err| Error::config_invalid(err.message))
    }
}

/// How journey distances are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistancePolicyKind {
    /// Geocode both places and measure the great-circle distance
    #[default]
    Geocoded,
    /// Sample a random distance, no lookups
    Synthetic,
}

impl std::str::FromStr for DistancePolicyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "geocoded" | "geocode" | "real" => Ok(Self::Geocoded),
            "synthetic" | "random" | "demo" => Ok(Self::Synthetic),
            other => Err(Error::config_invalid(format!(
                "Unknown distance policy '{other}' (expected geocoded or synthetic)"
            ))),
        }
    }
}

/// Estimator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatorConfig {
    /// Distance resolution policy
    #[serde(default)]
    pub policy: DistancePolicyKind,

    /// Lower bound of synthetic distances (inclusive)
    #[serde(default = "default_min_distance_km")]
    pub min_distance_km: u32,

    /// Upper bound of synthetic distances (inclusive)
    #[serde(default = "default_max_distance_km")]
    pub max_distance_km: u32,

    /// Fixed RNG seed for reproducible synthetic sessions
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            policy: DistancePolicyKind::default(),
            min_distance_km: default_min_distance_km(),
            max_distance_km: default_max_distance_km(),
            seed: None,
        }
    }
}

fn default_min_distance_km() -> u32 {
    10
}

fn default_max_distance_km() -> u32 {
    500
}

/// Which geocoding backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeocoderProvider {
    /// OpenStreetMap Nominatim over HTTP
    #[default]
    Nominatim,
    /// Built-in gazetteer, no network
    Static,
}

/// Geocoding collaborator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeocoderConfig {
    /// Backend selection
    #[serde(default)]
    pub provider: GeocoderProvider,

    /// Nominatim base URL (without the `/search` path)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent sent with every lookup, required by the Nominatim usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Client-side request ceiling
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Extra gazetteer entries: name -> [latitude, longitude]
    #[serde(default)]
    pub places: BTreeMap<String, [f64; 2]>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            provider: GeocoderProvider::default(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            places: BTreeMap::new(),
        }
    }
}

/// Public Nominatim instance
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

fn default_base_url() -> String {
    DEFAULT_NOMINATIM_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("rojo-footprint/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_requests_per_second() -> u32 {
    1
}

/// Dashboard configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Cumulative tonnes at which the progress indicator is full
    #[serde(default = "default_progress_ceiling")]
    pub progress_ceiling_tonnes: f64,

    /// Initial map centre as [latitude, longitude]
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Initial map zoom level
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            progress_ceiling_tonnes: default_progress_ceiling(),
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

fn default_progress_ceiling() -> f64 {
    10.0
}

// Madrid
fn default_center() -> [f64; 2] {
    [40.416_775, -3.703_790]
}

fn default_zoom() -> u8 {
    6
}

/// Placeholder marker bounds, mainland Spain by default
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[allow(missing_docs)]
pub struct MapBoundsConfig {
    #[serde(default = "default_min_lat")]
    pub min_lat: f64,
    #[serde(default = "default_max_lat")]
    pub max_lat: f64,
    #[serde(default = "default_min_lon")]
    pub min_lon: f64,
    #[serde(default = "default_max_lon")]
    pub max_lon: f64,
}

impl Default for MapBoundsConfig {
    fn default() -> Self {
        Self {
            min_lat: default_min_lat(),
            max_lat: default_max_lat(),
            min_lon: default_min_lon(),
            max_lon: default_max_lon(),
        }
    }
}

fn default_min_lat() -> f64 {
    36.0
}

fn default_max_lat() -> f64 {
    43.8
}

fn default_min_lon() -> f64 {
    -9.4
}

fn default_max_lon() -> f64 {
    3.4
}

//! Configuration for the Nominatim client
//!
//! Built from the `[geocoder]` section of the shared configuration, with
//! builder methods for tests and embedding.

use crate::error::{GeocodeError, GeocodeResult};
use footprint_core::config::{GeocoderConfig, DEFAULT_NOMINATIM_URL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Nominatim client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL of the Nominatim instance, without `/search`
    pub base_url: String,
    /// User-Agent header identifying this application
    pub user_agent: String,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Client-side request ceiling
    pub requests_per_second: u32,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self::from(&GeocoderConfig::default())
    }
}

impl From<&GeocoderConfig> for NominatimConfig {
    fn from(cfg: &GeocoderConfig) -> Self {
        Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            user_agent: cfg.user_agent.clone(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            requests_per_second: cfg.requests_per_second,
        }
    }
}

impl NominatimConfig {
    /// Configuration for a local Nominatim instance (no usage policy limits)
    #[must_use]
    pub fn local(port: u16) -> Self {
        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            timeout: Duration::from_secs(5),
            requests_per_second: 100,
            ..Self::default()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder-style method to set the User-Agent
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set the request ceiling
    #[must_use]
    pub fn with_requests_per_second(mut self, rps: u32) -> Self {
        self.requests_per_second = rps;
        self
    }

    /// Full URL of the search endpoint
    #[must_use]
    pub fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    /// Returns true when pointed at the public OpenStreetMap instance
    #[must_use]
    pub fn is_public_instance(&self) -> bool {
        self.base_url == DEFAULT_NOMINATIM_URL
    }

    /// Validate the configuration
    pub fn validate(&self) -> GeocodeResult<()> {
        if self.base_url.is_empty() {
            return Err(GeocodeError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(GeocodeError::config("base_url must start with http:// or https://"));
        }

        if self.user_agent.trim().is_empty() {
            return Err(GeocodeError::config("user_agent cannot be empty"));
        }

        if self.timeout.is_zero() {
            return Err(GeocodeError::config("timeout cannot be zero"));
        }

        if self.requests_per_second == 0 {
            return Err(GeocodeError::config("requests_per_second cannot be zero"));
        }

        if self.is_public_instance() && self.requests_per_second > 1 {
            return Err(GeocodeError::config(
                "the public Nominatim instance allows at most 1 request per second",
            ));
        }

        Ok(())
    }
}

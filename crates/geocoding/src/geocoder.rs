//! The geocoding seam used by the estimator

use crate::client::NominatimClient;
use crate::config::NominatimConfig;
use crate::error::GeocodeResult;
use crate::gazetteer::StaticGeocoder;
use footprint_core::config::{GeocoderConfig, GeocoderProvider};
use footprint_geo::Coordinate;
use std::future::Future;

/// Resolves a free-text place name to a coordinate.
///
/// `Ok(None)` means the service had no match for the name. `Err` is reserved
/// for the service itself failing.
pub trait Geocoder {
    /// Look up a single place name
    fn geocode(&self, place: &str) -> impl Future<Output = GeocodeResult<Option<Coordinate>>> + Send;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Geocoder chosen at runtime from configuration
#[derive(Debug, Clone)]
pub enum AnyGeocoder {
    /// OpenStreetMap Nominatim over HTTP
    Nominatim(NominatimClient),
    /// Built-in gazetteer
    Static(StaticGeocoder),
}

impl AnyGeocoder {
    /// Build the backend selected by the `[geocoder]` section.
    ///
    /// Extra `places` always extend the static gazetteer; with the Nominatim
    /// backend they are ignored.
    pub fn from_config(config: &GeocoderConfig) -> GeocodeResult<Self> {
        match config.provider {
            GeocoderProvider::Nominatim => Ok(Self::Nominatim(NominatimClient::with_config(
                NominatimConfig::from(config),
            )?)),
            GeocoderProvider::Static => Ok(Self::Static(StaticGeocoder::from_config(config)?)),
        }
    }
}

impl Geocoder for AnyGeocoder {
    async fn geocode(&self, place: &str) -> GeocodeResult<Option<Coordinate>> {
        match self {
            Self::Nominatim(client) => client.geocode(place).await,
            Self::Static(gazetteer) => gazetteer.geocode(place).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Nominatim(client) => client.name(),
            Self::Static(gazetteer) => gazetteer.name(),
        }
    }
}

impl<G: Geocoder + Sync> Geocoder for &G {
    fn geocode(&self, place: &str) -> impl Future<Output = GeocodeResult<Option<Coordinate>>> + Send {
        (**self).geocode(place)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_from_config() {
        let config = GeocoderConfig {
            provider: GeocoderProvider::Static,
            ..GeocoderConfig::default()
        };
        let geocoder = AnyGeocoder::from_config(&config).unwrap();
        assert_eq!(geocoder.name(), "static");

        let madrid = tokio_test::block_on(geocoder.geocode("Madrid")).unwrap();
        assert!(madrid.is_some());
    }

    #[test]
    fn test_nominatim_from_config() {
        let geocoder = AnyGeocoder::from_config(&GeocoderConfig::default()).unwrap();
        assert_eq!(geocoder.name(), "nominatim");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeocoderConfig {
            timeout_secs: 0,
            ..GeocoderConfig::default()
        };
        assert!(AnyGeocoder::from_config(&config).is_err());
    }

    #[test]
    fn test_reference_forwarding() {
        let gazetteer = StaticGeocoder::with_defaults();
        let by_ref = &gazetteer;
        let hit = tokio_test::block_on(by_ref.geocode("barcelona")).unwrap();
        assert!(hit.is_some());
    }
}

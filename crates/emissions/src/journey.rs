//! Journey records

use crate::vehicle::{VehicleType, EMISSION_RATES};
use chrono::{DateTime, Local};
use footprint_geo::Coordinate;
use serde::Serialize;

/// Display format of entry timestamps
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// End points of a journey on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Route {
    /// Origin position
    pub origin: Coordinate,
    /// Destination position
    pub destination: Coordinate,
    /// True when the positions were sampled rather than geocoded
    pub placeholder: bool,
}

impl Route {
    /// A route between two geocoded positions
    #[must_use]
    pub const fn resolved(origin: Coordinate, destination: Coordinate) -> Self {
        Self { origin, destination, placeholder: false }
    }

    /// A route between two sampled positions
    #[must_use]
    pub const fn placeholder(origin: Coordinate, destination: Coordinate) -> Self {
        Self { origin, destination, placeholder: true }
    }
}

/// One submitted journey. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JourneyEntry {
    origin: String,
    destination: String,
    vehicle: VehicleType,
    distance_km: u32,
    co2_kg: f64,
    timestamp: DateTime<Local>,
    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<Route>,
}

impl JourneyEntry {
    /// Create an entry stamped with the current time.
    ///
    /// Place names are trimmed. CO2 is derived from the distance and the
    /// mode's emission rate.
    #[must_use]
    pub fn new(
        origin: &str,
        destination: &str,
        vehicle: VehicleType,
        distance_km: u32,
        route: Option<Route>,
    ) -> Self {
        Self {
            origin: origin.trim().to_string(),
            destination: destination.trim().to_string(),
            vehicle,
            distance_km,
            co2_kg: EMISSION_RATES.co2_kg(vehicle, distance_km),
            timestamp: Local::now(),
            route,
        }
    }

    /// Replace the creation time
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Origin place name
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Destination place name
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Transport mode
    #[must_use]
    pub fn vehicle(&self) -> VehicleType {
        self.vehicle
    }

    /// Whole kilometres
    #[must_use]
    pub fn distance_km(&self) -> u32 {
        self.distance_km
    }

    /// Estimated CO2 in kilograms
    #[must_use]
    pub fn co2_kg(&self) -> f64 {
        self.co2_kg
    }

    /// Creation time
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Timestamp as `YYYY-MM-DD HH:MM`
    #[must_use]
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }

    /// Map positions, if known
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }
}

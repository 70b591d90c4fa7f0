//! Presentation model of a journey log
//!
//! Everything here is a pure function of a [`JourneyLog`]: the cumulative
//! metric, the bounded progress value, table rows and colour-coded map
//! markers, with a GeoJSON export of the markers.

use crate::journey::JourneyEntry;
use crate::log::JourneyLog;
use crate::vehicle::{MarkerColor, VehicleType};
use footprint_core::config::DashboardConfig;
use footprint_geo::Coordinate;
use serde::Serialize;
use serde_json::{json, Value};

/// Format a tonnage as shown by the metric
#[must_use]
pub fn format_tonnes(tonnes: f64) -> String {
    format!("{tonnes:.2} tons")
}

/// Cumulative CO2 metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// Total in tonnes
    pub tonnes: f64,
    /// Display text, e.g. `"0.02 tons"`
    pub label: String,
}

/// One row of the journey table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct TableRow {
    pub origin: String,
    pub destination: String,
    pub vehicle: VehicleType,
    pub distance_km: u32,
    pub co2_kg: f64,
    /// `YYYY-MM-DD HH:MM`
    pub date: String,
}

impl From<&JourneyEntry> for TableRow {
    fn from(entry: &JourneyEntry) -> Self {
        Self {
            origin: entry.origin().to_string(),
            destination: entry.destination().to_string(),
            vehicle: entry.vehicle(),
            distance_km: entry.distance_km(),
            co2_kg: entry.co2_kg(),
            date: entry.formatted_timestamp(),
        }
    }
}

/// Which end of a journey a marker sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum MarkerRole {
    Origin,
    Destination,
}

/// A coloured map marker
#[derive(Debug, Clone, PartialEq, Serialize)]
#[allow(missing_docs)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub color: MarkerColor,
    pub role: MarkerRole,
    pub vehicle: VehicleType,
    pub popup: String,
}

/// Everything a front end needs to draw the dashboard once
#[derive(Debug, Clone, Serialize)]
#[allow(missing_docs)]
pub struct DashboardSnapshot {
    pub metric: Metric,
    pub progress: f64,
    pub rows: Vec<TableRow>,
    pub markers: Vec<Marker>,
}

/// Dashboard settings
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    progress_ceiling_tonnes: f64,
    center: Coordinate,
    zoom: u8,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}

impl Dashboard {
    /// Build from the `[dashboard]` section
    #[must_use]
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            progress_ceiling_tonnes: config.progress_ceiling_tonnes,
            center: Coordinate::from(config.center),
            zoom: config.zoom,
        }
    }

    /// Tonnes at which progress is full
    #[must_use]
    pub fn progress_ceiling_tonnes(&self) -> f64 {
        self.progress_ceiling_tonnes
    }

    /// Cumulative total in tonnes with its label
    #[must_use]
    pub fn metric(&self, log: &JourneyLog) -> Metric {
        let tonnes = log.total_co2_tonnes();
        Metric { tonnes, label: format_tonnes(tonnes) }
    }

    /// Progress towards the ceiling, in `[0, 1]`
    #[must_use]
    pub fn progress(&self, log: &JourneyLog) -> f64 {
        if self.progress_ceiling_tonnes <= 0.0 {
            return 1.0;
        }
        (log.total_co2_tonnes() / self.progress_ceiling_tonnes).clamp(0.0, 1.0)
    }

    /// Table rows in insertion order
    #[must_use]
    pub fn rows(&self, log: &JourneyLog) -> Vec<TableRow> {
        log.entries().iter().map(TableRow::from).collect()
    }

    /// Origin and destination markers for every entry with a route
    #[must_use]
    pub fn markers(&self, log: &JourneyLog) -> Vec<Marker> {
        log.entries()
            .iter()
            .filter_map(|entry| entry.route().map(|route| (entry, route)))
            .flat_map(|(entry, route)| {
                let popup = format!(
                    "{} → {} ({}, {:.2} kg CO2)",
                    entry.origin(),
                    entry.destination(),
                    entry.vehicle(),
                    entry.co2_kg()
                );
                let vehicle = entry.vehicle();
                let color = vehicle.marker_color();
                [
                    (route.origin, MarkerRole::Origin),
                    (route.destination, MarkerRole::Destination),
                ]
                .map(|(coordinate, role)| Marker {
                    coordinate,
                    color,
                    role,
                    vehicle,
                    popup: popup.clone(),
                })
            })
            .collect()
    }

    /// All presentation values at once
    #[must_use]
    pub fn snapshot(&self, log: &JourneyLog) -> DashboardSnapshot {
        DashboardSnapshot {
            metric: self.metric(log),
            progress: self.progress(log),
            rows: self.rows(log),
            markers: self.markers(log),
        }
    }

    /// Markers as a GeoJSON `FeatureCollection`; the map view goes in the
    /// collection's `properties`.
    #[must_use]
    pub fn geojson(&self, log: &JourneyLog) -> Value {
        let features: Vec<Value> = self
            .markers(log)
            .into_iter()
            .map(|m| {
                json!({
                    "type": "Feature",
                    "geometry": {
                        "type": "Point",
                        "coordinates": m.coordinate.to_lon_lat(),
                    },
                    "properties": {
                        "color": m.color,
                        "vehicle": m.vehicle,
                        "role": m.role,
                        "popup": m.popup,
                    },
                })
            })
            .collect();

        json!({
            "type": "FeatureCollection",
            "properties": {
                "center": [self.center.latitude, self.center.longitude],
                "zoom": self.zoom,
            },
            "features": features,
        })
    }
}

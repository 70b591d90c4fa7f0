//! Session journey log

use crate::error::Result;
use crate::estimator::EmissionEstimator;
use crate::journey::JourneyEntry;
use crate::vehicle::VehicleType;
use footprint_geocoding::Geocoder;
use serde::Serialize;
use tracing::info;

/// Ordered journeys of one session with their running CO2 total.
///
/// The total always equals the sum of the entries' CO2; both are only ever
/// reset together by [`JourneyLog::clear`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct JourneyLog {
    entries: Vec<JourneyEntry>,
    total_co2_kg: f64,
}

impl JourneyLog {
    /// An empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and add its CO2 to the total
    pub fn record(&mut self, entry: JourneyEntry) -> &JourneyEntry {
        self.total_co2_kg += entry.co2_kg();
        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// Estimate a journey and record it.
    ///
    /// On failure nothing is recorded and the error is returned.
    pub async fn submit<G: Geocoder>(
        &mut self,
        estimator: &EmissionEstimator<G>,
        origin: &str,
        destination: &str,
        vehicle: VehicleType,
    ) -> Result<&JourneyEntry> {
        let entry = estimator.estimate(origin, destination, vehicle).await?;
        info!(
            origin = entry.origin(),
            destination = entry.destination(),
            "Added journey"
        );
        Ok(self.record(entry))
    }

    /// Drop every entry and reset the total
    pub fn clear(&mut self) {
        info!(entries = self.entries.len(), "Journey log cleared");
        self.entries.clear();
        self.total_co2_kg = 0.0;
    }

    /// Entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[JourneyEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no journey has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running total in kilograms
    #[must_use]
    pub fn total_co2_kg(&self) -> f64 {
        self.total_co2_kg
    }

    /// Running total in tonnes
    #[must_use]
    pub fn total_co2_tonnes(&self) -> f64 {
        self.total_co2_kg / 1000.0
    }

    /// Sum of the entries' CO2, computed from scratch
    #[must_use]
    pub fn recomputed_total(&self) -> f64 {
        self.entries.iter().fold(0.0, |acc, e| acc + e.co2_kg())
    }
}

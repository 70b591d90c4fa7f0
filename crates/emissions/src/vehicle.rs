//! Transport modes, their emission rates and map colours

use crate::error::EstimateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transport mode of a journey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    /// Passenger car
    Car,
    /// Bus or coach
    Bus,
    /// Train
    Train,
    /// Aeroplane
    Plane,
    /// Bicycle
    Bicycle,
    /// On foot
    Walk,
}

impl VehicleType {
    /// Every mode, in display order
    pub const ALL: [VehicleType; 6] = [
        Self::Car,
        Self::Bus,
        Self::Train,
        Self::Plane,
        Self::Bicycle,
        Self::Walk,
    ];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Bus => "Bus",
            Self::Train => "Train",
            Self::Plane => "Plane",
            Self::Bicycle => "Bicycle",
            Self::Walk => "Walk",
        }
    }

    /// Emission rate in grams of CO2 per kilometre
    #[must_use]
    pub const fn emission_rate(self) -> u32 {
        EMISSION_RATES.rate(self)
    }

    /// Map marker colour
    #[must_use]
    pub const fn marker_color(self) -> MarkerColor {
        match self {
            Self::Car => MarkerColor::Red,
            Self::Bus => MarkerColor::Orange,
            Self::Train => MarkerColor::Blue,
            Self::Plane => MarkerColor::Purple,
            Self::Bicycle | Self::Walk => MarkerColor::Green,
        }
    }

    /// Returns true for modes that emit nothing
    #[must_use]
    pub const fn is_zero_emission(self) -> bool {
        self.emission_rate() == 0
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VehicleType {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "bus" | "coach" => Ok(Self::Bus),
            "train" | "rail" => Ok(Self::Train),
            "plane" | "flight" | "airplane" | "aeroplane" => Ok(Self::Plane),
            "bicycle" | "bike" => Ok(Self::Bicycle),
            "walk" | "walking" | "foot" => Ok(Self::Walk),
            _ => Err(EstimateError::unknown_vehicle(s)),
        }
    }
}

/// Fixed grams-of-CO2-per-km table
///
/// Indexed by [`VehicleType`]; every mode has exactly one non-negative rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmissionRateTable {
    // Order matches `VehicleType::ALL`
    grams_per_km: [u32; 6],
}

/// Process-wide emission rates
pub const EMISSION_RATES: EmissionRateTable = EmissionRateTable {
    grams_per_km: [120, 70, 40, 250, 0, 0],
};

impl EmissionRateTable {
    /// Rate for one mode in g/km
    #[must_use]
    pub const fn rate(&self, vehicle: VehicleType) -> u32 {
        self.grams_per_km[vehicle as usize]
    }

    /// CO2 in kilograms for a whole-kilometre distance
    #[must_use]
    pub fn co2_kg(&self, vehicle: VehicleType, distance_km: u32) -> f64 {
        f64::from(distance_km) * f64::from(self.rate(vehicle)) / 1000.0
    }

    /// `(mode, rate)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (VehicleType, u32)> + '_ {
        VehicleType::ALL.into_iter().map(|v| (v, self.rate(v)))
    }
}

/// Marker colour on the journey map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// Car
    Red,
    /// Bus
    Orange,
    /// Train
    Blue,
    /// Plane
    Purple,
    /// Bicycle and walking
    Green,
    /// Anything without its own colour
    #[default]
    Gray,
}

impl MarkerColor {
    /// Colour for a mode given by name, gray when the name is not a known mode
    #[must_use]
    pub fn for_vehicle_name(name: &str) -> Self {
        name.parse::<VehicleType>()
            .map(VehicleType::marker_color)
            .unwrap_or_default()
    }

    /// Lowercase colour name as used by map renderers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Green => "green",
            Self::Gray => "gray",
        }
    }
}

impl fmt::Display for MarkerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

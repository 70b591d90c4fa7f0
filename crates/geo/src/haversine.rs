//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// Uses the Haversine formula for accurate distance calculation on a sphere.
///
/// # Arguments
/// * `from` - Starting coordinate
/// * `to` - Ending coordinate
///
/// # Returns
/// Distance in kilometers
///
/// # Example
/// ```
/// use footprint_geo::{haversine_distance, Coordinate};
///
/// let madrid = Coordinate::new(40.4168, -3.7038);
/// let seville = Coordinate::new(37.3891, -5.9845);
///
/// let distance = haversine_distance(&madrid, &seville);
/// assert!((distance - 390.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    haversine_distance_with_radius(from, to, EARTH_RADIUS_KM)
}

/// Great-circle distance rounded to the nearest whole kilometer.
///
/// Halfway cases round away from zero, so 503.5 km becomes 504.
#[inline]
pub fn rounded_distance_km(from: &Coordinate, to: &Coordinate) -> u32 {
    // Bounded by half the circumference (~20 016 km), fits in u32
    haversine_distance(from, to).round() as u32
}

#[inline]
fn haversine_distance_with_radius(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair past 1.0 for antipodal points
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    radius * c
}

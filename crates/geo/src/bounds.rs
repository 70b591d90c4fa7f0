//! Axis-aligned latitude/longitude bounding boxes.

use crate::{Coordinate, GeoError, Result};
use serde::{Deserialize, Serialize};

/// A rectangular region in degrees. Does not wrap across the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Southern edge
    pub min_lat: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Western edge
    pub min_lon: f64,
    /// Eastern edge
    pub max_lon: f64,
}

impl BoundingBox {
    /// Mainland Spain, the default map region.
    pub const SPAIN: BoundingBox = BoundingBox {
        min_lat: 36.0,
        max_lat: 43.8,
        min_lon: -9.4,
        max_lon: 3.4,
    };

    /// Creates a bounding box, requiring `min < max` on both axes and valid corners.
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self> {
        let bbox = Self { min_lat, max_lat, min_lon, max_lon };

        if !(min_lat < max_lat && min_lon < max_lon) {
            return Err(GeoError::InvalidBounds(format!(
                "lat [{min_lat}, {max_lat}], lon [{min_lon}, {max_lon}]"
            )));
        }
        if !bbox.south_west().is_valid() || !bbox.north_east().is_valid() {
            return Err(GeoError::InvalidBounds(
                "corners must be valid coordinates".to_string(),
            ));
        }

        Ok(bbox)
    }

    /// South-west corner.
    pub fn south_west(&self) -> Coordinate {
        Coordinate::new(self.min_lat, self.min_lon)
    }

    /// North-east corner.
    pub fn north_east(&self) -> Coordinate {
        Coordinate::new(self.max_lat, self.max_lon)
    }

    /// Returns true if `coord` lies inside or on the edge of the box.
    pub fn contains(&self, coord: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coord.latitude)
            && (self.min_lon..=self.max_lon).contains(&coord.longitude)
    }

    /// Maps unit fractions onto the box: `(0, 0)` is the south-west corner,
    /// `(1, 1)` the north-east. Fractions are clamped to `[0, 1]`.
    pub fn interpolate(&self, lat_fraction: f64, lon_fraction: f64) -> Coordinate {
        let fy = lat_fraction.clamp(0.0, 1.0);
        let fx = lon_fraction.clamp(0.0, 1.0);
        // Weighted form hits both edges exactly at 0 and 1
        Coordinate::new(
            self.min_lat * (1.0 - fy) + self.max_lat * fy,
            self.min_lon * (1.0 - fx) + self.max_lon * fx,
        )
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::SPAIN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_inverted() {
        assert!(BoundingBox::new(43.8, 36.0, -9.4, 3.4).is_err());
        assert!(BoundingBox::new(36.0, 43.8, 3.4, 3.4).is_err());
        assert!(BoundingBox::new(36.0, 95.0, -9.4, 3.4).is_err());
        assert!(BoundingBox::new(36.0, 43.8, -9.4, 3.4).is_ok());
    }

    #[test]
    fn test_contains_madrid() {
        let madrid = Coordinate::new(40.4168, -3.7038);
        let paris = Coordinate::new(48.8566, 2.3522);
        assert!(BoundingBox::SPAIN.contains(&madrid));
        assert!(!BoundingBox::SPAIN.contains(&paris));
    }

    #[test]
    fn test_interpolate_corners_and_clamp() {
        let b = BoundingBox::SPAIN;
        assert_eq!(b.interpolate(0.0, 0.0), b.south_west());
        assert_eq!(b.interpolate(1.0, 1.0), b.north_east());
        assert_eq!(b.interpolate(-3.0, 7.0), Coordinate::new(36.0, 3.4));
    }
}

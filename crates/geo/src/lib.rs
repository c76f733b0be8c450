//! Geospatial utilities for placing Fifth World communities.
//!
//! This crate provides:
//! - Coordinate normalization from decimal or degree-minute-second input
//! - Great-circle distance and destination-point math
//! - Circle rasterization into closed polygons
//! - Coastline intersection over numbered GeoJSON shards, either through an
//!   R-tree built once or by scanning every shard on each check
//!
//! # Example
//!
//! ```
//! use fifthworld_geo::{normalize_str, Axis};
//!
//! let lat = normalize_str("40°26'30.5\"N", Axis::Latitude).unwrap();
//! assert!((lat - 40.441806).abs() < 1e-3);
//!
//! assert_eq!(normalize_str("200", Axis::Latitude), None);
//! ```

pub mod circle;
pub mod coastline;
mod distance;
mod error;
mod normalize;

pub use circle::{circle, world_copies, CircleOptions};
pub use coastline::{
    CoastlineIndex, CoastlineProbe, DirShardSource, HttpShardSource, ShardScanner, ShardSource,
};
pub use distance::{destination, haversine_distance, DistanceUnit, EARTH_RADIUS_KM};
pub use error::{GeoError, GeoErrorCode, Result};
pub use normalize::{normalize, normalize_number, normalize_str, Axis};

/// A geographic coordinate with latitude and longitude.
///
/// Serialized as a `[latitude, longitude]` pair, the layout community
/// records use for territory centers and places.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self::new(lat, lng)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.latitude, coord.longitude]
    }
}

/// Planar geometry uses x = longitude, y = latitude.
impl From<Coordinate> for geo::Coord<f64> {
    fn from(coord: Coordinate) -> Self {
        geo::Coord {
            x: coord.longitude,
            y: coord.latitude,
        }
    }
}

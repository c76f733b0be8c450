//! Circle rasterization.
//!
//! Approximates the set of points within a radius of a center by a closed
//! polygon whose vertices are great-circle destination points.
//!
//! Rings stay continuous across the antimeridian, so a vertex longitude may
//! fall outside [-180, 180]. [`world_copies`] gives the shifted copies that
//! planar intersection tests need in that case.

use crate::distance::{destination, DistanceUnit};
use crate::{Coordinate, GeoError, Result};
use geo::{BoundingRect, Coord, LineString, Polygon, Translate};
use serde::{Deserialize, Serialize};

/// Parameters for [`circle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleOptions {
    /// Number of distinct vertices (the ring holds one more to close it)
    pub points: usize,
    /// Radius in `unit`s
    pub radius: f64,
    /// Unit of `radius`
    pub unit: DistanceUnit,
}

impl Default for CircleOptions {
    /// Ten vertices, 45 km: about a day's walk.
    fn default() -> Self {
        Self {
            points: 10,
            radius: 45.0,
            unit: DistanceUnit::Kilometers,
        }
    }
}

impl CircleOptions {
    /// Options with a radius in kilometers and the default vertex count.
    pub fn kilometers(radius: f64) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    /// Override the vertex count.
    #[must_use]
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }
}

/// Build a closed polygon approximating a circle around `center`.
///
/// Vertex `i` lies on bearing `180 - i * 360 / points`, so the ring starts
/// due south and sweeps clockwise. The first vertex is repeated at the end.
/// Vertex longitudes are kept within 180° of the center's.
///
/// ```
/// use fifthworld_geo::{circle, CircleOptions, Coordinate};
///
/// let ring = circle(Coordinate::new(40.44, -80.0), &CircleOptions::default()).unwrap();
/// assert_eq!(ring.exterior().0.len(), 11);
/// ```
pub fn circle(center: Coordinate, options: &CircleOptions) -> Result<Polygon<f64>> {
    if options.points < 3 {
        return Err(GeoError::InvalidCircle(format!(
            "need at least 3 points, got {}",
            options.points
        )));
    }
    if !(options.radius.is_finite() && options.radius > 0.0) {
        return Err(GeoError::InvalidCircle(format!(
            "radius must be positive, got {}",
            options.radius
        )));
    }
    if !center.is_valid() {
        return Err(GeoError::InvalidCoordinate(format!(
            "{}, {}",
            center.latitude, center.longitude
        )));
    }

    let radius_km = options.unit.to_km(options.radius);
    let step = 360.0 / options.points as f64;

    let mut ring: Vec<Coord<f64>> = (0..options.points)
        .map(|i| {
            let vertex = destination(&center, 180.0 - i as f64 * step, radius_km);
            Coord {
                x: unwrap_longitude(vertex.longitude, center.longitude),
                y: vertex.latitude,
            }
        })
        .collect();
    ring.push(ring[0]);

    Ok(Polygon::new(LineString::new(ring), vec![]))
}

/// `polygon`, plus a copy shifted by 360° for each side of the antimeridian
/// it runs past.
///
/// Coastline features use longitudes in [-180, 180]; testing every copy finds
/// coast on the far side of the seam.
pub fn world_copies(polygon: &Polygon<f64>) -> Vec<Polygon<f64>> {
    let mut copies = vec![polygon.clone()];
    if let Some(rect) = polygon.bounding_rect() {
        if rect.max().x > 180.0 {
            copies.push(polygon.translate(-360.0, 0.0));
        }
        if rect.min().x < -180.0 {
            copies.push(polygon.translate(360.0, 0.0));
        }
    }
    copies
}

fn unwrap_longitude(lon: f64, reference: f64) -> f64 {
    if lon - reference > 180.0 {
        lon - 360.0
    } else if reference - lon > 180.0 {
        lon + 360.0
    } else {
        lon
    }
}

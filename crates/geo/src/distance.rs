//! Great-circle distance and destination-point math on a spherical Earth.

use crate::Coordinate;
use serde::{Deserialize, Serialize};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const KM_PER_MILE: f64 = 1.609_344;

/// Length unit for radii and distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
    Miles,
}

impl DistanceUnit {
    /// Convert a length in this unit to kilometers.
    #[inline]
    pub fn to_km(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value,
            DistanceUnit::Meters => value / 1000.0,
            DistanceUnit::Miles => value * KM_PER_MILE,
        }
    }
}

/// Great-circle distance between two coordinates in kilometers (haversine).
///
/// # Example
/// ```
/// use fifthworld_geo::{haversine_distance, Coordinate};
///
/// let pittsburgh = Coordinate::new(40.4406, -79.9959);
/// let philadelphia = Coordinate::new(39.9526, -75.1652);
///
/// let distance = haversine_distance(&pittsburgh, &philadelphia);
/// assert!((distance - 414.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    central_angle(from, to) * EARTH_RADIUS_KM
}

fn central_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Point reached by travelling `distance_km` from `origin` on the initial
/// bearing `bearing_deg` (clockwise from north).
///
/// Longitude is wrapped into [-180, 180].
pub fn destination(origin: &Coordinate, bearing_deg: f64, distance_km: f64) -> Coordinate {
    let (lat1, lon1) = origin.to_radians();
    let bearing = bearing_deg.to_radians();
    let delta = distance_km / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    Coordinate::new(lat2.to_degrees(), wrap_longitude(lon2.to_degrees()))
}

fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the caller's sign at the seam
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PITTSBURGH: Coordinate = Coordinate { latitude: 40.4406, longitude: -79.9959 };
    const PHILADELPHIA: Coordinate = Coordinate { latitude: 39.9526, longitude: -75.1652 };
    const LISBON: Coordinate = Coordinate { latitude: 38.7223, longitude: -9.1393 };

    #[test]
    fn test_pittsburgh_to_philadelphia() {
        let distance = haversine_distance(&PITTSBURGH, &PHILADELPHIA);
        // Expected: ~414 km
        assert!((distance - 414.0).abs() < 5.0, "Pittsburgh-Philadelphia: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert!(haversine_distance(&LISBON, &LISBON).abs() < 0.001);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance(&PITTSBURGH, &LISBON);
        let d2 = haversine_distance(&LISBON, &PITTSBURGH);
        assert!((d1 - d2).abs() < 0.001);
    }

    #[test]
    fn test_destination_due_north() {
        let origin = Coordinate::new(0.0, 0.0);
        let north = destination(&origin, 0.0, 111.195);
        assert!((north.latitude - 1.0).abs() < 1e-3);
        assert!(north.longitude.abs() < 1e-9);
    }

    #[test]
    fn test_destination_distance_matches_haversine() {
        for bearing in [0.0, 45.0, 137.0, 180.0, 271.0] {
            let end = destination(&PITTSBURGH, bearing, 45.0);
            let back = haversine_distance(&PITTSBURGH, &end);
            assert!((back - 45.0).abs() < 1e-6, "bearing {bearing}: {back}");
        }
    }

    #[test]
    fn test_destination_wraps_antimeridian() {
        let origin = Coordinate::new(0.0, 179.9);
        let east = destination(&origin, 90.0, 50.0);
        assert!(east.longitude < -179.0, "{}", east.longitude);
        assert!(east.is_valid());
    }

    #[test]
    fn test_units() {
        assert_eq!(DistanceUnit::Kilometers.to_km(45.0), 45.0);
        assert_eq!(DistanceUnit::Meters.to_km(45_000.0), 45.0);
        assert!((DistanceUnit::Miles.to_km(1.0) - 1.609_344).abs() < 1e-12);
    }
}

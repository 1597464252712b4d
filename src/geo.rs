//! Geographic coordinates and the distance used by the search heuristic.

use geo::HaversineDistance;
use geo::Point;

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        LatLon { lat, lon }
    }
}

/// Great-circle distance in meters.
pub fn haversine_distance(from: LatLon, to: LatLon) -> f64 {
    let p1 = Point::new(from.lon, from.lat);
    let p2 = Point::new(to.lon, to.lat);
    p1.haversine_distance(&p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = LatLon::new(43.7384, 7.4246);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_distance_monaco_to_nice() {
        let monaco = LatLon::new(43.7384, 7.4246);
        let nice = LatLon::new(43.7102, 7.2620);
        let d = haversine_distance(monaco, nice);
        // Roughly 13 km as the crow flies.
        assert!((12_000.0..15_000.0).contains(&d), "got {d}");
    }
}

//! Great-circle distance on a spherical Earth

use geo::{Distance, HaversineMeasure, Point};

/// Mean Earth radius in meters
pub const EARTH_RADIUS: f64 = 6_371_000.0;

const EARTH: HaversineMeasure = HaversineMeasure::new(EARTH_RADIUS);

/// Great-circle distance in meters between two points (x = longitude, y = latitude)
pub fn great_circle_distance(from: Point<f64>, to: Point<f64>) -> f64 {
    EARTH.distance(from, to)
}

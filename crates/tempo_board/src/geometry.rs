//! Polyline shapes measured in internal length units.

use serde::{Deserialize, Serialize};

/// A point on the board in internal length units (nanometres).
pub type Point = (i64, i64);

/// An open polyline: the shape of a routed track or of a proposed tuning
/// pattern that has not been committed to the board yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineChain {
    points: Vec<Point>,
}

impl LineChain {
    /// Creates a polyline through the given points.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Creates a single straight segment.
    pub fn segment(start: Point, end: Point) -> Self {
        Self::new(vec![start, end])
    }

    /// Returns the total Euclidean length, rounded to the nearest internal unit.
    ///
    /// A chain with fewer than two vertices has zero length. Coordinates are
    /// differenced in `f64`, so any pair of points is measurable; a length
    /// beyond `i64` saturates.
    pub fn length(&self) -> i64 {
        let total: f64 = self
            .points
            .windows(2)
            .map(|w| {
                let dx = w[1].0 as f64 - w[0].0 as f64;
                let dy = w[1].1 as f64 - w[0].1 as f64;
                dx.hypot(dy)
            })
            .sum();
        total.round() as i64
    }
}

impl FromIterator<Point> for LineChain {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Tools and structs for working with paths on the surface of a map.

use tn_geom::Point;

/// A path defined by a sequence of way points. Start and target position are
/// included, the first way point is the start.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    length: f32,
    waypoints: Vec<Point>,
}

impl Path {
    /// Creates a path on line `from` -> `to`. The path consists of a single
    /// way point if the two points coincide.
    pub fn straight(from: Point, to: Point) -> Self {
        if from == to {
            Self::new(0., vec![from])
        } else {
            Self::new((to - from).magnitude(), vec![from, to])
        }
    }

    /// Creates a path from way points, the length is computed.
    pub fn from_waypoints(waypoints: Vec<Point>) -> Self {
        let length = waypoints
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).magnitude())
            .sum();
        Self::new(length, waypoints)
    }

    /// Creates a new path.
    ///
    /// # Panics
    ///
    /// May panic if sum of distances of `waypoints` is not equal to provided
    /// `length`.
    pub fn new(length: f32, waypoints: Vec<Point>) -> Self {
        #[cfg(debug_assertions)]
        {
            let computed: f32 = waypoints
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).magnitude())
                .sum();
            debug_assert!((computed - length).abs() <= 0.001 * length.max(1.));
        }
        Self { length, waypoints }
    }

    /// Returns length of the path in world units.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Returns complete sequence of the path way points, ordered from start
    /// to target.
    pub fn waypoints(&self) -> &[Point] {
        self.waypoints.as_slice()
    }
}

use std::hash::{Hash, Hasher};

use parry2d::shape::Segment;

use crate::{key::PointKey, Point};

/// An undirected line segment between two points.
///
/// Two edges are equal if their end points match exactly, in either order.
/// The hash is orientation independent as well, thus an edge can be used to
/// look up a shared triangle side regardless of which triangle produced it.
#[derive(Clone, Copy, Debug)]
pub struct Edge {
    a: Point,
    b: Point,
}

impl Edge {
    pub fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    pub fn a(&self) -> Point {
        self.a
    }

    pub fn b(&self) -> Point {
        self.b
    }

    /// Returns the same edge with swapped end points.
    pub fn reversed(&self) -> Self {
        Self::new(self.b, self.a)
    }

    pub fn length(&self) -> f32 {
        (self.b - self.a).magnitude()
    }

    pub fn midpoint(&self) -> Point {
        parry2d::na::center(&self.a, &self.b)
    }

    /// Returns true if `point` is (exactly) one of the end points.
    pub fn has_end_point(&self, point: Point) -> bool {
        PointKey(point) == PointKey(self.a) || PointKey(point) == PointKey(self.b)
    }

    pub fn to_segment(&self) -> Segment {
        Segment::new(self.a, self.b)
    }

    /// Returns end point keys in a canonical (sorted) order.
    fn keys(&self) -> (PointKey, PointKey) {
        let a = PointKey(self.a);
        let b = PointKey(self.b);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.keys() == other.keys()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.keys().hash(state);
    }
}

impl From<Segment> for Edge {
    fn from(segment: Segment) -> Self {
        Self::new(segment.a, segment.b)
    }
}

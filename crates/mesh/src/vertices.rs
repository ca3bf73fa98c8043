use ahash::AHashMap;
use tn_geom::{Point, PointKey};

/// A growing list of unique points.
///
/// Points are matched by exact coordinates. Each unique point is assigned an
/// index equal to its position in insertion order.
#[derive(Default)]
pub struct VertexSet {
    points: Vec<Point>,
    index: AHashMap<PointKey, usize>,
}

impl VertexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a point to the set unless an equal point is already present.
    /// Returns index of the (possibly pre-existing) point.
    pub fn add(&mut self, point: Point) -> usize {
        *self.index.entry(PointKey(point)).or_insert_with(|| {
            self.points.push(point);
            self.points.len() - 1
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }
}

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use crate::Point;

/// A wrapper of [`Point`] which implements [`Ord`], [`Eq`], and [`Hash`]
/// traits based on exact coordinate match.
///
/// Both zeroes are considered equal and so are all NaN representations.
#[derive(Debug, Copy, Clone)]
pub struct PointKey(pub Point);

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp(self.0.x, other.0.x).then_with(|| cmp(self.0.y, other.0.y))
    }
}

impl PartialEq for PointKey {
    fn eq(&self, other: &Self) -> bool {
        eq(self.0.x, other.0.x) && eq(self.0.y, other.0.y)
    }
}

impl Eq for PointKey {}

impl Hash for PointKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash(self.0.x, state);
        hash(self.0.y, state);
    }
}

impl From<Point> for PointKey {
    fn from(point: Point) -> Self {
        Self(point)
    }
}

fn eq(a: f32, b: f32) -> bool {
    (a.is_nan() && b.is_nan()) || a == b
}

fn cmp(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| {
        if a.is_nan() && !b.is_nan() {
            Ordering::Less
        } else if !a.is_nan() && b.is_nan() {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
}

fn hash<H: Hasher>(value: f32, state: &mut H) {
    if value.is_nan() {
        state.write(&f32::to_ne_bytes(f32::NAN));
    } else if value == 0.0 {
        // -0.0 == 0.0 thus both must hash equally
        state.write(&f32::to_ne_bytes(0.0f32));
    } else {
        state.write(&f32::to_ne_bytes(value));
    }
}

use crate::{Edge, Point};

/// Reorients the edge so that end point `a` appears on the left side of end
/// point `b` from the perspective of `eye`.
pub fn orient(eye: Point, edge: Edge) -> Edge {
    if which_side(eye, edge.a(), edge.b()) == Side::Left {
        edge.reversed()
    } else {
        edge
    }
}

/// Returns the side at which point `new` appears relative to point `old` from
/// the perspective of `eye`.
///
/// Returns [`Side::Straight`] if `eye`, `old` and `new` are collinear. This
/// includes the degenerate cases when `eye` coincides with `old` or `new`.
pub fn which_side(eye: Point, old: Point, new: Point) -> Side {
    let perp: f32 = (eye - old).perp(&(eye - new));
    if perp < 0. {
        Side::Left
    } else if perp > 0. {
        Side::Right
    } else {
        Side::Straight
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Straight,
    Right,
}

impl Side {
    /// Returns the opposite side. [`Side::Straight`] is its own opposite.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Straight => Self::Straight,
            Self::Right => Self::Left,
        }
    }
}

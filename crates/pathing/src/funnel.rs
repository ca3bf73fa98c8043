//! Implementation of the funnel (string pulling) algorithm.
//!
//! The funnel is an apex point and two bounds: the most recently accepted
//! left and right portal points. Each new portal point either narrows its
//! side of the funnel, is ignored because it would widen it, or crosses the
//! opposing bound. In the last case the opposing bound is a corner of the
//! shortest path: it becomes a way point and the new apex, and the funnel is
//! rebuilt from portals following that corner.

use tn_geom::{which_side, Edge, Point, Side};
use tracing::trace;

use crate::path::Path;

/// Funnel collecting portals of a corridor.
///
/// The funnel is consumed by [`Self::closed`], which computes the final
/// path.
pub struct Funnel {
    start: Point,
    midpoint_threshold: f32,
    /// Left and right points of all portals added so far.
    portals: Vec<(Point, Point)>,
}

impl Funnel {
    /// Creates a new funnel with its apex at `start`.
    ///
    /// # Arguments
    ///
    /// * `start` - first way point of the path.
    ///
    /// * `midpoint_threshold` - portals shorter than this are replaced by
    ///   their midpoint.
    pub fn new(start: Point, midpoint_threshold: f32) -> Self {
        Self {
            start,
            midpoint_threshold,
            portals: Vec::new(),
        }
    }

    /// Extends the funnel by the next portal.
    ///
    /// It is supposed that `portal.a()` is on the left side and `portal.b()`
    /// on the right side from the perspective of a traveller crossing it. See
    /// [`crate::extract_portals`].
    pub fn extend(&mut self, portal: Edge) {
        if portal.length() < self.midpoint_threshold {
            let midpoint = portal.midpoint();
            self.portals.push((midpoint, midpoint));
        } else {
            self.portals.push((portal.a(), portal.b()));
        }
    }

    /// Returns the number of portals added so far.
    pub fn len(&self) -> usize {
        self.portals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portals.is_empty()
    }

    /// Returns the shortest path from the start through all portals to point
    /// `end`.
    ///
    /// The path starts at the start point, continues through all corners
    /// where the funnel closed and ends at `end`. It contains no consecutive
    /// duplicate way points.
    pub fn closed(mut self, end: Point) -> Path {
        if self.start == end {
            return Path::straight(self.start, end);
        }
        if self.portals.is_empty() {
            return Path::straight(self.start, end);
        }

        self.portals.push((end, end));

        let mut waypoints = vec![self.start];
        let mut state = FunnelState::new(self.start);
        let mut index = 0;

        while index < self.portals.len() {
            let (left, right) = self.portals[index];
            let corner = state
                .narrow(Side::Left, Bound::new(left, index))
                .or_else(|| state.narrow(Side::Right, Bound::new(right, index)));

            match corner {
                Some(corner) => {
                    trace!("Funnel closed at {:?}", corner.point);
                    if waypoints.last() != Some(&corner.point) {
                        waypoints.push(corner.point);
                    }
                    state = FunnelState::new(corner.point);
                    index = corner.index + 1;
                }
                None => index += 1,
            }
        }

        if waypoints.last() != Some(&end) {
            waypoints.push(end);
        }
        Path::from_waypoints(waypoints)
    }
}

/// A funnel bound: a portal point and index of its portal.
#[derive(Clone, Copy, Debug)]
struct Bound {
    point: Point,
    index: usize,
}

impl Bound {
    fn new(point: Point, index: usize) -> Self {
        Self { point, index }
    }
}

/// Mutable state of the funnel between two corners. Only the most recently
/// accepted point of each side matters.
struct FunnelState {
    apex: Point,
    left: Option<Bound>,
    right: Option<Bound>,
}

impl FunnelState {
    fn new(apex: Point) -> Self {
        Self {
            apex,
            left: None,
            right: None,
        }
    }

    /// Narrows the funnel on `side` by a portal point.
    ///
    /// Returns the opposing bound if the point crosses it, id est if the
    /// opposing bound is a corner of the path. The funnel is left unchanged
    /// in such a case.
    ///
    /// # Panics
    ///
    /// Panics if `side` is not [`Side::Left`] or [`Side::Right`].
    fn narrow(&mut self, side: Side, bound: Bound) -> Option<Bound> {
        // A point coinciding with the apex has no direction.
        if bound.point == self.apex {
            return None;
        }

        let apex = self.apex;
        let (current, opposing) = match side {
            Side::Left => (&mut self.left, self.right),
            Side::Right => (&mut self.right, self.left),
            _ => panic!("Only Left and Right sides are accepted, got: {side:?}"),
        };

        if let Some(accepted) = *current {
            if which_side(apex, accepted.point, bound.point) == side {
                // The point widens the funnel.
                return None;
            }
        }

        if let Some(opposing) = opposing {
            if which_side(apex, opposing.point, bound.point) == side.opposite() {
                return Some(opposing);
            }
        }

        *current = Some(bound);
        None
    }
}

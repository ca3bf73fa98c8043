use parry2d::shape::Triangle;
use tinyvec::ArrayVec;
use tn_geom::{which_side, Edge, Point, Side};

use crate::navmesh::Neighbour;

/// A walkable triangle of the navigation mesh.
#[derive(Clone, Debug)]
pub struct MeshTriangle {
    triangle: Triangle,
    centroid: Point,
    bounds_radius: f32,
    neighbours: ArrayVec<[Neighbour; 3]>,
}

impl MeshTriangle {
    pub fn new(triangle: Triangle) -> Self {
        let centroid = triangle.center();
        let bounds_radius = [triangle.a, triangle.b, triangle.c]
            .iter()
            .map(|&vertex| (vertex - centroid).magnitude())
            .fold(0., f32::max);

        Self {
            triangle,
            centroid,
            bounds_radius,
            neighbours: ArrayVec::new(),
        }
    }

    pub fn triangle(&self) -> &Triangle {
        &self.triangle
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.triangle.a, self.triangle.b, self.triangle.c]
    }

    /// Returns the three sides AB, BC and CA.
    pub fn edges(&self) -> [Edge; 3] {
        self.triangle.edges().map(Edge::from)
    }

    pub fn centroid(&self) -> Point {
        self.centroid
    }

    /// Radius of a circle centered at the centroid which covers the whole
    /// triangle.
    pub fn bounds_radius(&self) -> f32 {
        self.bounds_radius
    }

    pub fn area(&self) -> f32 {
        self.triangle.area()
    }

    /// Returns true if the point lies inside or on the boundary of the
    /// triangle.
    pub fn contains(&self, point: Point) -> bool {
        let sides = self.edges().map(|edge| which_side(edge.a(), edge.b(), point));
        !(sides.contains(&Side::Left) && sides.contains(&Side::Right))
    }

    /// Returns triangles sharing a side with this triangle. See
    /// [`Self::portals`].
    pub fn neighbours(&self) -> &[Neighbour] {
        self.neighbours.as_slice()
    }

    /// Returns shared sides with the neighbours, in the same order as
    /// [`Self::neighbours`].
    pub fn portals(&self) -> impl Iterator<Item = Edge> + '_ {
        let edges = self.edges();
        self.neighbours.iter().map(move |n| edges[n.edge_index()])
    }

    /// Returns the shared side with a neighbouring triangle or None if the
    /// triangles are not neighbours.
    pub fn portal_to(&self, triangle_id: u32) -> Option<Edge> {
        self.neighbours
            .iter()
            .find(|n| n.triangle_id() == triangle_id)
            .map(|n| self.edges()[n.edge_index()])
    }

    pub(crate) fn add_neighbour(&mut self, neighbour: Neighbour) {
        self.neighbours.push(neighbour);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_triangle() {
        let triangle = MeshTriangle::new(Triangle::new(
            Point::new(0., 0.),
            Point::new(3., 0.),
            Point::new(0., 3.),
        ));

        assert_eq!(triangle.centroid(), Point::new(1., 1.));
        assert_abs_diff_eq!(triangle.bounds_radius(), 5f32.sqrt(), epsilon = 1e-6);
        assert_abs_diff_eq!(triangle.area(), 4.5);
        assert!(triangle.contains(Point::new(1., 1.)));
        assert!(triangle.contains(Point::new(1.5, 0.)));
        assert!(!triangle.contains(Point::new(2., 2.)));
        assert!(triangle.neighbours().is_empty());
        assert_eq!(triangle.portals().count(), 0);
        assert_eq!(
            triangle.edges()[1],
            Edge::new(Point::new(0., 3.), Point::new(3., 0.))
        );
    }
}

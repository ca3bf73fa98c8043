use tn_geom::{Edge, Point};
use tn_mesh::NavMesh;
use tracing::{debug, warn};

use crate::{
    corridor::{extract_portals, Corridor, CorridorError},
    funnel::Funnel,
    path::Path,
};

/// A single path request: portals of a corridor and the smoothed path
/// through them.
///
/// The request holds no reference to the mesh, thus any number of requests
/// can be computed concurrently over a shared mesh.
pub struct PathRequest {
    portals: Vec<Edge>,
    path: Path,
}

impl PathRequest {
    /// Computes the shortest path from `start` to `end` inside a corridor.
    ///
    /// # Arguments
    ///
    /// * `mesh` - the navigation mesh the corridor belongs to.
    ///
    /// * `corridor` - chain of adjacent triangles. The first triangle must
    ///   contain `start` and the last one must contain `end`.
    ///
    /// * `midpoint_threshold` - portals shorter than this are treated as a
    ///   single point (their midpoint).
    pub fn new(
        mesh: &NavMesh,
        corridor: &Corridor,
        start: Point,
        end: Point,
        midpoint_threshold: f32,
    ) -> Result<Self, CorridorError> {
        let portals = extract_portals(mesh, corridor)?;

        if portals.is_empty() {
            let triangle = mesh.triangle(corridor.origin());
            if !triangle.contains(start) || !triangle.contains(end) {
                warn!(
                    "Single triangle corridor {} does not contain both {:?} and {:?}",
                    corridor.origin(),
                    start,
                    end
                );
            }
        }

        let mut funnel = Funnel::new(start, midpoint_threshold);
        for &portal in &portals {
            funnel.extend(portal);
        }
        let path = funnel.closed(end);

        debug!(
            "Path of length {} with {} way points through {} portals found",
            path.length(),
            path.waypoints().len(),
            portals.len()
        );

        Ok(Self { portals, path })
    }

    /// Returns the oriented portals of the corridor, ordered from the origin.
    pub fn portals(&self) -> &[Edge] {
        self.portals.as_slice()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> Path {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use parry2d::shape::Triangle;
    use tn_mesh::MeshTriangle;

    use super::*;

    /// Two right triangles sharing the side (10, 0) -> (10, 10), together
    /// with two outer triangles forming rectangle (0, 0) -> (20, 10).
    fn mesh() -> NavMesh {
        NavMesh::new(vec![
            MeshTriangle::new(Triangle::new(
                Point::new(0., 0.),
                Point::new(10., 0.),
                Point::new(0., 10.),
            )),
            MeshTriangle::new(Triangle::new(
                Point::new(10., 0.),
                Point::new(10., 10.),
                Point::new(0., 10.),
            )),
            MeshTriangle::new(Triangle::new(
                Point::new(10., 0.),
                Point::new(20., 0.),
                Point::new(10., 10.),
            )),
            MeshTriangle::new(Triangle::new(
                Point::new(20., 0.),
                Point::new(20., 10.),
                Point::new(10., 10.),
            )),
        ])
    }

    #[test]
    fn test_request() {
        let mesh = mesh();
        let corridor = Corridor::origin_first(vec![1, 2]).unwrap();
        let request = PathRequest::new(
            &mesh,
            &corridor,
            Point::new(8., 5.),
            Point::new(12., 5.),
            0.,
        )
        .unwrap();

        assert_eq!(request.portals().len(), 1);
        assert_eq!(
            request.path().waypoints(),
            &[Point::new(8., 5.), Point::new(12., 5.)]
        );
        assert_eq!(request.into_path().length(), 4.);
    }

    #[test]
    fn test_single_triangle() {
        let mesh = mesh();
        let corridor = Corridor::origin_first(vec![0]).unwrap();
        let request =
            PathRequest::new(&mesh, &corridor, Point::new(1., 1.), Point::new(3., 4.), 0.)
                .unwrap();
        assert!(request.portals().is_empty());
        assert_eq!(
            request.path().waypoints(),
            &[Point::new(1., 1.), Point::new(3., 4.)]
        );
    }

    #[test]
    fn test_non_adjacent() {
        let mesh = mesh();
        let corridor = Corridor::origin_first(vec![0, 2]).unwrap();
        assert!(matches!(
            PathRequest::new(&mesh, &corridor, Point::new(1., 1.), Point::new(15., 2.), 0.),
            Err(CorridorError::NonAdjacent { .. })
        ));
    }
}

//! Extraction of portals from a chain of adjacent triangles.

use thiserror::Error;
use tn_geom::{orient, Edge};
use tn_mesh::NavMesh;

/// An ordered chain of adjacent triangles of a navigation mesh. The first
/// triangle contains the path origin and the last one the path destination.
///
/// Graph searches commonly produce the chain backwards (by following
/// predecessors from the destination), thus the order must be stated
/// explicitly on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corridor {
    triangles: Vec<u32>,
}

impl Corridor {
    /// Creates a corridor from a chain of triangle IDs ordered from the
    /// origin to the destination.
    pub fn origin_first(triangles: Vec<u32>) -> Result<Self, CorridorError> {
        if triangles.is_empty() {
            return Err(CorridorError::Empty);
        }
        Ok(Self { triangles })
    }

    /// Creates a corridor from a chain of triangle IDs ordered from the
    /// destination to the origin.
    pub fn destination_first(mut triangles: Vec<u32>) -> Result<Self, CorridorError> {
        triangles.reverse();
        Self::origin_first(triangles)
    }

    /// Returns triangle IDs ordered from the origin to the destination.
    pub fn triangles(&self) -> &[u32] {
        self.triangles.as_slice()
    }

    /// ID of the triangle containing the origin.
    pub fn origin(&self) -> u32 {
        self.triangles[0]
    }

    /// ID of the triangle containing the destination.
    pub fn destination(&self) -> u32 {
        self.triangles[self.triangles.len() - 1]
    }

    /// Number of triangles in the corridor. It is always at least 1.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }
}

/// Returns the portals (shared sides) of consecutive corridor triangles
/// ordered from the origin to the destination.
///
/// Each portal is oriented so that its end point `a` is on the left side and
/// `b` on the right side from the perspective of a traveller crossing it
/// towards the destination. A single triangle corridor has no portals.
pub fn extract_portals(mesh: &NavMesh, corridor: &Corridor) -> Result<Vec<Edge>, CorridorError> {
    if let Some(&triangle_id) = corridor
        .triangles()
        .iter()
        .find(|&&id| mesh.get(id).is_none())
    {
        return Err(CorridorError::UnknownTriangle { triangle_id });
    }

    corridor
        .triangles()
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (from, to) = (pair[0], pair[1]);
            let portal = mesh
                .portal(from, to)
                .ok_or(CorridorError::NonAdjacent { index, from, to })?;
            Ok(orient(mesh.triangle(from).centroid(), portal))
        })
        .collect()
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CorridorError {
    #[error("corridor contains no triangles")]
    Empty,
    #[error("triangle {triangle_id} is not part of the mesh")]
    UnknownTriangle { triangle_id: u32 },
    #[error("triangles {from} and {to} at corridor position {index} are not adjacent")]
    NonAdjacent { index: usize, from: u32, to: u32 },
}

#[cfg(test)]
mod tests {
    use parry2d::shape::Triangle;
    use tn_geom::Point;
    use tn_mesh::MeshTriangle;

    use super::*;

    /// A strip of four triangles covering rectangle (0, 0) -> (20, 10), each
    /// sharing a side with the next one.
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
    fn test_corridor() {
        assert_eq!(Corridor::origin_first(vec![]), Err(CorridorError::Empty));
        assert_eq!(
            Corridor::destination_first(vec![]),
            Err(CorridorError::Empty)
        );

        let corridor = Corridor::destination_first(vec![3, 2, 1]).unwrap();
        assert_eq!(corridor.triangles(), &[1, 2, 3]);
        assert_eq!(corridor.origin(), 1);
        assert_eq!(corridor.destination(), 3);
        assert_eq!(corridor.len(), 3);
    }

    #[test]
    fn test_extract_portals() {
        let mesh = mesh();

        let portals =
            extract_portals(&mesh, &Corridor::origin_first(vec![0, 1, 2, 3]).unwrap()).unwrap();
        assert_eq!(portals.len(), 3);
        // Travelling to the right (+x) the left hand side is at lower y.
        assert_eq!(portals[0].a(), Point::new(10., 0.));
        assert_eq!(portals[0].b(), Point::new(0., 10.));
        assert_eq!(portals[1].a(), Point::new(10., 0.));
        assert_eq!(portals[1].b(), Point::new(10., 10.));
        assert_eq!(portals[2].a(), Point::new(20., 0.));
        assert_eq!(portals[2].b(), Point::new(10., 10.));

        let backwards =
            extract_portals(&mesh, &Corridor::destination_first(vec![0, 1, 2, 3]).unwrap())
                .unwrap();
        assert_eq!(backwards.len(), 3);
        assert_eq!(backwards[0], portals[2]);
        assert_eq!(backwards[0].a(), Point::new(10., 10.));
        assert_eq!(backwards[2].a(), Point::new(0., 10.));
    }

    #[test]
    fn test_single_triangle() {
        let portals = extract_portals(&mesh(), &Corridor::origin_first(vec![2]).unwrap()).unwrap();
        assert!(portals.is_empty());
    }

    #[test]
    fn test_invalid_chain() {
        let mesh = mesh();
        assert_eq!(
            extract_portals(&mesh, &Corridor::origin_first(vec![0, 1, 3]).unwrap()),
            Err(CorridorError::NonAdjacent {
                index: 1,
                from: 1,
                to: 3
            })
        );
        assert_eq!(
            extract_portals(&mesh, &Corridor::origin_first(vec![0, 0]).unwrap()),
            Err(CorridorError::NonAdjacent {
                index: 0,
                from: 0,
                to: 0
            })
        );
        assert_eq!(
            extract_portals(&mesh, &Corridor::origin_first(vec![0, 9]).unwrap()),
            Err(CorridorError::UnknownTriangle { triangle_id: 9 })
        );
    }
}

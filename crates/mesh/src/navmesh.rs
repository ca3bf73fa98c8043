//! This module contains the navigation mesh: an arena of triangles connected
//! over shared sides.

use ahash::AHashMap;
use parry2d::{na, query::PointQuery};
use rstar::{PointDistance, RTree, RTreeObject, AABB};
use tn_geom::{Edge, Point};
use tracing::{debug, warn};

use crate::triangle::MeshTriangle;

/// A navigation mesh: non-overlapping triangles together with their
/// adjacency.
///
/// Triangles are addressed by IDs equal to their position in the triangle
/// list the mesh was created from. The mesh is immutable once created and can
/// be shared among any number of concurrent path requests.
pub struct NavMesh {
    triangles: Vec<MeshTriangle>,
    /// Spatial index of triangles. It is used to find triangles containing
    /// start and end points of a path.
    index: RTree<IndexedTriangle>,
}

impl NavMesh {
    /// Creates a new mesh from a triangulation. Triangles sharing a side
    /// (with exactly equal end points) become neighbours.
    ///
    /// # Panics
    ///
    /// Panics if the number of triangles does not fit into `u32`.
    pub fn new(mut triangles: Vec<MeshTriangle>) -> Self {
        let mut open_sides: AHashMap<Edge, (u32, u8)> =
            AHashMap::with_capacity(triangles.len() * 3);
        let mut links = Vec::with_capacity(triangles.len() * 3 / 2);

        for (index, triangle) in triangles.iter().enumerate() {
            let triangle_id: u32 = index.try_into().unwrap();
            for (edge_index, edge) in (0u8..).zip(triangle.edges()) {
                match open_sides.remove(&edge) {
                    Some((other_id, other_index)) => {
                        if other_id == triangle_id {
                            warn!("Degenerate triangle {triangle_id} with a repeated side ignored");
                            continue;
                        }
                        links.push((triangle_id, edge_index, other_id, other_index));
                    }
                    None => {
                        open_sides.insert(edge, (triangle_id, edge_index));
                    }
                }
            }
        }

        for &(a_id, a_index, b_id, b_index) in &links {
            triangles[a_id as usize].add_neighbour(Neighbour::new(b_id, a_index));
            triangles[b_id as usize].add_neighbour(Neighbour::new(a_id, b_index));
        }

        debug!(
            "Creating navigation mesh consisting of {} triangles, {} portals and {} boundary sides",
            triangles.len(),
            links.len(),
            open_sides.len()
        );

        let index = RTree::bulk_load(
            triangles
                .iter()
                .enumerate()
                .map(|(index, triangle)| IndexedTriangle::new(index as u32, triangle))
                .collect(),
        );

        Self { triangles, index }
    }

    /// Returns number of triangles in the mesh.
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Returns all triangles ordered by their IDs.
    pub fn triangles(&self) -> &[MeshTriangle] {
        self.triangles.as_slice()
    }

    /// Returns a triangle by its ID or None if there is no such triangle.
    pub fn get(&self, triangle_id: u32) -> Option<&MeshTriangle> {
        self.triangles.get(triangle_id as usize)
    }

    /// Returns a triangle by its ID.
    ///
    /// # Panics
    ///
    /// Panics if there is no triangle with the ID.
    pub fn triangle(&self, triangle_id: u32) -> &MeshTriangle {
        &self.triangles[triangle_id as usize]
    }

    /// Returns the side shared by two triangles. Returns None if the
    /// triangles are not neighbours or any of them does not exist.
    pub fn portal(&self, from: u32, to: u32) -> Option<Edge> {
        self.get(from).and_then(|triangle| triangle.portal_to(to))
    }

    /// Returns ID of a triangle which contains the point (including its
    /// boundary). Returns None if the point lies outside of the mesh.
    ///
    /// Any of the candidate triangles is returned if the point lies on a side
    /// or a vertex shared by multiple triangles.
    pub fn locate(&self, point: Point) -> Option<u32> {
        self.index
            .locate_at_point(&[point.x, point.y])
            .map(|indexed| indexed.triangle_id)
    }
}

/// A neighbouring triangle, see [`MeshTriangle::neighbours`].
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Neighbour {
    triangle_id: u32,
    edge_index: u8,
}

impl Neighbour {
    fn new(triangle_id: u32, edge_index: u8) -> Self {
        Self {
            triangle_id,
            edge_index,
        }
    }

    /// ID of the neighbouring triangle.
    pub fn triangle_id(&self) -> u32 {
        self.triangle_id
    }

    /// Index of the shared side in [`MeshTriangle::edges`] of the triangle
    /// which owns this neighbour.
    pub fn edge_index(&self) -> usize {
        self.edge_index as usize
    }
}

/// A triangle used for spatial indexing of the mesh.
struct IndexedTriangle {
    triangle_id: u32,
    triangle: MeshTriangle,
}

impl IndexedTriangle {
    fn new(triangle_id: u32, triangle: &MeshTriangle) -> Self {
        Self {
            triangle_id,
            triangle: MeshTriangle::new(*triangle.triangle()),
        }
    }
}

impl RTreeObject for IndexedTriangle {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        let aabb = self.triangle.triangle().local_aabb();
        AABB::from_corners([aabb.mins.x, aabb.mins.y], [aabb.maxs.x, aabb.maxs.y])
    }
}

impl PointDistance for IndexedTriangle {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let point = Point::from_slice(point);
        if self.triangle.contains(point) {
            0.
        } else {
            let proj = self.triangle.triangle().project_local_point(&point, true);
            na::distance_squared(&point, &proj.point)
        }
    }

    fn contains_point(&self, point: &[f32; 2]) -> bool {
        self.triangle.contains(Point::from_slice(point))
    }
}

//! This module contains the path finder: point location, corridor search and
//! path smoothing glued together.

use tn_geom::Point;
use tn_mesh::NavMesh;
use tracing::{debug, info};

use crate::{
    corridor::Corridor, errors::log_full_error, path::Path, request::PathRequest,
};

/// A graph search selecting triangles a path goes through.
pub trait CorridorSearch {
    /// Returns a chain of adjacent triangles ordered from the triangle
    /// containing `start` (`from`) to the triangle containing `end` (`to`).
    /// Returns None if `to` is not reachable from `from`.
    ///
    /// Each consecutive pair of the returned triangles must share a side.
    fn search(
        &self,
        mesh: &NavMesh,
        from: u32,
        to: u32,
        start: Point,
        end: Point,
    ) -> Option<Vec<u32>>;
}

/// A struct used for path finding over a navigation mesh.
pub struct PathFinder<S> {
    mesh: NavMesh,
    search: S,
    midpoint_threshold: f32,
}

impl<S: CorridorSearch> PathFinder<S> {
    /// # Arguments
    ///
    /// * `mesh` - navigation mesh of the walkable area.
    ///
    /// * `search` - graph search over the mesh triangles.
    ///
    /// * `midpoint_threshold` - see [`PathRequest::new`].
    pub fn new(mesh: NavMesh, search: S, midpoint_threshold: f32) -> Self {
        Self {
            mesh,
            search,
            midpoint_threshold,
        }
    }

    pub fn mesh(&self) -> &NavMesh {
        &self.mesh
    }

    /// Returns a shortest path between two points.
    ///
    /// Returns `None` if any of the points lies outside of the mesh or if
    /// there is no path between the two points.
    pub fn find_path(&self, from: Point, to: Point) -> Option<Path> {
        info!("Finding path from {:?} to {:?}", from, to);

        let Some(source) = self.mesh.locate(from) else {
            debug!("Path start {:?} is outside of the mesh", from);
            return None;
        };
        let Some(target) = self.mesh.locate(to) else {
            debug!("Path target {:?} is outside of the mesh", to);
            return None;
        };

        if source == target {
            // Trivial case, both points are in the same triangle.
            debug!("Trivial path from {:?} to {:?} found", from, to);
            return Some(Path::straight(from, to));
        }

        let Some(chain) = self.search.search(&self.mesh, source, target, from, to) else {
            debug!("No path from {:?} to {:?} found", from, to);
            return None;
        };

        let request = Corridor::origin_first(chain).and_then(|corridor| {
            PathRequest::new(&self.mesh, &corridor, from, to, self.midpoint_threshold)
        });
        match request {
            Ok(request) => Some(request.into_path()),
            Err(err) => {
                log_full_error!(err, "Invalid corridor from {:?} to {:?}", from, to);
                None
            }
        }
    }
}

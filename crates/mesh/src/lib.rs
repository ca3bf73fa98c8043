#![allow(rustdoc::private_intra_doc_links)]
//! This library turns boundary and hole edges of tile world regions into
//! navigation meshes.
//!
//! * Tile space edges are scaled to world space and their end points are
//!   deduplicated. See [`VertexSet`].
//!
//! * All edges are used as constraints of a Constrained Delaunay
//!   triangulation (CDT). Faces are kept or dropped based on the number of
//!   region boundaries which separate them from the outside of the
//!   triangulation. See [`TriangulationBuilder`].
//!
//! * The resulting triangles are connected to their neighbours over shared
//!   edges (portals) in [`NavMesh`].

mod input;
mod navmesh;
mod options;
mod triangle;
mod triangulation;
mod vertices;

pub use input::{EdgeGroup, RegionEdges, TileEdge, TileScale};
pub use navmesh::{NavMesh, Neighbour};
pub use options::{GenerationOptions, Refinement};
pub use triangle::MeshTriangle;
pub use triangulation::{triangulate, TriangulationBuilder, TriangulationError};
pub use vertices::VertexSet;

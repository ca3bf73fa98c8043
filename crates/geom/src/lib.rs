//! This crate implements geometry primitives used by mesh generation and path
//! smoothing: points, undirected edges and orientation predicates.
//!
//! All coordinates are world space and follow the tile world convention: the
//! x axis points to the right and the y axis points down.

mod edge;
mod key;
mod side;

pub use edge::Edge;
pub use key::PointKey;
pub use side::{orient, which_side, Side};

/// A 2D point in world coordinates.
pub type Point = parry2d::math::Point<f32>;

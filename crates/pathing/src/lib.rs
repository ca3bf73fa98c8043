#![allow(rustdoc::private_intra_doc_links)]
//! This library computes smooth paths over a navigation mesh.
//!
//! A path request starts with a chain of adjacent triangles (a corridor)
//! selected by a graph search. Shared sides of consecutive triangles
//! (portals) are extracted from the mesh, see [`extract_portals`], and the
//! shortest path through the portals is found with the funnel (string
//! pulling) algorithm, see [`Funnel`].

mod corridor;
mod errors;
mod finder;
mod funnel;
mod path;
mod request;

pub use corridor::{extract_portals, Corridor, CorridorError};
pub use finder::{CorridorSearch, PathFinder};
pub use funnel::Funnel;
pub use path::Path;
pub use request::PathRequest;

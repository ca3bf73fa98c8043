//! Tile space input of the triangulation.

use serde::Deserialize;
use tn_geom::Point;

/// A boundary edge in tile coordinates, as produced by hull extraction.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TileEdge {
    start: [f32; 2],
    end: [f32; 2],
}

impl TileEdge {
    pub fn new(start: [f32; 2], end: [f32; 2]) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> [f32; 2] {
        self.start
    }

    pub fn end(&self) -> [f32; 2] {
        self.end
    }
}

/// Role of an edge group within a triangulated region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeGroup {
    /// Edges of the enclosing region. These keep vertices shared with the
    /// parent triangulation but do not delimit the walkable area.
    Parent,
    /// Edges of obstacles (holes) inside the region.
    Child,
    /// Outer boundary of the region itself.
    Own,
}

impl EdgeGroup {
    /// Returns true if crossing an edge of this group enters or leaves the
    /// walkable area.
    pub(crate) fn is_boundary(self) -> bool {
        !matches!(self, Self::Parent)
    }
}

/// All edge groups of a single region. Edges are closed, non-self-intersecting
/// loops in tile coordinates.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct RegionEdges {
    #[serde(default)]
    own: Vec<TileEdge>,
    #[serde(default)]
    parent: Vec<TileEdge>,
    #[serde(default)]
    children: Vec<TileEdge>,
}

impl RegionEdges {
    pub fn new(own: Vec<TileEdge>, parent: Vec<TileEdge>, children: Vec<TileEdge>) -> Self {
        Self {
            own,
            parent,
            children,
        }
    }

    /// Returns a region delimited by a closed polygon given by its tile space
    /// vertices.
    pub fn from_loop(points: &[[f32; 2]]) -> Self {
        Self::new(loop_edges(points), Vec::new(), Vec::new())
    }

    /// Adds an obstacle given by its tile space vertices.
    pub fn with_hole(mut self, points: &[[f32; 2]]) -> Self {
        self.children.extend(loop_edges(points));
        self
    }

    /// Returns all edge groups in triangulation order: parent edges, child
    /// edges and finally the region's own edges.
    pub fn groups(&self) -> [(EdgeGroup, &[TileEdge]); 3] {
        [
            (EdgeGroup::Parent, self.parent.as_slice()),
            (EdgeGroup::Child, self.children.as_slice()),
            (EdgeGroup::Own, self.own.as_slice()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.own.is_empty() && self.parent.is_empty() && self.children.is_empty()
    }
}

fn loop_edges(points: &[[f32; 2]]) -> Vec<TileEdge> {
    (0..points.len())
        .map(|i| TileEdge::new(points[i], points[(i + 1).rem_euclid(points.len())]))
        .collect()
}

/// Size of a single tile in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileScale {
    width: f32,
    height: f32,
}

impl TileScale {
    /// # Panics
    ///
    /// Panics if `width` or `height` is not a finite positive number.
    pub fn new(width: f32, height: f32) -> Self {
        assert!(width.is_finite() && width > 0., "Invalid tile width: {width}");
        assert!(
            height.is_finite() && height > 0.,
            "Invalid tile height: {height}"
        );
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Converts a tile space point to world space.
    pub fn to_world(&self, tile: [f32; 2]) -> Point {
        Point::new(tile[0] * self.width, tile[1] * self.height)
    }
}

impl Default for TileScale {
    fn default() -> Self {
        Self::new(1., 1.)
    }
}

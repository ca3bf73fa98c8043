//! This module implements Constrained Delaunay triangulation (CDT) based
//! triangulation of walkable areas of tile world regions.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use parry2d::shape::Triangle;
use spade::{
    handles::{FixedFaceHandle, FixedVertexHandle, InnerTag},
    AngleLimit, ConstrainedDelaunayTriangulation, InsertionError, Point2, RefinementParameters,
    Triangulation,
};
use thiserror::Error;
use tn_geom::Point;
use tracing::{debug, warn};

use crate::{
    input::{EdgeGroup, RegionEdges, TileEdge, TileScale},
    options::GenerationOptions,
    triangle::MeshTriangle,
    vertices::VertexSet,
};

type Cdt = ConstrainedDelaunayTriangulation<Point2<f64>>;
type FaceId = FixedFaceHandle<InnerTag>;

/// Returns a triangulation of a region.
///
/// Edges are added in the fixed order parent edges, child (hole) edges and
/// the region's own edges. A region which cannot be triangulated (for example
/// a region with crossing edges or without any enclosed area) results in an
/// empty triangle list.
pub fn triangulate(
    region: &RegionEdges,
    scale: TileScale,
    options: &GenerationOptions,
) -> Vec<MeshTriangle> {
    let mut builder = TriangulationBuilder::new(scale, options.clone());
    for (group, edges) in region.groups() {
        builder.add_edges(group, edges);
    }
    builder.build()
}

/// Incremental builder of a region triangulation.
///
/// The builder accumulates deduplicated world space vertices and constraint
/// edges between them. The triangulation itself is computed by
/// [`Self::build`] or [`Self::try_build`].
pub struct TriangulationBuilder {
    scale: TileScale,
    options: GenerationOptions,
    vertices: VertexSet,
    constraints: Vec<Constraint>,
}

impl TriangulationBuilder {
    pub fn new(scale: TileScale, options: GenerationOptions) -> Self {
        Self {
            scale,
            options,
            vertices: VertexSet::new(),
            constraints: Vec::new(),
        }
    }

    /// Scales a tile space point to world space and adds it to the vertex
    /// set. Returns index of the vertex.
    pub fn add_vertex(&mut self, tile: [f32; 2]) -> usize {
        self.vertices.add(self.scale.to_world(tile))
    }

    /// Adds end points of all edges to the vertex set and records the edges
    /// as constraints.
    pub fn add_edges(&mut self, group: EdgeGroup, edges: &[TileEdge]) {
        for edge in edges {
            let a = self.add_vertex(edge.start());
            let b = self.add_vertex(edge.end());
            self.constraints.push(Constraint { a, b, group });
        }
    }

    pub fn vertices(&self) -> &VertexSet {
        &self.vertices
    }

    /// Returns constraint edges as pairs of vertex indices, in insertion
    /// order.
    pub fn constraints(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.constraints.iter().map(|c| (c.a, c.b))
    }

    /// Computes the triangulation. Returns an empty list if the input cannot
    /// be triangulated. See [`Self::try_build`].
    pub fn build(&self) -> Vec<MeshTriangle> {
        match self.try_build() {
            Ok(triangles) => triangles,
            Err(error) => {
                warn!("Triangulation failed, using an empty mesh: {error}");
                Vec::new()
            }
        }
    }

    /// Computes the triangulation.
    ///
    /// The returned triangles:
    ///
    ///  * do not intersect each other,
    ///
    ///  * have all their sides either equal to (parts of) constraint edges or
    ///    Delaunay legal,
    ///
    ///  * cover exactly the faces selected by [`GenerationOptions`]. With
    ///    default options that is the area inside the region's own boundary
    ///    minus the areas of its holes.
    pub fn try_build(&self) -> Result<Vec<MeshTriangle>, TriangulationError> {
        if self.vertices.len() < 3 {
            return Ok(Vec::new());
        }

        let mut cdt = Cdt::new();
        let mut handles = Vec::with_capacity(self.vertices.len());
        for &point in self.vertices.points() {
            let handle = cdt
                .insert(Point2::new(point.x as f64, point.y as f64))
                .map_err(|reason| TriangulationError::InvalidVertex { point, reason })?;
            handles.push(handle);
        }
        if cdt.all_vertices_on_line() {
            debug!("All {} vertices are collinear, nothing to triangulate", handles.len());
            return Ok(Vec::new());
        }

        for constraint in &self.constraints {
            if constraint.a == constraint.b {
                continue;
            }

            let (from, to) = (handles[constraint.a], handles[constraint.b]);
            if let Some(edge) = cdt.get_edge_from_neighbors(from, to) {
                if cdt.is_constraint_edge(edge.as_undirected().fix()) {
                    continue;
                }
            }

            if !cdt.can_add_constraint(from, to) {
                let points = self.vertices.points();
                return Err(TriangulationError::CrossingConstraint {
                    a: points[constraint.a],
                    b: points[constraint.b],
                });
            }
            cdt.add_constraint(from, to);
        }

        if let Some(refinement) = self.options.refinement() {
            let mut parameters = RefinementParameters::<f64>::new().keep_constraint_edges();
            if let Some(degrees) = refinement.min_angle_deg() {
                parameters = parameters.with_angle_limit(AngleLimit::from_deg(degrees as f64));
            }
            if let Some(area) = refinement.max_area() {
                parameters = parameters.with_max_allowed_area(area as f64);
            }
            if let Some(count) = refinement.max_additional_vertices() {
                parameters = parameters.with_max_additional_vertices(count);
            }

            let result = cdt.refine(parameters);
            if !result.refinement_complete {
                debug!("Triangulation refinement stopped at the vertex limit");
            }
        }

        let depths = self.face_depths(&cdt, &handles);
        let triangles: Vec<MeshTriangle> = cdt
            .inner_faces()
            .filter(|face| {
                depths
                    .get(&face.fix())
                    .map_or(false, |&depth| self.options.keeps_depth(depth))
            })
            .map(|face| {
                let [a, b, c] = face.vertices().map(|vertex| {
                    let position = vertex.position();
                    Point::new(position.x as f32, position.y as f32)
                });
                MeshTriangle::new(Triangle::new(a, b, c))
            })
            .collect();

        debug!(
            "Triangulated {} vertices and {} constraint edges into {} triangles",
            cdt.num_vertices(),
            cdt.num_constraints(),
            triangles.len(),
        );

        Ok(triangles)
    }

    /// Returns depth of every inner face of the triangulation. Depth is the
    /// minimum number of boundary constraint edges which need to be crossed
    /// to reach the face from the outer face.
    fn face_depths(&self, cdt: &Cdt, handles: &[FixedVertexHandle]) -> AHashMap<FaceId, u32> {
        let boundary = BoundaryEdges::new(cdt, handles, &self.constraints);

        let mut links: AHashMap<FaceId, [(Option<FaceId>, bool); 3]> =
            AHashMap::with_capacity(cdt.num_inner_faces());
        for face in cdt.inner_faces() {
            let face_links = face.adjacent_edges().map(|edge| {
                let is_boundary = cdt.is_constraint_edge(edge.as_undirected().fix()) && {
                    let [from, to] = edge.vertices();
                    boundary.covers(
                        (from.fix().index(), from.position()),
                        (to.fix().index(), to.position()),
                    )
                };
                (edge.rev().face().as_inner().map(|f| f.fix()), is_boundary)
            });
            links.insert(face.fix(), face_links);
        }

        // 0-1 BFS: crossing a boundary costs 1, other sides are free.
        let mut queue: VecDeque<(FaceId, u32)> = VecDeque::new();
        for (&face, face_links) in &links {
            for &(neighbour, is_boundary) in face_links {
                if neighbour.is_none() {
                    if is_boundary {
                        queue.push_back((face, 1));
                    } else {
                        queue.push_front((face, 0));
                    }
                }
            }
        }

        let mut depths = AHashMap::with_capacity(links.len());
        while let Some((face, depth)) = queue.pop_front() {
            if depths.contains_key(&face) {
                continue;
            }
            depths.insert(face, depth);

            for &(neighbour, is_boundary) in &links[&face] {
                let Some(neighbour) = neighbour else {
                    continue;
                };
                if depths.contains_key(&neighbour) {
                    continue;
                }
                if is_boundary {
                    queue.push_back((neighbour, depth + 1));
                } else {
                    queue.push_front((neighbour, depth));
                }
            }
        }

        depths
    }
}

/// Region boundary (own and child) constraints of a triangulation.
///
/// The triangulation splits constraints at vertices lying on them, thus a
/// triangulation constraint edge is a boundary if it lies on any boundary
/// constraint. All other constraint edges (parent edges and their parts) do
/// not delimit the walkable area.
struct BoundaryEdges {
    keys: AHashSet<(usize, usize)>,
    segments: Vec<[Point2<f64>; 2]>,
}

impl BoundaryEdges {
    fn new(cdt: &Cdt, handles: &[FixedVertexHandle], constraints: &[Constraint]) -> Self {
        let mut keys = AHashSet::new();
        let mut segments = Vec::new();
        for constraint in constraints.iter().filter(|c| c.group.is_boundary()) {
            let (a, b) = (handles[constraint.a], handles[constraint.b]);
            if keys.insert(edge_key(a.index(), b.index())) {
                segments.push([cdt.vertex(a).position(), cdt.vertex(b).position()]);
            }
        }
        Self { keys, segments }
    }

    /// Returns true if an edge given by its end points (vertex index and
    /// position) lies on a boundary constraint.
    fn covers(&self, from: (usize, Point2<f64>), to: (usize, Point2<f64>)) -> bool {
        self.keys.contains(&edge_key(from.0, to.0))
            || self
                .segments
                .iter()
                .any(|&[a, b]| on_segment(a, b, from.1) && on_segment(a, b, to.1))
    }
}

/// Returns true if `point` lies on line segment `a` -> `b`.
fn on_segment(a: Point2<f64>, b: Point2<f64>, point: Point2<f64>) -> bool {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let (px, py) = (point.x - a.x, point.y - a.y);
    let cross = dx * py - dy * px;
    let scale = (dx * dx + dy * dy).sqrt() * (px * px + py * py).sqrt();
    cross.abs() <= 1e-9 * scale
        && point.x >= a.x.min(b.x)
        && point.x <= a.x.max(b.x)
        && point.y >= a.y.min(b.y)
        && point.y <= a.y.max(b.y)
}

fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// An edge which must be preserved as a triangle side.
struct Constraint {
    a: usize,
    b: usize,
    group: EdgeGroup,
}

#[derive(Error, Debug)]
pub enum TriangulationError {
    #[error("vertex {point:?} cannot be triangulated: {reason:?}")]
    InvalidVertex { point: Point, reason: InsertionError },
    #[error("constraint edge {a:?} -> {b:?} crosses another constraint edge")]
    CrossingConstraint { a: Point, b: Point },
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn area(triangles: &[MeshTriangle]) -> f32 {
        triangles.iter().map(|t| t.area()).sum()
    }

    #[test]
    fn test_square() {
        let region = RegionEdges::from_loop(&[[0., 0.], [2., 0.], [2., 2.], [0., 2.]]);
        let triangles = triangulate(&region, TileScale::new(5., 5.), &Default::default());

        assert_eq!(triangles.len(), 2);
        assert_abs_diff_eq!(area(&triangles), 100., epsilon = 0.001);
        for triangle in &triangles {
            for vertex in triangle.vertices() {
                assert!(vertex.x == 0. || vertex.x == 10.);
                assert!(vertex.y == 0. || vertex.y == 10.);
            }
        }
    }

    #[test]
    fn test_concave() {
        // L shaped region: the concave part must not be covered.
        let region = RegionEdges::from_loop(&[
            [0., 0.],
            [4., 0.],
            [4., 2.],
            [2., 2.],
            [2., 4.],
            [0., 4.],
        ]);
        let triangles = triangulate(&region, TileScale::default(), &Default::default());
        assert_eq!(triangles.len(), 4);
        assert_abs_diff_eq!(area(&triangles), 12., epsilon = 0.001);
        assert!(triangles
            .iter()
            .all(|t| !(t.centroid().x > 2. && t.centroid().y > 2.)));
    }

    #[test]
    fn test_hole() {
        let region = RegionEdges::from_loop(&[[0., 0.], [10., 0.], [10., 10.], [0., 10.]])
            .with_hole(&[[4., 4.], [6., 4.], [6., 6.], [4., 6.]]);
        let triangles = triangulate(&region, TileScale::default(), &Default::default());

        assert_abs_diff_eq!(area(&triangles), 96., epsilon = 0.001);
        // 8 vertices, 2 boundary loops (Euler characteristic 0).
        assert_eq!(triangles.len(), 8);
        assert!(triangles
            .iter()
            .all(|t| !t.contains(Point::new(5., 5.))));

        let holes = triangulate(
            &region,
            TileScale::default(),
            &GenerationOptions::new(false, true),
        );
        // The hole only, the convex hull of the region has no outside part.
        assert_abs_diff_eq!(area(&holes), 4., epsilon = 0.001);

        let everything = triangulate(
            &region,
            TileScale::default(),
            &GenerationOptions::new(true, true),
        );
        assert_abs_diff_eq!(area(&everything), 100., epsilon = 0.001);
    }

    #[test]
    fn test_parent_edges() {
        // The parent region encloses the region. Its edges are constraints but
        // do not flip the inside / outside classification.
        let parent = RegionEdges::from_loop(&[[-2., -2.], [6., -2.], [6., 6.], [-2., 6.]]);
        let own = RegionEdges::from_loop(&[[0., 0.], [4., 0.], [4., 4.], [0., 4.]]);
        let region = RegionEdges::new(
            own.groups()[2].1.to_vec(),
            parent.groups()[2].1.to_vec(),
            Vec::new(),
        );

        let triangles = triangulate(&region, TileScale::default(), &Default::default());
        assert_abs_diff_eq!(area(&triangles), 16., epsilon = 0.001);

        let outside = triangulate(
            &region,
            TileScale::default(),
            &GenerationOptions::new(false, true),
        );
        assert_abs_diff_eq!(area(&outside), 64. - 16., epsilon = 0.001);
    }

    #[test]
    fn test_parent_edges_through_vertices() {
        // Sides of the parent square pass through vertices of the region.
        let parent = RegionEdges::from_loop(&[[0., 0.], [8., 0.], [8., 8.], [0., 8.]]);
        let own = RegionEdges::from_loop(&[[4., 0.], [8., 4.], [4., 8.], [0., 4.]]);
        let region = RegionEdges::new(
            own.groups()[2].1.to_vec(),
            parent.groups()[2].1.to_vec(),
            Vec::new(),
        );

        let triangles = triangulate(&region, TileScale::default(), &Default::default());
        assert_abs_diff_eq!(area(&triangles), 32., epsilon = 0.001);
        assert!(triangles.iter().any(|t| t.contains(Point::new(4., 4.))));
        assert!(triangles.iter().all(|t| !t.contains(Point::new(1., 1.))));

        let outside = triangulate(
            &region,
            TileScale::default(),
            &GenerationOptions::new(false, true),
        );
        assert_abs_diff_eq!(area(&outside), 32., epsilon = 0.001);
        assert!(outside.iter().any(|t| t.contains(Point::new(1., 1.))));
        assert!(outside.iter().all(|t| !t.contains(Point::new(4., 4.))));
    }

    #[test]
    fn test_parent_edges_shared_border() {
        // The region is the left half of its parent, one parent side is split
        // into a shared part and a parent only part.
        let parent = RegionEdges::from_loop(&[[0., 0.], [8., 0.], [8., 8.], [0., 8.]]);
        let own = RegionEdges::from_loop(&[[0., 0.], [4., 0.], [4., 8.], [0., 8.]]);
        let region = RegionEdges::new(
            own.groups()[2].1.to_vec(),
            parent.groups()[2].1.to_vec(),
            Vec::new(),
        );

        let triangles = triangulate(&region, TileScale::default(), &Default::default());
        assert_abs_diff_eq!(area(&triangles), 32., epsilon = 0.001);
        assert!(triangles.iter().all(|t| t.centroid().x < 4.));
    }

    #[test]
    fn test_builder() {
        let mut builder = TriangulationBuilder::new(TileScale::new(2., 3.), Default::default());
        assert_eq!(builder.add_vertex([1., 1.]), 0);
        assert_eq!(builder.add_vertex([2., 1.]), 1);
        assert_eq!(builder.add_vertex([1., 1.]), 0);
        assert_eq!(builder.vertices().points()[1], Point::new(4., 3.));

        builder.add_edges(
            EdgeGroup::Own,
            &[
                TileEdge::new([1., 1.], [2., 1.]),
                TileEdge::new([2., 1.], [1., 2.]),
                TileEdge::new([1., 2.], [1., 1.]),
            ],
        );
        assert_eq!(
            builder.constraints().collect::<Vec<_>>(),
            vec![(0, 1), (1, 2), (2, 0)]
        );

        let triangles = builder.build();
        assert_eq!(triangles.len(), 1);
        assert_abs_diff_eq!(triangles[0].area(), 3., epsilon = 0.001);
    }

    #[test]
    fn test_degenerate() {
        let options = GenerationOptions::default();

        assert!(triangulate(&RegionEdges::default(), TileScale::default(), &options).is_empty());

        let collinear = RegionEdges::from_loop(&[[0., 0.], [1., 0.], [2., 0.]]);
        assert!(triangulate(&collinear, TileScale::default(), &options).is_empty());

        let single = RegionEdges::new(vec![TileEdge::new([0., 0.], [1., 1.])], vec![], vec![]);
        assert!(triangulate(&single, TileScale::default(), &options).is_empty());
    }

    #[test]
    fn test_crossing_constraints() {
        let region = RegionEdges::new(
            vec![
                TileEdge::new([0., 0.], [2., 2.]),
                TileEdge::new([0., 2.], [2., 0.]),
            ],
            Vec::new(),
            Vec::new(),
        );
        let mut builder = TriangulationBuilder::new(TileScale::default(), Default::default());
        for (group, edges) in region.groups() {
            builder.add_edges(group, edges);
        }
        assert!(matches!(
            builder.try_build(),
            Err(TriangulationError::CrossingConstraint { .. })
        ));
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_invalid_vertex() {
        let region = RegionEdges::from_loop(&[[0., 0.], [f32::NAN, 0.], [1., 1.]]);
        let mut builder = TriangulationBuilder::new(TileScale::default(), Default::default());
        for (group, edges) in region.groups() {
            builder.add_edges(group, edges);
        }
        assert!(matches!(
            builder.try_build(),
            Err(TriangulationError::InvalidVertex { .. })
        ));
    }

    #[test]
    fn test_refinement() {
        let region = RegionEdges::from_loop(&[[0., 0.], [10., 0.], [10., 10.], [0., 10.]]);
        let options = GenerationOptions::default().with_refinement(crate::Refinement::new(
            None,
            Some(5.),
            Some(1000),
        ));
        let triangles = triangulate(&region, TileScale::default(), &options);

        assert!(triangles.len() > 2);
        assert_abs_diff_eq!(area(&triangles), 100., epsilon = 0.01);
    }
}

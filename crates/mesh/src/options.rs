use serde::{Deserialize, Serialize};

/// Options of mesh generation.
///
/// Faces of the triangulation are classified by their depth, i.e. by the
/// number of region boundaries (own or child edges) a straight walk from the
/// outside of the triangulation crosses to reach them. Faces of odd depth are
/// inside the region, faces of even depth are either outside of it or inside
/// of a hole.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationOptions {
    interior: bool,
    exterior: bool,
    refinement: Option<Refinement>,
}

impl GenerationOptions {
    pub fn new(interior: bool, exterior: bool) -> Self {
        Self {
            interior,
            exterior,
            refinement: None,
        }
    }

    pub fn with_refinement(mut self, refinement: Refinement) -> Self {
        self.refinement = Some(refinement);
        self
    }

    /// Whether faces inside the region (and outside of its holes) are kept.
    pub fn interior(&self) -> bool {
        self.interior
    }

    /// Whether faces outside of the region or inside of its holes are kept.
    pub fn exterior(&self) -> bool {
        self.exterior
    }

    pub fn refinement(&self) -> Option<&Refinement> {
        self.refinement.as_ref()
    }

    pub(crate) fn keeps_depth(&self, depth: u32) -> bool {
        if depth % 2 == 1 {
            self.interior
        } else {
            self.exterior
        }
    }
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::new(true, false)
    }
}

/// Delaunay refinement of the triangulation. Refinement inserts additional
/// (Steiner) vertices but never splits constraint edges.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Refinement {
    min_angle_deg: Option<f32>,
    max_area: Option<f32>,
    max_additional_vertices: Option<usize>,
}

impl Refinement {
    pub fn new(
        min_angle_deg: Option<f32>,
        max_area: Option<f32>,
        max_additional_vertices: Option<usize>,
    ) -> Self {
        Self {
            min_angle_deg,
            max_area,
            max_additional_vertices,
        }
    }

    /// Minimum inner angle of refined triangles in degrees.
    pub fn min_angle_deg(&self) -> Option<f32> {
        self.min_angle_deg
    }

    /// Maximum area of refined triangles in square world units.
    pub fn max_area(&self) -> Option<f32> {
        self.max_area
    }

    /// Upper bound of the number of inserted vertices.
    pub fn max_additional_vertices(&self) -> Option<usize> {
        self.max_additional_vertices
    }
}

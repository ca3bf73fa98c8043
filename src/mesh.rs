use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tn_conf::Configuration;
use tn_mesh::NavMesh;

use crate::regions::{build_mesh, load_regions};

#[derive(Serialize)]
struct MeshOutput {
    region: usize,
    triangles: Vec<[[f32; 2]; 3]>,
    neighbours: Vec<Vec<u32>>,
}

impl MeshOutput {
    fn new(region: usize, mesh: &NavMesh) -> Self {
        Self {
            region,
            triangles: mesh
                .triangles()
                .iter()
                .map(|triangle| triangle.vertices().map(|p| [p.x, p.y]))
                .collect(),
            neighbours: mesh
                .triangles()
                .iter()
                .map(|triangle| {
                    triangle
                        .neighbours()
                        .iter()
                        .map(|n| n.triangle_id())
                        .collect()
                })
                .collect(),
        }
    }
}

/// Triangulates all regions of a file and returns their meshes serialized to
/// JSON. Each region is processed independently.
pub(crate) fn execute(conf: &Configuration, path: &Path) -> Result<String> {
    let output: Vec<MeshOutput> = load_regions(path)?
        .iter()
        .enumerate()
        .map(|(index, region)| MeshOutput::new(index, &build_mesh(conf, index, region)))
        .collect();
    serde_json::to_string(&output).context("Failed to serialize meshes")
}

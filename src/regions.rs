use std::{fs, path::Path};

use anyhow::{Context, Result};
use tn_conf::Configuration;
use tn_mesh::{triangulate, NavMesh, RegionEdges};
use tracing::{info, warn};

/// Loads all regions from a JSON file containing a list of region edges.
pub(crate) fn load_regions(path: &Path) -> Result<Vec<RegionEdges>> {
    info!("Loading regions from {}", path.to_string_lossy());
    let text = fs::read_to_string(path)
        .with_context(|| format!("Could not read regions file: {}", path.to_string_lossy()))?;
    serde_json::from_str(text.as_str()).context("Failed to parse regions")
}

/// Triangulates a region and creates its navigation mesh. A region which
/// cannot be triangulated results in an empty mesh.
pub(crate) fn build_mesh(conf: &Configuration, index: usize, region: &RegionEdges) -> NavMesh {
    let triangles = triangulate(region, conf.tiles().scale(), conf.generation());
    if triangles.is_empty() {
        warn!("Region {index} resulted in an empty navigation mesh");
    }
    NavMesh::new(triangles)
}

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tn_conf::Configuration;
use tn_geom::Point;
use tn_pathing::{Corridor, PathRequest};
use tracing::info;

use crate::regions::{build_mesh, load_regions};

#[derive(Serialize)]
struct PathOutput {
    length: f32,
    waypoints: Vec<[f32; 2]>,
}

/// Computes the path from `from` to `to` through a chain of triangles of the
/// `region`-th region and returns it serialized to JSON.
pub(crate) fn execute(
    conf: &Configuration,
    path: &Path,
    region: usize,
    chain: Vec<u32>,
    from: Point,
    to: Point,
) -> Result<String> {
    let regions = load_regions(path)?;
    let edges = regions.get(region).with_context(|| {
        format!(
            "Region {region} does not exist, the file contains {} regions",
            regions.len()
        )
    })?;
    let mesh = build_mesh(conf, region, edges);

    let corridor = Corridor::origin_first(chain).context("Invalid triangle chain")?;
    info!(
        "Smoothing path from {:?} to {:?} through {} triangles",
        from,
        to,
        corridor.len()
    );
    let request = PathRequest::new(
        &mesh,
        &corridor,
        from,
        to,
        conf.pathing().midpoint_threshold(),
    )
    .context("Invalid triangle chain")?;

    let path = request.into_path();
    let output = PathOutput {
        length: path.length(),
        waypoints: path.waypoints().iter().map(|p| [p.x, p.y]).collect(),
    };
    serde_json::to_string(&output).context("Failed to serialize path")
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tn_conf::load_conf;
use tn_geom::Point;
use tracing::info;

mod mesh;
mod path;
mod regions;

const CARGO_PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
const GIT_SHA: &str = env!("GIT_SHA");

#[derive(Parser)]
#[clap(author, version, about)]
struct Args {
    #[clap(
        short,
        long,
        value_parser,
        default_value = "tilenav.yaml",
        help = "Path of a YAML configuration file. Defaults are used if it does not exist."
    )]
    conf: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Triangulates all regions and prints their navigation meshes.
    Mesh {
        #[clap(short, long, value_parser, help = "Path of a JSON file with region edges.")]
        regions: PathBuf,
    },
    /// Finds a smoothed path through a chain of adjacent triangles of a
    /// single region mesh.
    Path {
        #[clap(short, long, value_parser, help = "Path of a JSON file with region edges.")]
        regions: PathBuf,
        #[clap(long, help = "Index of the region in the regions file.")]
        region: usize,
        #[clap(
            long,
            value_delimiter = ',',
            required = true,
            help = "Triangle IDs from the start triangle to the target triangle."
        )]
        chain: Vec<u32>,
        #[clap(long, value_parser = parse_point, allow_hyphen_values = true, help = "Start point as X,Y.")]
        from: Point,
        #[clap(long, value_parser = parse_point, allow_hyphen_values = true, help = "Target point as X,Y.")]
        to: Point,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let conf = load_conf(args.conf.as_path()).context("Configuration loading failed")?;
    let _guard = tn_log::init(conf.log()).context("Logging setup failed")?;
    info!("Starting tilenav {CARGO_PKG_VERSION} ({GIT_SHA})");

    let output = match args.command {
        Command::Mesh { regions } => mesh::execute(&conf, regions.as_path())?,
        Command::Path {
            regions,
            region,
            chain,
            from,
            to,
        } => path::execute(&conf, regions.as_path(), region, chain, from, to)?,
    };
    println!("{output}");

    Ok(())
}

fn parse_point(value: &str) -> Result<Point, String> {
    let Some((x, y)) = value.split_once(',') else {
        return Err(format!("expected X,Y, got `{value}`"));
    };
    let x: f32 = x.trim().parse().map_err(|err| format!("invalid X: {err}"))?;
    let y: f32 = y.trim().parse().map_err(|err| format!("invalid Y: {err}"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err(format!("coordinates must be finite, got `{value}`"));
    }
    Ok(Point::new(x, y))
}

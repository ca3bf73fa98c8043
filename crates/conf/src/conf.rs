//! This module implements final (i.e. parsed and validated) configuration
//! objects and their building from persistent configuration.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Error, Result};
use tn_mesh::{GenerationOptions, TileScale};
use tracing::Level;

use crate::persisted;

#[derive(Debug, Clone, Default)]
pub struct Configuration {
    tiles: TilesConf,
    generation: GenerationOptions,
    pathing: PathingConf,
    log: LogConf,
}

impl Configuration {
    pub fn tiles(&self) -> &TilesConf {
        &self.tiles
    }

    /// Options of navigation mesh generation.
    pub fn generation(&self) -> &GenerationOptions {
        &self.generation
    }

    pub fn pathing(&self) -> &PathingConf {
        &self.pathing
    }

    pub fn log(&self) -> &LogConf {
        &self.log
    }
}

impl TryFrom<persisted::Configuration> for Configuration {
    type Error = Error;

    fn try_from(conf: persisted::Configuration) -> Result<Self> {
        let generation = conf.generation.unwrap_or_default();
        if let Some(refinement) = generation.refinement() {
            if let Some(angle) = refinement.min_angle_deg() {
                ensure!(
                    angle.is_finite() && angle >= 0.,
                    "`generation.refinement.min_angle_deg` must be a non-negative number."
                );
            }
            if let Some(area) = refinement.max_area() {
                ensure!(
                    area.is_finite() && area > 0.,
                    "`generation.refinement.max_area` must be a positive number."
                );
            }
        }

        Ok(Self {
            tiles: TilesConf::try_from(conf.tiles.unwrap_or_default())
                .context("Invalid `tiles` configuration")?,
            generation,
            pathing: PathingConf::try_from(conf.pathing.unwrap_or_default())
                .context("Invalid `pathing` configuration")?,
            log: LogConf::try_from(conf.log.unwrap_or_default())
                .context("Invalid `log` configuration")?,
        })
    }
}

/// World size of a single tile.
#[derive(Debug, Clone)]
pub struct TilesConf {
    width: f32,
    height: f32,
}

impl TilesConf {
    /// World space width of a tile.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// World space height of a tile.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Tile to world coordinate conversion.
    pub fn scale(&self) -> TileScale {
        TileScale::new(self.width, self.height)
    }
}

impl Default for TilesConf {
    fn default() -> Self {
        Self {
            width: 1.,
            height: 1.,
        }
    }
}

impl TryFrom<persisted::Tiles> for TilesConf {
    type Error = Error;

    fn try_from(tiles: persisted::Tiles) -> Result<Self> {
        let default = Self::default();
        let width = tiles.width.unwrap_or(default.width);
        let height = tiles.height.unwrap_or(default.height);
        ensure!(
            width.is_finite() && width > 0.,
            "`width` must be a positive number."
        );
        ensure!(
            height.is_finite() && height > 0.,
            "`height` must be a positive number."
        );
        Ok(Self { width, height })
    }
}

#[derive(Debug, Clone)]
pub struct PathingConf {
    midpoint_threshold: f32,
}

impl PathingConf {
    /// Funnel portals shorter than this are replaced by their midpoints.
    pub fn midpoint_threshold(&self) -> f32 {
        self.midpoint_threshold
    }
}

impl Default for PathingConf {
    fn default() -> Self {
        Self {
            midpoint_threshold: 0.,
        }
    }
}

impl TryFrom<persisted::Pathing> for PathingConf {
    type Error = Error;

    fn try_from(pathing: persisted::Pathing) -> Result<Self> {
        let midpoint_threshold = pathing
            .midpoint_threshold
            .unwrap_or(Self::default().midpoint_threshold);
        ensure!(
            midpoint_threshold.is_finite() && midpoint_threshold >= 0.,
            "`midpoint_threshold` must be a non-negative number."
        );
        Ok(Self { midpoint_threshold })
    }
}

#[derive(Debug, Clone)]
pub struct LogConf {
    level: Level,
    directory: Option<PathBuf>,
}

impl LogConf {
    pub fn new(level: Level, directory: Option<PathBuf>) -> Self {
        Self { level, directory }
    }

    /// Default maximum level of logged events. It is overridden by
    /// `RUST_LOG` environment variable.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Directory of log files. Logs are written to standard output only if
    /// this is None.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }
}

impl Default for LogConf {
    fn default() -> Self {
        Self::new(Level::INFO, None)
    }
}

impl TryFrom<persisted::Log> for LogConf {
    type Error = Error;

    fn try_from(log: persisted::Log) -> Result<Self> {
        let level = match log.level {
            Some(level) => level
                .parse()
                .with_context(|| format!("Invalid log level `{level}`"))?,
            None => Level::INFO,
        };
        Ok(Self::new(level, log.directory))
    }
}

//! This module contains configuration object which can be (de)serialized from
//! a configuration file. It does not contain final configuration object which
//! must be build and validated from the objects here.

use std::path::PathBuf;

use serde::Deserialize;
use tn_mesh::GenerationOptions;

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct Configuration {
    pub(super) tiles: Option<Tiles>,
    pub(super) generation: Option<GenerationOptions>,
    pub(super) pathing: Option<Pathing>,
    pub(super) log: Option<Log>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct Tiles {
    pub(super) width: Option<f32>,
    pub(super) height: Option<f32>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct Pathing {
    pub(super) midpoint_threshold: Option<f32>,
}

#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(super) struct Log {
    pub(super) level: Option<String>,
    pub(super) directory: Option<PathBuf>,
}

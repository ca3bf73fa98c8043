use std::{fs, path::Path};

use anyhow::{Context, Result};
use tracing::info;

use crate::{conf, persisted};

/// Loads and validates configuration from a YAML file. Default configuration
/// is returned if the file does not exist.
pub fn load_conf(path: &Path) -> Result<conf::Configuration> {
    match load_conf_text(path)? {
        Some(text) => {
            let persistent: persisted::Configuration =
                serde_yaml::from_str(text.as_str()).context("Failed to parse configuration")?;
            conf::Configuration::try_from(persistent)
        }
        None => Ok(conf::Configuration::default()),
    }
}

/// Loads configuration file to a string. Returns Ok(None) if the configuration
/// file does not exist.
fn load_conf_text(path: &Path) -> Result<Option<String>> {
    if path.is_file() {
        info!("Loading configuration from {}", path.to_string_lossy());
        fs::read_to_string(path).map(Some).with_context(|| {
            format!(
                "Could not load configuration file: {}",
                path.to_string_lossy(),
            )
        })
    } else {
        info!(
            "Configuration does not exist or is not a file, using defaults: {}",
            path.to_string_lossy()
        );
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tracing::Level;

    use super::*;

    #[test]
    fn test_load_conf() {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests");
        path.push("conf.yaml");
        let conf = load_conf(path.as_path()).unwrap();

        assert_eq!(conf.tiles().width(), 2.5);
        assert_eq!(conf.tiles().height(), 2.);
        assert!(conf.generation().interior());
        assert!(!conf.generation().exterior());
        assert_eq!(
            conf.generation().refinement().unwrap().min_angle_deg(),
            Some(20.)
        );
        assert_eq!(conf.pathing().midpoint_threshold(), 0.25);
        assert_eq!(conf.log().level(), Level::DEBUG);
        assert_eq!(conf.log().directory(), Some(Path::new("logs")));
    }

    #[test]
    fn test_missing() {
        let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        path.push("tests");
        path.push("missing.yaml");
        let conf = load_conf(path.as_path()).unwrap();
        assert_eq!(conf.tiles().width(), 1.);
        assert_eq!(conf.pathing().midpoint_threshold(), 0.);
    }

    #[test]
    fn test_unknown_key() {
        let text = "pathing:\n  midpoint: 1.0\n";
        assert!(serde_yaml::from_str::<persisted::Configuration>(text).is_err());
    }
}

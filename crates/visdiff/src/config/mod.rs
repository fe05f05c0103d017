pub mod resolve;
pub mod template;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub use self::resolve::{CliOverrides, ResolvedCompareConfig};
pub use self::template::{config_file_exists, write_template};

use crate::compare::CompareOptions;

pub(crate) const CONFIG_DIR: &str = ".visdiff";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Maximum allowed mismatch ratio (0.0-1.0). Comparisons with a ratio
    /// at or under the threshold pass.
    #[serde(default)]
    pub threshold: f64,
}

pub fn validate_threshold(v: f64) -> Result<f64, String> {
    if !(0.0..=1.0).contains(&v) {
        return Err(format!("threshold must be between 0.0 and 1.0, got {v}"));
    }
    Ok(v)
}

pub fn validate_transparency(v: f32) -> Result<f32, String> {
    if !(0.0..=1.0).contains(&v) {
        return Err(format!(
            "pixel_transparency must be between 0.0 and 1.0, got {v}"
        ));
    }
    Ok(v)
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub diff: DiffConfig,
    #[serde(default)]
    pub compare: CompareOptions,
}

impl Config {
    /// Validate semantic constraints that serde cannot express.
    fn validate(&self) -> Result<()> {
        validate_threshold(self.diff.threshold).map_err(|e| anyhow::anyhow!("diff.{e}"))?;
        validate_transparency(self.compare.pixel_transparency)
            .map_err(|e| anyhow::anyhow!("compare.{e}"))?;
        Ok(())
    }
}

pub fn default_path() -> PathBuf {
    Path::new(CONFIG_DIR).join(CONFIG_FILE)
}

/// Load a config file. `None` when no path was given and the default file
/// does not exist; an explicitly named file must exist and parse.
pub fn load(path: Option<&Path>) -> Result<Option<Config>> {
    let (path, required) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (default_path(), false),
    };
    if !required && !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    config.validate()?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::render::ErrorPixelMode;

    #[test]
    fn threshold_bounds() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(1.0).is_ok());
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(1.5).is_err());
    }

    #[test]
    fn full_config_parses() {
        let config: Config = toml::from_str(
            r#"
            [diff]
            threshold = 0.01

            [compare]
            ignore_antialiasing = true
            error_type = "movement"
            large_image_threshold = 0

            [compare.error_pixel_color]
            red = 0
            green = 128
            blue = 255
            alpha = 255

            [compare.tolerance]
            red = 8
            min_brightness = 24
            "#,
        )
        .unwrap();

        assert_eq!(config.diff.threshold, 0.01);
        assert!(config.compare.ignore_antialiasing);
        assert_eq!(config.compare.error_type, ErrorPixelMode::Movement);
        assert_eq!(config.compare.large_image_threshold, 0);
        assert_eq!(config.compare.error_pixel_color.green, 128);
        assert_eq!(config.compare.tolerance.red, Some(8));
        assert_eq!(config.compare.tolerance.green, None);
        assert_eq!(config.compare.tolerance.min_brightness, Some(24));
    }

    #[test]
    fn unknown_error_type_is_rejected() {
        let err = toml::from_str::<Config>(
            r#"
            [compare]
            error_type = "sparkle"
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("sparkle"));
    }

    #[test]
    fn load_validates_semantic_constraints() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[diff]\nthreshold = 2.0\n").unwrap();
        let err = load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("threshold"));
    }

    #[test]
    fn load_requires_an_explicit_path_to_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(load(Some(&path)).is_err());
    }
}

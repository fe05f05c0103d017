use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{load, validate_threshold, validate_transparency};
use crate::compare::CompareOptions;
use crate::compare::render::{ErrorPixelColor, ErrorPixelMode};
use crate::compare::tolerance::ToleranceOverrides;

/// Values extracted from the CLI that participate in the merge.
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub threshold: Option<f64>,
    pub ignore_antialiasing: bool,
    pub ignore_colors: bool,
    pub ignore_nothing: bool,
    pub error_type: Option<ErrorPixelMode>,
    pub error_color: Option<ErrorPixelColor>,
    pub pixel_transparency: Option<f32>,
    pub large_image_threshold: Option<u32>,
    pub generate_diff_image: bool,
    pub tolerance: ToleranceOverrides,
}

/// Fully resolved settings after CLI > env > file > defaults merge.
#[derive(Debug)]
pub struct ResolvedCompareConfig {
    pub threshold: f64,
    pub options: CompareOptions,
}

impl ResolvedCompareConfig {
    pub fn new(cli: CliOverrides) -> Result<Self> {
        // 1. File layer (optional unless named explicitly)
        let (file_threshold, mut options) = match load(cli.config.as_deref())? {
            Some(config) => (config.diff.threshold, config.compare),
            None => (0.0, CompareOptions::default()),
        };

        // 2. Env layer
        let env_threshold: Option<f64> = std::env::var("VISDIFF_THRESHOLD")
            .ok()
            .map(|v| v.parse::<f64>())
            .transpose()
            .context("VISDIFF_THRESHOLD must be a valid float")?;

        // 3. CLI > env > file (highest priority first)
        let threshold = cli.threshold.or(env_threshold).unwrap_or(file_threshold);
        validate_threshold(threshold).map_err(|e| anyhow::anyhow!("{e}"))?;

        // 4. Overlay CLI options; boolean flags only ever switch modes on
        options.ignore_antialiasing |= cli.ignore_antialiasing;
        options.ignore_colors |= cli.ignore_colors;
        options.ignore_nothing |= cli.ignore_nothing;
        options.generate_diff_image |= cli.generate_diff_image;
        if let Some(v) = cli.error_type {
            options.error_type = v;
        }
        if let Some(v) = cli.error_color {
            options.error_pixel_color = v;
        }
        if let Some(v) = cli.pixel_transparency {
            options.pixel_transparency = v;
        }
        if let Some(v) = cli.large_image_threshold {
            options.large_image_threshold = v;
        }
        options.tolerance.merge(&cli.tolerance);
        validate_transparency(options.pixel_transparency).map_err(|e| anyhow::anyhow!("{e}"))?;

        Ok(Self { threshold, options })
    }
}

pub mod antialias;
pub mod engine;
pub mod metrics;
pub mod raster;
pub mod render;
pub mod tolerance;

use std::time::Instant;

use serde::{Deserialize, Serialize};

use self::engine::{DiffBounds, ScanSettings};
use self::raster::{RasterBuffer, normalize};
use self::render::{ErrorPixelColor, ErrorPixelMode};
use self::tolerance::{CompareModes, ToleranceOverrides};

/// Options for one comparison, as supplied by the caller.
///
/// Serves both TOML deserialization (`[compare]`) and programmatic use.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Treat likely antialiasing artifacts as matches.
    pub ignore_antialiasing: bool,
    /// Compare brightness only; matched pixels render as grayscale.
    pub ignore_colors: bool,
    /// Exact comparison, zero tolerance.
    pub ignore_nothing: bool,
    pub error_type: ErrorPixelMode,
    pub error_pixel_color: ErrorPixelColor,
    /// Alpha scale for matched pixels in the diff image, 0.0-1.0.
    pub pixel_transparency: f32,
    /// Canvas dimension above which the scan samples pixels. 0 disables.
    pub large_image_threshold: u32,
    pub generate_diff_image: bool,
    pub tolerance: ToleranceOverrides,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            ignore_antialiasing: false,
            ignore_colors: false,
            ignore_nothing: false,
            error_type: ErrorPixelMode::default(),
            error_pixel_color: ErrorPixelColor::default(),
            pixel_transparency: 1.0,
            large_image_threshold: 1200,
            generate_diff_image: false,
            tolerance: ToleranceOverrides::default(),
        }
    }
}

/// Signed size delta between the two inputs (first minus second).
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DimensionDifference {
    pub width: i64,
    pub height: i64,
}

/// Outcome of one comparison.
#[derive(Debug, Serialize)]
pub struct DiffResult {
    /// Fraction of the canvas classified as mismatched, in [0, 1].
    pub mismatch_ratio: f64,
    pub bounds: DiffBounds,
    pub analysis_time_millis: u64,
    pub is_same_dimensions: bool,
    pub dimension_difference: DimensionDifference,
    /// Diff raster for external encoding, present when requested.
    #[serde(skip)]
    pub output: Option<RasterBuffer>,
}

/// Compare two rasters.
///
/// Dimensions need not match: both inputs are padded onto the shared canvas
/// (the max of each dimension) before the scan. Inputs are consumed; the
/// scan itself never mutates them.
pub fn compare(left: RasterBuffer, right: RasterBuffer, options: &CompareOptions) -> DiffResult {
    let (left_w, left_h) = (left.width(), left.height());
    let (right_w, right_h) = (right.width(), right.height());
    let width = left_w.max(right_w);
    let height = left_h.max(right_h);

    let (profile, modes) = tolerance::resolve(
        CompareModes {
            ignore_antialiasing: options.ignore_antialiasing,
            ignore_colors: options.ignore_colors,
            ignore_nothing: options.ignore_nothing,
        },
        &options.tolerance,
    );

    let settings = ScanSettings {
        tolerance: profile,
        ignore_antialiasing: modes.ignore_antialiasing,
        ignore_colors: modes.ignore_colors,
        error_mode: options.error_type,
        error_color: options.error_pixel_color,
        pixel_transparency: options.pixel_transparency,
        large_image_threshold: options.large_image_threshold,
        generate_diff_image: options.generate_diff_image,
    };

    let left = normalize(left, width, height);
    let right = normalize(right, width, height);

    let start = Instant::now();
    let outcome = engine::scan(&left, &right, &settings);
    let analysis_time_millis = start.elapsed().as_millis() as u64;

    DiffResult {
        mismatch_ratio: outcome.mismatch_ratio,
        bounds: outcome.bounds,
        analysis_time_millis,
        is_same_dimensions: left_w == right_w && left_h == right_h,
        dimension_difference: DimensionDifference {
            width: left_w as i64 - right_w as i64,
            height: left_h as i64 - right_h as i64,
        },
        output: outcome.output,
    }
}

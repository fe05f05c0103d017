use serde::Serialize;
use tracing::debug;

use super::antialias::is_antialiased;
use super::metrics::{brightness_similar, rgb_similar};
use super::raster::{Pixel, RasterBuffer};
use super::render::{ErrorPixelColor, ErrorPixelMode};
use super::tolerance::ToleranceProfile;

/// Sampling stride applied to large canvases.
const SAMPLE_SKIP: u32 = 6;

/// Everything the scan needs, resolved ahead of time. Read-only for the
/// duration of one comparison.
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub tolerance: ToleranceProfile,
    pub ignore_antialiasing: bool,
    pub ignore_colors: bool,
    pub error_mode: ErrorPixelMode,
    pub error_color: ErrorPixelColor,
    /// Alpha scale for matched and grayscale pixels in the output, 0.0-1.0.
    pub pixel_transparency: f32,
    /// Canvas dimension above which the scan samples pixels. 0 disables.
    pub large_image_threshold: u32,
    pub generate_diff_image: bool,
}

/// Smallest axis-aligned box enclosing all mismatched coordinates.
///
/// A run with zero mismatches leaves the box in its initial degenerate state
/// (top = height, left = width, bottom = right = 0); `is_empty` detects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffBounds {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl DiffBounds {
    fn degenerate(width: u32, height: u32) -> Self {
        Self {
            top: height,
            left: width,
            bottom: 0,
            right: 0,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }

    /// True while no mismatch has touched the box.
    pub fn is_empty(&self) -> bool {
        self.top > self.bottom || self.left > self.right
    }
}

/// Raw scan output, before timing and dimension metadata are attached.
pub struct ScanOutcome {
    /// Fraction of the canvas classified as mismatched, in [0, 1].
    pub mismatch_ratio: f64,
    pub bounds: DiffBounds,
    /// Diff raster, present when requested.
    pub output: Option<RasterBuffer>,
}

/// One full row-major pass over two equal-dimension rasters.
///
/// Inputs are never mutated; the only mutable state is the fresh output
/// raster and the mismatch/bounds accumulators owned by this call.
pub fn scan(left: &RasterBuffer, right: &RasterBuffer, settings: &ScanSettings) -> ScanOutcome {
    let width = left.width();
    let height = left.height();
    let mut output = RasterBuffer::new(width, height);
    let mut bounds = DiffBounds::degenerate(width, height);
    let mut mismatch_count: u64 = 0;

    let sampling = settings.ignore_antialiasing
        && settings.large_image_threshold > 0
        && (width > settings.large_image_threshold || height > settings.large_image_threshold);
    if sampling {
        debug!(
            width,
            height,
            threshold = settings.large_image_threshold,
            "sampling large canvas"
        );
    }

    for y in 0..height {
        for x in 0..width {
            if sampling && (x % SAMPLE_SKIP == 0 || y % SAMPLE_SKIP == 0) {
                continue;
            }

            let offset = output.offset(x, y);
            let (Some(p1), Some(p2)) = (left.pixel_at(offset), right.pixel_at(offset)) else {
                continue;
            };

            if settings.ignore_colors {
                if brightness_similar(p1, p2, &settings.tolerance) {
                    write_grayscale(&mut output, offset, p2, settings.pixel_transparency);
                } else {
                    settings
                        .error_mode
                        .render(&mut output, offset, p1, p2, settings.error_color);
                    mismatch_count += 1;
                    bounds.include(x, y);
                }
                continue;
            }

            if rgb_similar(p1, p2, &settings.tolerance) {
                write_copy(&mut output, offset, p1, settings.pixel_transparency);
            } else if settings.ignore_antialiasing
                && (is_antialiased(p1, left, x, y, &settings.tolerance)
                    || is_antialiased(p2, right, x, y, &settings.tolerance))
            {
                if brightness_similar(p1, p2, &settings.tolerance) {
                    write_grayscale(&mut output, offset, p2, settings.pixel_transparency);
                } else {
                    settings
                        .error_mode
                        .render(&mut output, offset, p1, p2, settings.error_color);
                    mismatch_count += 1;
                    bounds.include(x, y);
                }
            } else {
                settings
                    .error_mode
                    .render(&mut output, offset, p1, p2, settings.error_color);
                mismatch_count += 1;
                bounds.include(x, y);
            }
        }
    }

    let total = width as u64 * height as u64;
    let mismatch_ratio = if total > 0 {
        mismatch_count as f64 / total as f64
    } else {
        0.0
    };

    ScanOutcome {
        mismatch_ratio,
        bounds,
        output: settings.generate_diff_image.then_some(output),
    }
}

fn write_copy(out: &mut RasterBuffer, offset: usize, p: Pixel, transparency: f32) {
    out.put(offset, [p.r, p.g, p.b, scale_alpha(p.a, transparency)]);
}

fn write_grayscale(out: &mut RasterBuffer, offset: usize, p: Pixel, transparency: f32) {
    let level = p.brightness().round().clamp(0.0, 255.0) as u8;
    out.put(offset, [level, level, level, scale_alpha(p.a, transparency)]);
}

fn scale_alpha(a: u8, transparency: f32) -> u8 {
    (a as f32 * transparency).round().clamp(0.0, 255.0) as u8
}

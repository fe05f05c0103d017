use super::metrics::{is_contrasting, rgb_identical};
use super::raster::{BYTES_PER_PIXEL, Pixel, RasterBuffer};
use super::tolerance::ToleranceProfile;

/// Hue delta beyond which a neighbor counts as differently hued.
const HUE_DIFF_THRESHOLD: f32 = 0.3;

/// Decide whether the mismatching pixel at (x, y) looks like an antialiasing
/// artifact of `source` rather than a real difference.
///
/// Examines the 8 neighbors of the 3x3 block around (x, y), counting
/// high-contrast, exactly-equivalent, and differently-hued siblings. Two or
/// more high-contrast or differently-hued siblings are a strong antialiasing
/// signal; a pixel with fewer than two exact siblings has too little support
/// to be "real" content and is also treated as antialiased.
///
/// Neighbor offsets are bounds-checked only against the buffer length:
/// offsets before the buffer start are skipped, while offsets at the
/// left/right canvas edges wrap into the adjacent row and that pixel is
/// sampled as a neighbor.
pub fn is_antialiased(
    center: Pixel,
    source: &RasterBuffer,
    x: u32,
    y: u32,
    tolerance: &ToleranceProfile,
) -> bool {
    let mut high_contrast_count = 0u32;
    let mut equivalent_count = 0u32;
    let mut hue_diff_count = 0u32;
    let center_hue = center.hue();
    let width = source.width() as i64;

    for i in -1i64..=1 {
        for j in -1i64..=1 {
            if i == 0 && j == 0 {
                continue;
            }

            let offset = ((y as i64 + j) * width + (x as i64 + i)) * BYTES_PER_PIXEL as i64;
            if offset < 0 {
                continue;
            }
            let Some(neighbor) = source.pixel_at(offset as usize) else {
                continue;
            };

            if is_contrasting(center, neighbor, tolerance) {
                high_contrast_count += 1;
            }
            if rgb_identical(center, neighbor) {
                equivalent_count += 1;
            }
            if (neighbor.hue() - center_hue).abs() > HUE_DIFF_THRESHOLD {
                hue_diff_count += 1;
            }

            if hue_diff_count > 1 || high_contrast_count > 1 {
                return true;
            }
        }
    }

    equivalent_count < 2
}

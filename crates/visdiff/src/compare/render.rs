use serde::{Deserialize, Serialize};

use super::metrics::color_distance;
use super::raster::{Pixel, RasterBuffer};

/// Strategy used to paint a mismatched pixel into the diff raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPixelMode {
    /// Constant marker color.
    #[default]
    Flat,
    /// Marker blended with the second image's pixel.
    Movement,
    /// Marker color, alpha scaled by the color distance of the pair.
    FlatDifferenceIntensity,
    /// Movement blend weighted by the color distance of the pair.
    MovementDifferenceIntensity,
}

/// Marker color for mismatched pixels. Constant for one comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorPixelColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Default for ErrorPixelColor {
    fn default() -> Self {
        Self {
            red: 255,
            green: 0,
            blue: 255,
            alpha: 255,
        }
    }
}

impl ErrorPixelMode {
    /// Paint the error pixel for the pair (p1, p2) at `offset` in the output
    /// raster. Stateless across calls.
    pub fn render(
        self,
        out: &mut RasterBuffer,
        offset: usize,
        p1: Pixel,
        p2: Pixel,
        marker: ErrorPixelColor,
    ) {
        let rgba = match self {
            Self::Flat => [marker.red, marker.green, marker.blue, marker.alpha],
            Self::Movement => [
                blend_movement(p2.r, marker.red),
                blend_movement(p2.g, marker.green),
                blend_movement(p2.b, marker.blue),
                p2.a,
            ],
            Self::FlatDifferenceIntensity => [
                marker.red,
                marker.green,
                marker.blue,
                clamp_channel(color_distance(p1, p2)),
            ],
            Self::MovementDifferenceIntensity => {
                let ratio = color_distance(p1, p2) / 255.0 * 0.8;
                [
                    blend_intensity(ratio, p2.r, marker.red),
                    blend_intensity(ratio, p2.g, marker.green),
                    blend_intensity(ratio, p2.b, marker.blue),
                    p2.a,
                ]
            }
        };
        out.put(offset, rgba);
    }
}

fn blend_movement(channel: u8, marker: u8) -> u8 {
    clamp_channel((channel as f32 * (marker as f32 / 255.0) + marker as f32) / 2.0)
}

fn blend_intensity(ratio: f32, channel: u8, marker: u8) -> u8 {
    clamp_channel((1.0 - ratio) * (channel as f32 * (marker as f32 / 255.0)) + ratio * marker as f32)
}

fn clamp_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(mode: ErrorPixelMode, p1: Pixel, p2: Pixel, marker: ErrorPixelColor) -> [u8; 4] {
        let mut out = RasterBuffer::new(1, 1);
        mode.render(&mut out, 0, p1, p2, marker);
        out.pixels().try_into().unwrap()
    }

    const MAGENTA: ErrorPixelColor = ErrorPixelColor {
        red: 255,
        green: 0,
        blue: 255,
        alpha: 255,
    };

    fn px(r: u8, g: u8, b: u8, a: u8) -> Pixel {
        Pixel { r, g, b, a }
    }

    #[test]
    fn flat_writes_marker_unchanged() {
        let out = rendered(
            ErrorPixelMode::Flat,
            px(1, 2, 3, 4),
            px(5, 6, 7, 8),
            MAGENTA,
        );
        assert_eq!(out, [255, 0, 255, 255]);
    }

    #[test]
    fn movement_blends_second_pixel_with_marker() {
        let out = rendered(
            ErrorPixelMode::Movement,
            px(0, 0, 0, 255),
            px(100, 200, 50, 77),
            MAGENTA,
        );
        // (channel * marker/255 + marker) / 2 per color channel, alpha from p2.
        assert_eq!(out, [178, 0, 153, 77]);
    }

    #[test]
    fn flat_difference_intensity_scales_alpha_by_distance() {
        let out = rendered(
            ErrorPixelMode::FlatDifferenceIntensity,
            px(0, 0, 0, 255),
            px(30, 60, 90, 255),
            MAGENTA,
        );
        // Mean absolute channel difference: (30 + 60 + 90) / 3 = 60.
        assert_eq!(out, [255, 0, 255, 60]);
    }

    #[test]
    fn movement_difference_intensity_weights_by_distance() {
        let p1 = px(0, 0, 0, 255);
        let p2 = px(255, 255, 255, 42);
        let out = rendered(ErrorPixelMode::MovementDifferenceIntensity, p1, p2, MAGENTA);
        // distance = 255, ratio = 0.8:
        //   red  = 0.2 * 255 + 0.8 * 255 = 255
        //   green = 0.2 * 0 + 0.8 * 0 = 0
        assert_eq!(out, [255, 0, 255, 42]);
    }

    #[test]
    fn unknown_mode_names_are_rejected() {
        assert!(serde_json::from_str::<ErrorPixelMode>("\"flat\"").is_ok());
        assert!(serde_json::from_str::<ErrorPixelMode>("\"movement-difference-intensity\"").is_ok());
        assert!(serde_json::from_str::<ErrorPixelMode>("\"neon\"").is_err());
    }
}

use super::raster::Pixel;
use super::tolerance::ToleranceProfile;

impl Pixel {
    /// Weighted luminance ("corrected" lightness).
    pub fn brightness(self) -> f32 {
        0.3 * self.r as f32 + 0.59 * self.g as f32 + 0.11 * self.b as f32
    }

    /// HSL hue, normalized to [0, 1). Achromatic pixels report 0.
    pub fn hue(self) -> f32 {
        let r = self.r as f32 / 255.0;
        let g = self.g as f32 / 255.0;
        let b = self.b as f32 / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        if max == min {
            return 0.0;
        }

        let d = max - min;
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h / 6.0
    }
}

/// Equal values are always similar; otherwise similar iff the absolute
/// difference is strictly under the tolerance.
pub fn channel_similar(a: f32, b: f32, tolerance: f32) -> bool {
    a == b || (a - b).abs() < tolerance
}

pub fn rgb_similar(p1: Pixel, p2: Pixel, tolerance: &ToleranceProfile) -> bool {
    channel_similar(p1.r as f32, p2.r as f32, tolerance.red as f32)
        && channel_similar(p1.g as f32, p2.g as f32, tolerance.green as f32)
        && channel_similar(p1.b as f32, p2.b as f32, tolerance.blue as f32)
        && channel_similar(p1.a as f32, p2.a as f32, tolerance.alpha as f32)
}

pub fn brightness_similar(p1: Pixel, p2: Pixel, tolerance: &ToleranceProfile) -> bool {
    channel_similar(
        p1.brightness(),
        p2.brightness(),
        tolerance.min_brightness as f32,
    ) && channel_similar(p1.a as f32, p2.a as f32, tolerance.alpha as f32)
}

/// Brightness delta beyond the profile's maximum.
pub fn is_contrasting(p1: Pixel, p2: Pixel, tolerance: &ToleranceProfile) -> bool {
    (p1.brightness() - p2.brightness()).abs() > tolerance.max_brightness as f32
}

/// Exact equality of the color channels, alpha excluded.
pub fn rgb_identical(p1: Pixel, p2: Pixel) -> bool {
    p1.r == p2.r && p1.g == p2.g && p1.b == p2.b
}

/// Mean absolute channel difference, alpha excluded.
pub fn color_distance(p1: Pixel, p2: Pixel) -> f32 {
    ((p1.r as f32 - p2.r as f32).abs()
        + (p1.g as f32 - p2.g as f32).abs()
        + (p1.b as f32 - p2.b as f32).abs())
        / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(r: u8, g: u8, b: u8, a: u8) -> Pixel {
        Pixel { r, g, b, a }
    }

    #[test]
    fn brightness_is_weighted_luminance() {
        assert!((px(255, 255, 255, 255).brightness() - 255.0).abs() < 1e-3);
        assert_eq!(px(0, 0, 0, 255).brightness(), 0.0);
        assert!((px(100, 0, 0, 255).brightness() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn hue_primaries() {
        assert_eq!(px(128, 128, 128, 255).hue(), 0.0); // achromatic
        assert_eq!(px(255, 0, 0, 255).hue(), 0.0);
        assert!((px(0, 255, 0, 255).hue() - 1.0 / 3.0).abs() < 1e-6);
        assert!((px(0, 0, 255, 255).hue() - 2.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn hue_wraps_when_red_max_and_blue_exceeds_green() {
        // Magenta: max is red (tied with blue resolves to red), g < b adds 6.
        assert!((px(255, 0, 255, 255).hue() - 5.0 / 6.0).abs() < 1e-6);
    }

    #[test]
    fn channel_similar_boundaries() {
        assert!(channel_similar(100.0, 100.0, 0.0)); // equal always similar
        assert!(channel_similar(250.0, 255.0, 16.0));
        assert!(!channel_similar(250.0, 255.0, 5.0)); // delta == tolerance is not similar
        assert!(channel_similar(250.0, 255.0, 6.0));
    }

    #[test]
    fn rgb_similar_is_symmetric() {
        let tolerance = ToleranceProfile::default();
        let pairs = [
            (px(255, 0, 0, 255), px(250, 0, 0, 255)),
            (px(0, 255, 0, 255), px(255, 0, 0, 255)),
            (px(10, 20, 30, 40), px(10, 20, 30, 40)),
        ];
        for (p1, p2) in pairs {
            assert_eq!(
                rgb_similar(p1, p2, &tolerance),
                rgb_similar(p2, p1, &tolerance)
            );
        }
    }

    #[test]
    fn color_distance_zero_for_identical() {
        for p in [px(0, 0, 0, 0), px(255, 0, 255, 255), px(1, 2, 3, 4)] {
            assert_eq!(color_distance(p, p), 0.0);
        }
        assert_eq!(color_distance(px(0, 0, 0, 255), px(255, 255, 255, 255)), 255.0);
    }

    #[test]
    fn contrast_uses_max_brightness() {
        let tolerance = ToleranceProfile {
            max_brightness: 96,
            ..ToleranceProfile::default()
        };
        assert!(is_contrasting(px(0, 0, 0, 255), px(255, 255, 255, 255), &tolerance));
        assert!(!is_contrasting(px(100, 100, 100, 255), px(120, 120, 120, 255), &tolerance));
    }

    #[test]
    fn brightness_similar_ignores_hue() {
        let tolerance = ToleranceProfile::default();
        // Equal brightness to within the tolerance, very different colors.
        let gray = px(100, 100, 100, 255);
        let tinted = px(140, 80, 100, 255); // brightness 100.2
        assert!(brightness_similar(gray, tinted, &tolerance));
        // Alpha outside tolerance breaks the similarity.
        let faded = px(140, 80, 100, 100);
        assert!(!brightness_similar(gray, faded, &tolerance));
    }
}

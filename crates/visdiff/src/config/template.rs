use std::path::Path;

use anyhow::{Context, Result};

use super::{CONFIG_DIR, CONFIG_FILE};

/// Hand-crafted config template with commented-out keys.
/// Used by `visdiff init` instead of `toml::to_string_pretty()` so that
/// users can see the available knobs without uncommenting section headers.
const CONFIG_TEMPLATE: &str = r#"[diff]
# threshold = 0.0                    # max allowed mismatch ratio (0.0 = exact, 0.01 = 1%)

# ─────────────────────────────────────────────────────────
# Comparison — all fields optional.
# ─────────────────────────────────────────────────────────
[compare]
# ignore_antialiasing = false        # tolerate sub-pixel rendering artifacts
# ignore_colors = false              # compare brightness only, matches render as grayscale
# ignore_nothing = false             # exact comparison, zero tolerance
# error_type = "flat"                # "flat" | "movement" | "flat-difference-intensity" | "movement-difference-intensity"
# pixel_transparency = 1.0           # alpha scale for matched pixels in the diff image
# large_image_threshold = 1200       # canvas dimension that enables scan sampling (0 = never)
# generate_diff_image = false

# [compare.error_pixel_color]        # marker color for mismatched pixels
# red = 255
# green = 0
# blue = 255
# alpha = 255

# [compare.tolerance]                # per-channel similarity thresholds
# red = 16
# green = 16
# blue = 16
# alpha = 16
# min_brightness = 16
# max_brightness = 240
"#;

pub fn config_file_exists() -> bool {
    Path::new(CONFIG_DIR).join(CONFIG_FILE).exists()
}

/// Write the hand-crafted config template (with commented-out sections).
pub fn write_template() -> Result<()> {
    let dir = Path::new(CONFIG_DIR);
    std::fs::create_dir_all(dir).context("Failed to create .visdiff directory")?;
    let path = dir.join(CONFIG_FILE);
    std::fs::write(&path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::CompareOptions;
    use crate::config::Config;

    #[test]
    fn template_parses_into_the_schema() {
        let config: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.diff.threshold, 0.0);
        // All keys commented out: the compare section is pure defaults.
        let defaults = CompareOptions::default();
        assert_eq!(
            config.compare.large_image_threshold,
            defaults.large_image_threshold
        );
        assert_eq!(config.compare.error_type, defaults.error_type);
    }
}

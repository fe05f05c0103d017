use serde::{Deserialize, Serialize};

/// Per-channel and brightness thresholds governing similarity decisions for
/// one comparison. Immutable once resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToleranceProfile {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub min_brightness: u8,
    pub max_brightness: u8,
}

impl Default for ToleranceProfile {
    fn default() -> Self {
        Self {
            red: 16,
            green: 16,
            blue: 16,
            alpha: 16,
            min_brightness: 16,
            max_brightness: 240,
        }
    }
}

/// Per-field tolerance overrides; `None` means "use default".
///
/// Serves both TOML deserialization (`[compare.tolerance]`) and CLI argument
/// parsing.
#[derive(Clone, Copy, Debug, Default, clap::Args, Serialize, Deserialize)]
pub struct ToleranceOverrides {
    #[arg(long = "tolerance-red", value_name = "N")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<u8>,

    #[arg(long = "tolerance-green", value_name = "N")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<u8>,

    #[arg(long = "tolerance-blue", value_name = "N")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<u8>,

    #[arg(long = "tolerance-alpha", value_name = "N")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<u8>,

    #[arg(long = "tolerance-min-brightness", value_name = "N")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_brightness: Option<u8>,

    #[arg(long = "tolerance-max-brightness", value_name = "N")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_brightness: Option<u8>,
}

impl ToleranceOverrides {
    /// Overlay non-None fields from `other` onto self.
    pub fn merge(&mut self, other: &ToleranceOverrides) {
        if other.red.is_some() {
            self.red = other.red;
        }
        if other.green.is_some() {
            self.green = other.green;
        }
        if other.blue.is_some() {
            self.blue = other.blue;
        }
        if other.alpha.is_some() {
            self.alpha = other.alpha;
        }
        if other.min_brightness.is_some() {
            self.min_brightness = other.min_brightness;
        }
        if other.max_brightness.is_some() {
            self.max_brightness = other.max_brightness;
        }
    }
}

/// Comparison modes as supplied by the caller, before resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareModes {
    pub ignore_antialiasing: bool,
    pub ignore_colors: bool,
    pub ignore_nothing: bool,
}

/// Modes actually in effect after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedModes {
    pub ignore_antialiasing: bool,
    pub ignore_colors: bool,
}

/// Resolve the numeric tolerance table for one comparison.
///
/// Defaults are merged with per-field overrides, then mode presets are
/// applied in order; each preset overwrites prior values, explicit overrides
/// included. `ignore_antialiasing` is mutually exclusive with grayscale mode
/// and forces `ignore_colors` off.
pub fn resolve(
    modes: CompareModes,
    overrides: &ToleranceOverrides,
) -> (ToleranceProfile, ResolvedModes) {
    let mut tolerance = ToleranceProfile::default();
    if let Some(v) = overrides.red {
        tolerance.red = v;
    }
    if let Some(v) = overrides.green {
        tolerance.green = v;
    }
    if let Some(v) = overrides.blue {
        tolerance.blue = v;
    }
    if let Some(v) = overrides.alpha {
        tolerance.alpha = v;
    }
    if let Some(v) = overrides.min_brightness {
        tolerance.min_brightness = v;
    }
    if let Some(v) = overrides.max_brightness {
        tolerance.max_brightness = v;
    }

    let mut ignore_colors = modes.ignore_colors;

    if modes.ignore_antialiasing {
        tolerance = ToleranceProfile {
            red: 32,
            green: 32,
            blue: 32,
            alpha: 32,
            min_brightness: 64,
            max_brightness: 96,
        };
        ignore_colors = false;
    }

    if modes.ignore_nothing {
        tolerance = ToleranceProfile {
            red: 0,
            green: 0,
            blue: 0,
            alpha: 0,
            min_brightness: 0,
            max_brightness: 255,
        };
    }

    if ignore_colors {
        tolerance.alpha = 16;
        tolerance.min_brightness = 16;
        tolerance.max_brightness = 240;
    }

    (
        tolerance,
        ResolvedModes {
            ignore_antialiasing: modes.ignore_antialiasing,
            ignore_colors,
        },
    )
}

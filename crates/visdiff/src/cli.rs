use std::path::PathBuf;

use clap::{Parser, Subcommand};

use visdiff::compare::render::{ErrorPixelColor, ErrorPixelMode};
use visdiff::compare::tolerance::ToleranceOverrides;
use visdiff::config;

fn parse_threshold(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_threshold(v)
}

fn parse_transparency(s: &str) -> Result<f32, String> {
    let v: f32 = s.parse().map_err(|e| format!("{e}"))?;
    config::validate_transparency(v)
}

/// Parse a marker color given as `R,G,B` or `R,G,B,A`.
fn parse_error_color(s: &str) -> Result<ErrorPixelColor, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(format!("expected R,G,B or R,G,B,A, got '{s}'"));
    }
    let mut channels = [255u8; 4];
    for (channel, part) in channels.iter_mut().zip(&parts) {
        *channel = part
            .parse()
            .map_err(|_| format!("invalid channel value '{part}' (expected 0-255)"))?;
    }
    Ok(ErrorPixelColor {
        red: channels[0],
        green: channels[1],
        blue: channels[2],
        alpha: channels[3],
    })
}

#[derive(Parser)]
#[command(
    name = "visdiff",
    about = "Pixel-level visual regression comparison for raster images"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create .visdiff/config.toml with default settings
    Init {
        /// Overwrite an existing config
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Compare two images and report the mismatch (exit 0/1)
    Compare(CompareArgs),
}

#[derive(clap::Args)]
pub struct CompareArgs {
    /// Baseline image
    pub left: PathBuf,

    /// Candidate image
    pub right: PathBuf,

    /// Max allowed mismatch ratio (0.0-1.0). Comparisons within threshold pass.
    #[arg(long, value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Write the diff image (PNG) to PATH
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print the diff image as a base64 data URI
    #[arg(long)]
    pub data_uri: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat likely antialiasing artifacts as matches
    #[arg(long)]
    pub ignore_antialiasing: bool,

    /// Compare brightness only; matched pixels render as grayscale
    #[arg(long)]
    pub ignore_colors: bool,

    /// Exact comparison, zero tolerance
    #[arg(long)]
    pub ignore_nothing: bool,

    /// Rendering strategy for mismatched pixels
    #[arg(long, value_enum)]
    pub error_type: Option<ErrorPixelMode>,

    /// Marker color for mismatched pixels, as `R,G,B[,A]`
    #[arg(long, value_parser = parse_error_color)]
    pub error_color: Option<ErrorPixelColor>,

    /// Alpha scale applied to matched pixels in the diff image (0.0-1.0)
    #[arg(long, value_parser = parse_transparency)]
    pub pixel_transparency: Option<f32>,

    /// Canvas dimension above which the scan samples pixels (0 = never)
    #[arg(long)]
    pub large_image_threshold: Option<u32>,

    #[command(flatten)]
    pub tolerance: ToleranceOverrides,

    /// Config file (default: .visdiff/config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

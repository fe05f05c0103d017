use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use visdiff::codec;
use visdiff::config::{CliOverrides, ResolvedCompareConfig};

use crate::cli::CompareArgs;
use crate::report::terminal;

/// `visdiff compare` — decode, diff, report.
/// Returns exit code: 0 = within threshold, 1 = mismatch.
pub async fn compare(args: CompareArgs) -> Result<i32> {
    let CompareArgs {
        left,
        right,
        threshold,
        output,
        data_uri,
        json,
        ignore_antialiasing,
        ignore_colors,
        ignore_nothing,
        error_type,
        error_color,
        pixel_transparency,
        large_image_threshold,
        tolerance,
        config,
    } = args;

    let resolved = ResolvedCompareConfig::new(CliOverrides {
        config,
        threshold,
        ignore_antialiasing,
        ignore_colors,
        ignore_nothing,
        error_type,
        error_color,
        pixel_transparency,
        large_image_threshold,
        generate_diff_image: output.is_some() || data_uri,
        tolerance,
    })?;

    // Decode both sources concurrently; either failure is terminal for the
    // whole comparison.
    let left_task = tokio::task::spawn_blocking({
        let path = left.clone();
        move || codec::decode_file(&path)
    });
    let right_task = tokio::task::spawn_blocking({
        let path = right.clone();
        move || codec::decode_file(&path)
    });
    let (left_raster, right_raster) = tokio::try_join!(left_task, right_task)
        .context("Decode task panicked")?;
    let left_raster = left_raster?;
    let right_raster = right_raster?;

    debug!(
        left_w = left_raster.width(),
        left_h = left_raster.height(),
        right_w = right_raster.width(),
        right_h = right_raster.height(),
        "decoded sources"
    );

    let options = resolved.options.clone();
    let mut result =
        tokio::task::spawn_blocking(move || visdiff::compare::compare(left_raster, right_raster, &options))
            .await
            .context("Diff task panicked")?;

    if let Some(raster) = result.output.take() {
        let png = codec::encode_png(raster)?;
        if let Some(path) = &output {
            std::fs::write(path, &png)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        if data_uri {
            println!("{}", codec::png_data_uri(&png));
        }
    }

    let passed = result.mismatch_ratio <= resolved.threshold;

    if json {
        let report = json!({
            "passed": passed,
            "threshold": resolved.threshold,
            "result": &result,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        terminal::print_result(&left, &right, &result, resolved.threshold, passed, output.as_deref());
    }

    Ok(if passed { 0 } else { 1 })
}

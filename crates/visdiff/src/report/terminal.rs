use std::path::Path;
use std::time::Duration;

use visdiff::compare::DiffResult;

pub fn format_duration(d: Duration) -> String {
    let ms = d.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

/// Print the comparison verdict and supporting detail.
pub fn print_result(
    left: &Path,
    right: &Path,
    result: &DiffResult,
    threshold: f64,
    passed: bool,
    diff_path: Option<&Path>,
) {
    let verdict = if passed {
        "\x1b[32mPASS\x1b[0m"
    } else {
        "\x1b[31mFAIL\x1b[0m"
    };
    let elapsed = format_duration(Duration::from_millis(result.analysis_time_millis));

    println!(
        "  {verdict}  {} vs {}  ({:.4} mismatch, threshold {:.4})  \x1b[2m{elapsed}\x1b[0m",
        left.display(),
        right.display(),
        result.mismatch_ratio,
        threshold,
    );

    if !result.is_same_dimensions {
        let d = &result.dimension_difference;
        println!("        dimensions changed: {:+} x {:+}", d.width, d.height);
    }
    if !result.bounds.is_empty() {
        let b = &result.bounds;
        println!(
            "        diff bounds: ({}, {}) - ({}, {})",
            b.left, b.top, b.right, b.bottom
        );
    }
    if let Some(path) = diff_path {
        println!("        diff image: {}", path.display());
    }
}

use ccheck_types::CheckReport;

use crate::{describe_error, warning_is_failure};

/// Render one line per passing file, per warning, per failure, and per error.
///
/// Within a file, warnings come before failures, each in evaluation order. In strict mode
/// warnings are labelled `Failure`.
pub fn render_text(report: &CheckReport) -> Vec<String> {
    let warning_label = if warning_is_failure(report) {
        "Failure"
    } else {
        "Warning"
    };

    let mut out = Vec::new();
    for file in &report.files {
        if file.is_clean() {
            out.push(format!("Passed: {}", file.path));
            continue;
        }
        for w in &file.warnings {
            out.push(format!("{warning_label}: {} - {}", file.path, w.message));
        }
        for f in &file.failures {
            out.push(format!("Failure: {} - {}", file.path, f.message));
        }
        for e in &file.errors {
            out.push(format!("Error: {} - {}", file.path, describe_error(e)));
        }
    }
    out
}

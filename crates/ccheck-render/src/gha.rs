use ccheck_types::CheckReport;

use crate::{describe_error, warning_is_failure};

/// Render messages as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} file={path}::{message}`
pub fn render_github_annotations(report: &CheckReport) -> Vec<String> {
    let warning_level = if warning_is_failure(report) {
        "error"
    } else {
        "warning"
    };

    let mut out = Vec::new();
    for file in &report.files {
        for w in &file.warnings {
            out.push(annotation(warning_level, &file.path, &w.message));
        }
        for f in &file.failures {
            out.push(annotation("error", &file.path, &f.message));
        }
        for e in &file.errors {
            out.push(annotation("error", &file.path, &describe_error(e)));
        }
    }
    out
}

fn annotation(level: &str, path: &str, message: &str) -> String {
    let message = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    let path = path
        .replace('%', "%25")
        .replace(',', "%2C")
        .replace(':', "%3A");
    format!("::{level} file={path}::{message}")
}

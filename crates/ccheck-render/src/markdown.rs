use ccheck_types::{CheckReport, Verdict};

use crate::{describe_error, warning_is_failure};

pub fn render_markdown(report: &CheckReport) -> String {
    let mut out = String::new();

    out.push_str("# ccheck report\n\n");
    let verdict = match report.verdict {
        Verdict::Pass => "PASS",
        Verdict::Warn => "WARN",
        Verdict::Fail => "FAIL",
    };
    let c = &report.counts;
    out.push_str(&format!(
        "- Verdict: **{verdict}**\n- Files: {} ({} passed)\n- Failures: {}, warnings: {}, errors: {}\n\n",
        c.files, c.passed, c.failures, c.warnings, c.errors
    ));

    let with_issues: Vec<_> = report.files.iter().filter(|f| !f.is_clean()).collect();
    if with_issues.is_empty() {
        out.push_str("No issues.\n");
        return out;
    }

    let warning_label = if warning_is_failure(report) {
        "FAIL"
    } else {
        "WARN"
    };

    out.push_str("## Issues\n\n");
    for file in with_issues {
        out.push_str(&format!("### `{}`\n\n", file.path));
        for w in &file.warnings {
            out.push_str(&format!("- [{warning_label}] {}\n", w.message));
        }
        for f in &file.failures {
            out.push_str(&format!("- [FAIL] {}\n", f.message));
        }
        for e in &file.errors {
            out.push_str(&format!("- [ERROR] `{}` {}\n", e.kind, describe_error(e)));
        }
        out.push('\n');
    }

    out
}

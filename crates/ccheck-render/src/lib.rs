//! Rendering for terminals and CI surfaces (plain text, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use text::render_text;

use ccheck_types::{CheckReport, ErrorEntry};

/// Label a warning is printed with: strict mode reports warnings as failures.
pub(crate) fn warning_is_failure(report: &CheckReport) -> bool {
    report.settings.strict
}

pub(crate) fn describe_error(err: &ErrorEntry) -> String {
    match (&err.rule, err.part) {
        (Some(rule), Some(part)) => format!("{rule} (part {part}): {}", err.message),
        (Some(rule), None) => format!("{rule}: {}", err.message),
        (None, Some(part)) => format!("part {part}: {}", err.message),
        (None, None) => err.message.clone(),
    }
}

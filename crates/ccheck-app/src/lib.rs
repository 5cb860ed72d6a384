//! Use case orchestration for ccheck.
//!
//! This crate provides the application layer: use cases that coordinate the policy, document,
//! domain, and render layers. The CLI crate depends on this; it only handles argument
//! parsing, IO, and exit codes.

#![forbid(unsafe_code)]

mod check;
mod render;
mod report;

pub use check::{run_check, verdict_exit_code, CheckInput, CheckOutput};
pub use render::{render_output, write_report, OutputFormat};
pub use report::{build_report, parse_report_json, serialize_report};

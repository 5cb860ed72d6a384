//! Shared test utilities for the ccheck workspace.
//!
//! `xtask` and the CLI tests both compare emitted reports against expected JSON, so the
//! normalization lives in a regular crate rather than a `#[cfg(test)]` module.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Replace the run-dependent fields of a ccheck report with fixed placeholders.
///
/// Only a root object shaped like a report (`schema`, `tool`, `run`, `verdict`, `files`)
/// is touched: `tool.version`, `run.started_at`, `run.finished_at` and `run.duration_ms`.
/// Anything else is returned unchanged.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };
    let is_report = ["schema", "tool", "run", "verdict", "files"]
        .iter()
        .all(|k| obj.contains_key(*k));
    if !is_report {
        return value;
    }

    if let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
        && tool.contains_key("version")
    {
        tool.insert(
            "version".to_string(),
            Value::String(VERSION_PLACEHOLDER.to_string()),
        );
    }

    if let Some(run) = obj.get_mut("run").and_then(Value::as_object_mut) {
        for key in ["started_at", "finished_at"] {
            if run.contains_key(key) {
                run.insert(
                    key.to_string(),
                    Value::String(TIMESTAMP_PLACEHOLDER.to_string()),
                );
            }
        }
        if run.contains_key("duration_ms") {
            run.insert("duration_ms".to_string(), Value::Number(0.into()));
        }
    }

    value
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for ccheck reports.
pub const SCHEMA_REPORT_V1: &str = "ccheck.report.v1";

/// Class of a policy message. Mirrors the two rule naming conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MessageClass {
    /// Produced by a `deny` / `deny_<suffix>` rule.
    Failure,
    /// Produced by a `warn` / `warn_<suffix>` rule.
    Warning,
}

impl MessageClass {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageClass::Failure => "failure",
            MessageClass::Warning => "warning",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Passed,
    Warned,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub duration_ms: u64,
}

/// The effective settings the run used, echoed so a report is self-describing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportSettings {
    pub policy: String,
    pub namespace: String,
    pub strict: bool,
}

/// A message produced by a policy rule, passed through unmodified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MessageEntry {
    pub message: String,

    /// SHA-256 over `path|class|message`, with `|n` appended for the n-th repeat of a
    /// message in the same file. Stable across runs.
    pub fingerprint: String,
}

/// A file-scoped error: the file could not be loaded, or a rule could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ErrorEntry {
    /// One of the ids in [`crate::ids`].
    pub kind: String,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Zero-based index of the document part within the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    #[serde(default)]
    pub failures: Vec<MessageEntry>,
    #[serde(default)]
    pub warnings: Vec<MessageEntry>,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

impl FileReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportCounts {
    pub files: u32,
    pub passed: u32,
    pub failures: u32,
    pub warnings: u32,
    pub errors: u32,
}

/// Top-level report for one `ccheck` run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CheckReport {
    /// Versioned schema identifier for the report shape.
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    pub settings: ReportSettings,
    pub verdict: Verdict,
    pub counts: ReportCounts,

    /// One entry per input file, sorted by path.
    pub files: Vec<FileReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> CheckReport {
        CheckReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "ccheck".to_string(),
                version: "0.1.0".to_string(),
            },
            run: RunMeta {
                started_at: datetime!(2024-01-01 00:00:00 UTC),
                finished_at: datetime!(2024-01-01 00:00:01 UTC),
                duration_ms: 1000,
            },
            settings: ReportSettings {
                policy: "policies".to_string(),
                namespace: "main".to_string(),
                strict: false,
            },
            verdict: Verdict::Warn,
            counts: ReportCounts {
                files: 1,
                passed: 0,
                failures: 0,
                warnings: 1,
                errors: 0,
            },
            files: vec![FileReport {
                path: "/work/deploy.yaml".to_string(),
                status: FileStatus::Warned,
                failures: Vec::new(),
                warnings: vec![MessageEntry {
                    message: "nginx should not be configured to live in the default namespace"
                        .to_string(),
                    fingerprint: "abc".to_string(),
                }],
                errors: Vec::new(),
            }],
        }
    }

    #[test]
    fn report_serializes_lowercase_enums_and_rfc3339_times() {
        let value = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(value["verdict"], "warn");
        assert_eq!(value["files"][0]["status"], "warned");
        assert_eq!(value["run"]["started_at"], "2024-01-01T00:00:00Z");
        assert!(value["files"][0]["errors"].as_array().expect("array").is_empty());
    }

    #[test]
    fn error_entry_omits_missing_rule_and_part() {
        let entry = ErrorEntry {
            kind: crate::ids::ERROR_DECODE.to_string(),
            message: "bad yaml".to_string(),
            rule: None,
            part: None,
        };
        let value = serde_json::to_value(&entry).expect("serialize");
        assert!(value.get("rule").is_none());
        assert!(value.get("part").is_none());
    }

    #[test]
    fn report_parses_back() {
        let report = sample();
        let text = serde_json::to_string(&report).expect("serialize");
        let parsed: CheckReport = serde_json::from_str(&text).expect("parse");
        assert_eq!(parsed.files[0].warnings.len(), 1);
        assert!(!parsed.files[0].is_clean());
    }
}

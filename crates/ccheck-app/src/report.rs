use std::collections::BTreeMap;

use anyhow::Context;
use camino::Utf8PathBuf;
use ccheck_domain::fingerprint::fingerprint_for_message;
use ccheck_domain::{CheckResult, CheckResults, FileError};
use ccheck_settings::EffectiveSettings;
use ccheck_types::{
    CheckReport, ErrorEntry, FileReport, FileStatus, MessageClass, MessageEntry, ReportCounts,
    ReportSettings, RunMeta, ToolMeta, Verdict, SCHEMA_REPORT_V1,
};
use time::OffsetDateTime;

/// Build the report envelope for a finished run.
///
/// `labels` maps result keys to the path as the user wrote it; that is what the report shows
/// and what fingerprints are computed over.
pub fn build_report(
    settings: &EffectiveSettings,
    results: &CheckResults,
    labels: &BTreeMap<Utf8PathBuf, String>,
    started_at: OffsetDateTime,
    finished_at: OffsetDateTime,
) -> CheckReport {
    let mut files: Vec<FileReport> = results
        .iter()
        .map(|(key, result)| {
            let path = labels
                .get(key)
                .cloned()
                .unwrap_or_else(|| key.to_string());
            file_report(path, result)
        })
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let mut counts = ReportCounts {
        files: files.len() as u32,
        ..ReportCounts::default()
    };
    for f in &files {
        if f.status == FileStatus::Passed {
            counts.passed += 1;
        }
        counts.failures += f.failures.len() as u32;
        counts.warnings += f.warnings.len() as u32;
        counts.errors += f.errors.len() as u32;
    }

    let verdict = if counts.failures > 0 || counts.errors > 0 {
        Verdict::Fail
    } else if counts.warnings > 0 {
        if settings.strict {
            Verdict::Fail
        } else {
            Verdict::Warn
        }
    } else {
        Verdict::Pass
    };

    let duration_ms = (finished_at - started_at).whole_milliseconds().max(0) as u64;

    CheckReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "ccheck".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at,
            finished_at,
            duration_ms,
        },
        settings: ReportSettings {
            policy: settings.policy.clone(),
            namespace: settings.namespace.clone(),
            strict: settings.strict,
        },
        verdict,
        counts,
        files,
    }
}

fn file_report(path: String, result: &CheckResult) -> FileReport {
    let entries = |class: MessageClass, messages: &[String]| -> Vec<MessageEntry> {
        messages
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let occurrence = messages[..i].iter().filter(|prev| *prev == m).count();
                MessageEntry {
                    message: m.clone(),
                    fingerprint: fingerprint_for_message(&path, class, m, occurrence),
                }
            })
            .collect()
    };

    let failures = entries(MessageClass::Failure, &result.failures);
    let warnings = entries(MessageClass::Warning, &result.warnings);
    let errors: Vec<ErrorEntry> = result.errors.iter().map(error_entry).collect();

    let status = if !failures.is_empty() || !errors.is_empty() {
        FileStatus::Failed
    } else if !warnings.is_empty() {
        FileStatus::Warned
    } else {
        FileStatus::Passed
    };

    FileReport {
        path,
        status,
        failures,
        warnings,
        errors,
    }
}

fn error_entry(err: &FileError) -> ErrorEntry {
    let message = match err {
        FileError::Load { message, .. } => message.clone(),
        FileError::Evaluation { error, .. } => error.to_string(),
    };
    ErrorEntry {
        kind: err.kind().to_string(),
        message,
        rule: err.rule().map(str::to_string),
        part: err.part().map(|p| p as u32),
    }
}

pub fn serialize_report(report: &CheckReport) -> anyhow::Result<Vec<u8>> {
    let mut data = serde_json::to_vec_pretty(report).context("serialize report")?;
    data.push(b'\n');
    Ok(data)
}

pub fn parse_report_json(text: &str) -> anyhow::Result<CheckReport> {
    let report: CheckReport = serde_json::from_str(text).context("parse report json")?;
    if report.schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {}", report.schema);
    }
    Ok(report)
}

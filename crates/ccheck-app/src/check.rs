//! The `check` use case: build the policy catalog, load inputs, evaluate, report.

use std::collections::BTreeMap;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use ccheck_domain::{check_parts, CancelToken, CheckResult, CheckResults, PredicateClassifier};
use ccheck_settings::{CcheckConfigV1, EffectiveSettings, Overrides};
use ccheck_types::{CheckReport, Verdict};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::report::build_report;

/// Input for the check use case.
#[derive(Clone, Debug)]
pub struct CheckInput<'a> {
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Config files to check, as given by the user.
    pub files: &'a [Utf8PathBuf],
    pub cancel: CancelToken,
}

/// Output from the check use case.
#[derive(Clone, Debug)]
pub struct CheckOutput {
    pub report: CheckReport,
    /// Per-file results keyed by absolute path.
    pub results: CheckResults,
    pub settings: EffectiveSettings,
}

/// Run the check use case.
///
/// Policies are compiled before any input file is read; a policy error aborts the run.
/// Load errors are recorded per file unless `fail_fast` is set, in which case the first
/// one aborts the run before anything is evaluated.
pub fn run_check(input: CheckInput<'_>) -> anyhow::Result<CheckOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        CcheckConfigV1::default()
    } else {
        ccheck_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let settings =
        ccheck_settings::resolve_settings(cfg, input.overrides).context("resolve config")?;

    let catalog = ccheck_policy::build_catalog(Utf8Path::new(&settings.policy))
        .with_context(|| format!("load policies from {}", settings.policy))?;
    if !catalog.files.is_empty() && !catalog.declares_package(&settings.namespace) {
        warn!(
            namespace = %settings.namespace,
            packages = ?catalog.packages(),
            "no policy module declares the namespace; every input will pass"
        );
    }

    let classifier = PredicateClassifier::new().context("compile rule name patterns")?;
    let predicates = classifier.classify(&catalog.rule_names());
    info!(
        denials = predicates.denials.len(),
        warnings = predicates.warnings.len(),
        "classified policy rules"
    );

    let loaded = ccheck_documents::load_files(input.files);

    let mut results = CheckResults::new();
    let mut labels = BTreeMap::new();
    let mut pending = Vec::with_capacity(loaded.len());
    for (path, outcome) in input.files.iter().zip(loaded) {
        let key = absolute(path);
        labels.insert(key.clone(), path.to_string());
        match outcome {
            Ok(file) => pending.push((key, file)),
            Err(err) if settings.fail_fast => return Err(err).context("load config file"),
            Err(err) => {
                warn!(error = %err, "config file not evaluated");
                results.insert(key, CheckResult::from_error(err.into_file_error()));
            }
        }
    }

    for (key, file) in pending {
        let result = check_parts(
            catalog.rule_set(),
            &settings.namespace,
            &predicates,
            &file.parts,
            &input.cancel,
        )?;
        results.insert(key, result);
    }

    let finished_at = OffsetDateTime::now_utc();
    let report = build_report(&settings, &results, &labels, started_at, finished_at);
    info!(
        files = report.counts.files,
        failures = report.counts.failures,
        warnings = report.counts.warnings,
        errors = report.counts.errors,
        "check complete"
    );

    Ok(CheckOutput {
        report,
        results,
        settings,
    })
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
///
/// Strict mode is already folded into the verdict.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}

fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    std::path::absolute(path)
        .ok()
        .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        .unwrap_or_else(|| path.to_path_buf())
}

use camino::Utf8PathBuf;
use std::collections::BTreeMap;

use crate::dispatch::{PredicateEvaluation, PredicateOutcome};
use crate::error::FileError;
use crate::model::PredicateClass;

/// Outcome for one input file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// Messages from denial predicates, in evaluation order.
    pub failures: Vec<String>,
    /// Messages from warning predicates, in evaluation order.
    pub warnings: Vec<String>,
    /// Load and evaluation errors. Kept apart from rule-produced messages.
    pub errors: Vec<FileError>,
}

impl CheckResult {
    /// A result for a file that could not be loaded.
    pub fn from_error(error: FileError) -> Self {
        Self {
            errors: vec![error],
            ..Self::default()
        }
    }

    /// No failures, no warnings, no errors.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.warnings.is_empty() && self.errors.is_empty()
    }
}

/// Absolute file path -> result. Keys are unique; iteration is sorted by path.
pub type CheckResults = BTreeMap<Utf8PathBuf, CheckResult>;

/// Fold per-predicate evaluations into a file result, preserving evaluation order.
pub fn aggregate<I>(evaluations: I) -> CheckResult
where
    I: IntoIterator<Item = PredicateEvaluation>,
{
    let mut result = CheckResult::default();
    for eval in evaluations {
        match eval.outcome {
            PredicateOutcome::Messages(messages) => match eval.class {
                PredicateClass::Denial => result.failures.extend(messages),
                PredicateClass::Warning => result.warnings.extend(messages),
            },
            PredicateOutcome::Failure(error) => result.errors.push(FileError::Evaluation {
                rule: eval.rule,
                part: eval.part,
                error,
            }),
        }
    }
    result
}

//! Rule-name classification.
//!
//! Naming is the only contract between policy authors and the checker: a top-level
//! rule named `deny` or `deny_<suffix>` is a failure check, `warn` or `warn_<suffix>`
//! is a warning check, anything else is a helper and never queried directly.

use regex::Regex;
use tracing::debug;

use crate::error::ClassifierError;
use crate::model::{PredicateClass, RuleName};

/// Rule names treated as failure checks.
pub const DENIAL_PATTERN: &str = r"^deny(_\w+)?$";

/// Rule names treated as warning checks.
pub const WARNING_PATTERN: &str = r"^warn(_\w+)?$";

/// Classified rule names, in the order the rule-set listed them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Predicates {
    pub denials: Vec<RuleName>,
    pub warnings: Vec<RuleName>,
}

impl Predicates {
    pub fn len(&self) -> usize {
        self.denials.len() + self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.denials.is_empty() && self.warnings.is_empty()
    }

    /// Denials first, then warnings; the evaluation order within a document part.
    pub fn iter(&self) -> impl Iterator<Item = (PredicateClass, &str)> {
        self.denials
            .iter()
            .map(|n| (PredicateClass::Denial, n.as_str()))
            .chain(
                self.warnings
                    .iter()
                    .map(|n| (PredicateClass::Warning, n.as_str())),
            )
    }
}

/// Holds the two compiled naming patterns.
#[derive(Clone, Debug)]
pub struct PredicateClassifier {
    denial: Regex,
    warning: Regex,
}

impl PredicateClassifier {
    pub fn new() -> Result<Self, ClassifierError> {
        Ok(Self {
            denial: Regex::new(DENIAL_PATTERN)?,
            warning: Regex::new(WARNING_PATTERN)?,
        })
    }

    /// Every class `name` belongs to. The two patterns are tested independently, so a
    /// name matching both would land in both buckets.
    pub fn classes(&self, name: &str) -> Vec<PredicateClass> {
        let mut out = Vec::new();
        if self.denial.is_match(name) {
            out.push(PredicateClass::Denial);
        }
        if self.warning.is_match(name) {
            out.push(PredicateClass::Warning);
        }
        out
    }

    /// Partition rule names into denial and warning predicates.
    ///
    /// Order is preserved and duplicates are kept: two modules defining the same rule
    /// in one namespace is a conflict the engine reports, not the classifier.
    pub fn classify<S: AsRef<str>>(&self, names: &[S]) -> Predicates {
        let mut predicates = Predicates::default();
        for name in names {
            let name = name.as_ref();
            for class in self.classes(name) {
                match class {
                    PredicateClass::Denial => predicates.denials.push(name.to_string()),
                    PredicateClass::Warning => predicates.warnings.push(name.to_string()),
                }
            }
        }
        debug!(
            denials = predicates.denials.len(),
            warnings = predicates.warnings.len(),
            rules = names.len(),
            "classified rules"
        );
        predicates
    }
}

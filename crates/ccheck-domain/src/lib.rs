//! Pure policy evaluation orchestration (no IO).
//!
//! Input: decoded document parts and a compiled rule-set behind the [`RuleSet`] trait.
//! Output: per-file failures, warnings, and evaluation errors.

#![forbid(unsafe_code)]

pub mod aggregate;
pub mod cancel;
pub mod classify;
pub mod dispatch;
pub mod error;
pub mod fingerprint;
pub mod model;
pub mod query;
pub mod ruleset;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use aggregate::{aggregate, CheckResult, CheckResults};
pub use cancel::CancelToken;
pub use classify::{PredicateClassifier, Predicates};
pub use dispatch::{check_parts, dispatch, PredicateEvaluation, PredicateOutcome};
pub use error::{Cancelled, ClassifierError, EngineError, EvalError, FileError};
pub use model::{DocumentPart, PredicateClass, RuleName};
pub use query::{build_query, Query};
pub use ruleset::RuleSet;

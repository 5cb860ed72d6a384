//! Query dispatch: every document part against every classified rule.

use serde_json::Value;
use tracing::{debug, trace};

use crate::aggregate::{aggregate, CheckResult};
use crate::cancel::CancelToken;
use crate::classify::Predicates;
use crate::error::{Cancelled, EvalError};
use crate::model::{DocumentPart, PredicateClass, RuleName};
use crate::query::Query;
use crate::ruleset::RuleSet;

/// What one rule said about one document part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PredicateOutcome {
    /// The rule evaluated; an empty list is the normal "no violation" case.
    Messages(Vec<String>),
    /// The rule could not be evaluated.
    Failure(EvalError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredicateEvaluation {
    pub part: usize,
    pub rule: RuleName,
    pub class: PredicateClass,
    pub outcome: PredicateOutcome,
}

/// Evaluate every predicate against every part.
///
/// Parts run in source order; within a part, denials in classifier order, then
/// warnings. The token is checked right before each evaluation; on cancellation the
/// whole dispatch fails and nothing evaluated so far is returned.
pub fn dispatch<R: RuleSet + ?Sized>(
    rules: &R,
    namespace: &str,
    predicates: &Predicates,
    parts: &[DocumentPart],
    cancel: &CancelToken,
) -> Result<Vec<PredicateEvaluation>, Cancelled> {
    let mut out = Vec::with_capacity(parts.len() * predicates.len());

    for part in parts {
        for (class, rule) in predicates.iter() {
            cancel.check()?;
            let outcome = evaluate_one(rules, namespace, rule, &part.value);
            trace!(part = part.index, rule, ?outcome, "evaluated");
            out.push(PredicateEvaluation {
                part: part.index,
                rule: rule.to_string(),
                class,
                outcome,
            });
        }
    }

    debug!(
        parts = parts.len(),
        predicates = predicates.len(),
        evaluations = out.len(),
        "dispatched queries"
    );
    Ok(out)
}

/// [`dispatch`] followed by [`aggregate`].
pub fn check_parts<R: RuleSet + ?Sized>(
    rules: &R,
    namespace: &str,
    predicates: &Predicates,
    parts: &[DocumentPart],
    cancel: &CancelToken,
) -> Result<CheckResult, Cancelled> {
    let evaluations = dispatch(rules, namespace, predicates, parts, cancel)?;
    Ok(aggregate(evaluations))
}

fn evaluate_one<R: RuleSet + ?Sized>(
    rules: &R,
    namespace: &str,
    rule: &str,
    input: &Value,
) -> PredicateOutcome {
    let query = match Query::new(namespace, rule, input) {
        Ok(q) => q,
        Err(e) => return PredicateOutcome::Failure(e),
    };
    let values = match rules.evaluate(&query) {
        Ok(v) => v,
        Err(e) => return PredicateOutcome::Failure(EvalError::Engine(e)),
    };
    match extract_messages(rule, values) {
        Ok(messages) => PredicateOutcome::Messages(messages),
        Err(e) => PredicateOutcome::Failure(e),
    }
}

/// Pull message strings out of a rule's result values.
///
/// Each non-empty list contributes one message per element, and every element must be
/// a string. Values that are not lists (a boolean helper, an object) carry no messages.
pub fn extract_messages(rule: &str, values: Vec<Value>) -> Result<Vec<String>, EvalError> {
    let mut messages = Vec::new();
    for value in values {
        let Value::Array(items) = value else { continue };
        for item in items {
            match item {
                Value::String(s) => messages.push(s),
                other => {
                    return Err(EvalError::NonStringMessage {
                        rule: rule.to_string(),
                        found: other.to_string(),
                    });
                }
            }
        }
    }
    Ok(messages)
}

use serde_json::Value;

use crate::error::EvalError;

/// A fully qualified rule reference with its bound input document.
///
/// Built once per (document part, rule) pair and consumed by [`crate::RuleSet::evaluate`].
#[derive(Clone, Debug, PartialEq)]
pub struct Query<'a> {
    /// `data.<namespace>.<rule>`
    pub path: String,
    pub input: &'a Value,
}

/// Build `data.<namespace>.<rule>`.
///
/// The namespace may be dotted (`k8s.apps`); every segment and the rule name must be
/// plain identifiers, otherwise the reference cannot be expressed as a query.
pub fn build_query(namespace: &str, rule: &str) -> Result<String, EvalError> {
    let path = format!("data.{namespace}.{rule}");

    if namespace.is_empty() {
        return Err(EvalError::InvalidQuery {
            query: path,
            reason: "namespace is empty".to_string(),
        });
    }
    if let Some(bad) = namespace.split('.').find(|s| !is_identifier(s)) {
        return Err(EvalError::InvalidQuery {
            query: path,
            reason: format!("namespace segment {bad:?} is not an identifier"),
        });
    }
    if !is_identifier(rule) {
        return Err(EvalError::InvalidQuery {
            query: path,
            reason: format!("rule name {rule:?} is not an identifier"),
        });
    }

    Ok(path)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl<'a> Query<'a> {
    pub fn new(namespace: &str, rule: &str, input: &'a Value) -> Result<Self, EvalError> {
        Ok(Self {
            path: build_query(namespace, rule)?,
            input,
        })
    }
}

use crate::cancel::CancelToken;
use crate::classify::Predicates;
use crate::error::EngineError;
use crate::model::{DocumentPart, RuleName};
use crate::query::Query;
use crate::ruleset::RuleSet;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::BTreeMap;

type Answer = Result<Vec<Value>, EngineError>;

/// In-memory rule-set: canned answers per query path, and a log of what was asked.
#[derive(Default)]
pub struct StaticRuleSet {
    names: Vec<RuleName>,
    answers: BTreeMap<String, Answer>,
    log: RefCell<Vec<(String, Value)>>,
    cancel_after: Option<(usize, CancelToken)>,
}

impl StaticRuleSet {
    pub fn with_rules(names: &[&str]) -> Self {
        Self {
            names: names.iter().map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn with(mut self, path: &str, answer: Answer) -> Self {
        self.answers.insert(path.to_string(), answer);
        self
    }

    /// Cancel `token` once `n` evaluations have run.
    pub fn cancel_after(mut self, n: usize, token: CancelToken) -> Self {
        self.cancel_after = Some((n, token));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.log.borrow().iter().map(|(q, _)| q.clone()).collect()
    }

    pub fn inputs(&self) -> Vec<Value> {
        self.log.borrow().iter().map(|(_, i)| i.clone()).collect()
    }
}

impl RuleSet for StaticRuleSet {
    fn rule_names(&self) -> Vec<RuleName> {
        self.names.clone()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Vec<Value>, EngineError> {
        self.log
            .borrow_mut()
            .push((query.path.clone(), query.input.clone()));
        if let Some((n, token)) = &self.cancel_after
            && self.log.borrow().len() >= *n
        {
            token.cancel();
        }
        self.answers
            .get(&query.path)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn parts(n: usize) -> Vec<DocumentPart> {
    (0..n)
        .map(|i| DocumentPart::new(i, json!({ "index": i })))
        .collect()
}

pub fn predicates(denials: &[&str], warnings: &[&str]) -> Predicates {
    Predicates {
        denials: denials.iter().map(|s| s.to_string()).collect(),
        warnings: warnings.iter().map(|s| s.to_string()).collect(),
    }
}

use serde_json::Value;

use crate::error::EngineError;
use crate::model::RuleName;
use crate::query::Query;

/// A compiled, read-only rule-set.
///
/// This is the seam to the external policy engine. Implementations must not observe
/// input from one evaluation in another: each query carries its own input document.
pub trait RuleSet {
    /// Top-level rule names: module by module, each module's rules in source order.
    fn rule_names(&self) -> Vec<RuleName>;

    /// Evaluate `query` and return the value of every expression of every result.
    ///
    /// An undefined rule yields an empty vector, not an error.
    fn evaluate(&self, query: &Query<'_>) -> Result<Vec<Value>, EngineError>;
}

impl<R: RuleSet + ?Sized> RuleSet for &R {
    fn rule_names(&self) -> Vec<RuleName> {
        (**self).rule_names()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Vec<Value>, EngineError> {
        (**self).evaluate(query)
    }
}

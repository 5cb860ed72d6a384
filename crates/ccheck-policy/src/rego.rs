use ccheck_domain::{EngineError, Query, RuleName, RuleSet};
use regorus::unstable::{Expr, Module, Rule, RuleHead};
use regorus::{Engine, Value};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::catalog::{Diagnostic, PolicyCompiler, PolicyModule};

/// [`PolicyCompiler`] backed by the `regorus` Rego interpreter.
#[derive(Clone, Debug, Default)]
pub struct RegoCompiler;

impl RegoCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl PolicyCompiler for RegoCompiler {
    type RuleSet = RegoRuleSet;

    fn parse(&self, name: &str, source: &str) -> Result<PolicyModule, String> {
        let mut engine = Engine::new();
        let package = engine
            .add_policy(name.to_string(), source.to_string())
            .map_err(|e| e.to_string())?;

        let rules = engine
            .get_modules()
            .first()
            .map(|module| rule_heads(module))
            .unwrap_or_default();

        Ok(PolicyModule {
            name: name.to_string(),
            source: source.to_string(),
            package: package
                .strip_prefix("data.")
                .unwrap_or(&package)
                .to_string(),
            rules,
        })
    }

    fn compile(&self, modules: Vec<PolicyModule>) -> Result<RegoRuleSet, Vec<Diagnostic>> {
        let mut engine = Engine::new();
        let mut diagnostics = Vec::new();

        for module in &modules {
            if let Err(e) = engine.add_policy(module.name.clone(), module.source.clone()) {
                diagnostics.push(Diagnostic::new(Some(module.name.clone()), e.to_string()));
            }
        }
        if !diagnostics.is_empty() {
            return Err(diagnostics);
        }

        // A trivial query runs the engine's static analysis over every module (unsafe
        // variables, imports, function arity) without evaluating any rule.
        if let Err(e) = engine.eval_query("true".to_string(), false) {
            let message = e.to_string();
            return Err(vec![Diagnostic::new(blame(&modules, &message), message)]);
        }

        Ok(RegoRuleSet {
            engine,
            rules: modules.into_iter().flat_map(|m| m.rules).collect(),
        })
    }
}

/// Top-level rule names of one parsed module, in declaration order, each listed once.
fn rule_heads(module: &Module) -> Vec<RuleName> {
    let mut names: Vec<RuleName> = Vec::new();
    for rule in &module.policy {
        let refr = match &**rule {
            Rule::Spec { head, .. } => match head {
                RuleHead::Compr { refr, .. }
                | RuleHead::Set { refr, .. }
                | RuleHead::Func { refr, .. } => refr,
            },
            Rule::Default { refr, .. } => refr,
        };
        if let Some(name) = head_name(refr)
            && !names.iter().any(|n| n == name)
        {
            names.push(name.to_string());
        }
    }
    names
}

/// `a.b["c"]` names the top-level rule `a`.
fn head_name(mut expr: &Expr) -> Option<&str> {
    loop {
        match expr {
            Expr::Var { span, .. } => return Some(span.text()),
            Expr::RefDot { refr, .. } | Expr::RefBrack { refr, .. } => expr = &**refr,
            _ => return None,
        }
    }
}

/// Engine errors point at `--> <file>:<line>:<col>`.
fn blame(modules: &[PolicyModule], message: &str) -> Option<String> {
    modules
        .iter()
        .find(|m| message.contains(&format!("--> {}:", m.name)))
        .map(|m| m.name.clone())
}

/// Compiled Rego policies. Each evaluation runs on its own copy of the engine.
#[derive(Clone)]
pub struct RegoRuleSet {
    engine: Engine,
    rules: Vec<RuleName>,
}

impl std::fmt::Debug for RegoRuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegoRuleSet")
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

impl RuleSet for RegoRuleSet {
    fn rule_names(&self) -> Vec<RuleName> {
        self.rules.clone()
    }

    fn evaluate(&self, query: &Query<'_>) -> Result<Vec<JsonValue>, EngineError> {
        let input = serde_json::to_string(query.input)
            .map_err(|e| EngineError::new(format!("unable to encode input: {e}")))?;
        let input = Value::from_json_str(&input).map_err(|e| EngineError::new(e.to_string()))?;

        let mut engine = self.engine.clone();
        engine.set_input(input);
        let results = engine
            .eval_query(query.path.clone(), false)
            .map_err(|e| EngineError::new(e.to_string()))?;

        let mut values = Vec::new();
        for result in results.result {
            for expression in result.expressions {
                if matches!(expression.value, Value::Undefined) {
                    continue;
                }
                let value = serde_json::to_value(&expression.value)
                    .map_err(|e| EngineError::new(format!("unable to decode result: {e}")))?;
                values.push(value);
            }
        }

        trace!(query = %query.path, results = values.len(), "evaluated query");
        Ok(values)
    }
}

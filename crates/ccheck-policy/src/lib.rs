//! Policy adapters: discover `.rego` files, parse them, and compile them as one unit.
//!
//! This crate is allowed to do filesystem IO. The compiled rule-set is handed to the
//! domain layer through the [`ccheck_domain::RuleSet`] trait.

#![forbid(unsafe_code)]

mod catalog;
mod discover;
mod rego;

pub use catalog::{
    build_catalog, build_catalog_with, CatalogError, Diagnostic, PolicyCatalog, PolicyCompiler,
    PolicyModule,
};
pub use discover::{discover_policy_files, POLICY_SUFFIX};
pub use rego::{RegoCompiler, RegoRuleSet};

/// Fuzz-friendly API for testing module parsing without filesystem access.
pub mod fuzz {
    use crate::catalog::PolicyCompiler;

    /// Parse arbitrary text as a Rego module and count its rule heads. **Never panics**
    /// on any input.
    pub fn rule_heads(text: &str) -> usize {
        crate::rego::RegoCompiler::new()
            .parse("fuzz.rego", text)
            .map(|module| module.rules.len())
            .unwrap_or(0)
    }
}

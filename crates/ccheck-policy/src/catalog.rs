use std::fmt;

use camino::{Utf8Path, Utf8PathBuf};
use ccheck_domain::{RuleName, RuleSet};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::discover::discover_policy_files;
use crate::rego::{RegoCompiler, RegoRuleSet};

/// One parsed policy module, ready for batch compilation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyModule {
    /// Module name: the policy file's name.
    pub name: String,
    pub source: String,
    /// Declared package without the `data.` prefix, e.g. `main`.
    pub package: String,
    pub rules: Vec<RuleName>,
}

/// A compiler diagnostic, optionally tied to the module that caused it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub module: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(module: Option<String>, message: impl Into<String>) -> Self {
        Self {
            module,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.module {
            Some(module) => write!(f, "{module}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("error loading policies from {path}: {source}")]
    Access {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error listing policy directory {path}: {source}")]
    Walk {
        path: Utf8PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("unable to read policy file {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse policy file {path}: {message}")]
    Parse { path: Utf8PathBuf, message: String },

    #[error("unable to compile policies:{}", render_diagnostics(.diagnostics))]
    Compile { diagnostics: Vec<Diagnostic> },
}

fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics.iter().map(|d| format!("\n  {d}")).collect()
}

/// Turns parsed modules into an executable rule-set.
///
/// `compile` receives every module at once, so cross-module references resolve and all
/// diagnostics can be reported together.
pub trait PolicyCompiler {
    type RuleSet: RuleSet;

    /// Parse one module in isolation. The error message is reported against the file.
    fn parse(&self, name: &str, source: &str) -> Result<PolicyModule, String>;

    /// Compile the whole batch. On failure the returned list is never empty.
    fn compile(&self, modules: Vec<PolicyModule>) -> Result<Self::RuleSet, Vec<Diagnostic>>;
}

/// Compiled policies plus where they came from.
#[derive(Debug)]
pub struct PolicyCatalog<R> {
    pub source: Utf8PathBuf,
    pub files: Vec<Utf8PathBuf>,
    packages: Vec<String>,
    rule_set: R,
}

impl<R: RuleSet> PolicyCatalog<R> {
    pub fn rule_set(&self) -> &R {
        &self.rule_set
    }

    pub fn rule_names(&self) -> Vec<RuleName> {
        self.rule_set.rule_names()
    }

    /// Distinct packages declared by the catalog's modules, in file order.
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn declares_package(&self, package: &str) -> bool {
        self.packages.iter().any(|p| p == package)
    }
}

/// Build a catalog from a policy file or directory using the Rego engine.
pub fn build_catalog(path: &Utf8Path) -> Result<PolicyCatalog<RegoRuleSet>, CatalogError> {
    build_catalog_with(path, &RegoCompiler::new())
}

/// Build a catalog with an explicit compiler.
///
/// Any read, parse, or compile failure aborts the build; nothing is evaluated against a
/// partial catalog.
pub fn build_catalog_with<C: PolicyCompiler>(
    path: &Utf8Path,
    compiler: &C,
) -> Result<PolicyCatalog<C::RuleSet>, CatalogError> {
    let files = discover_policy_files(path)?;
    if files.is_empty() {
        warn!(path = %path, "no policy files found; every input will pass");
    }

    let mut modules = Vec::with_capacity(files.len());
    for file in &files {
        let source = std::fs::read_to_string(file).map_err(|source| CatalogError::Read {
            path: file.clone(),
            source,
        })?;
        let name = file.file_name().unwrap_or(file.as_str());
        let module = compiler
            .parse(name, &source)
            .map_err(|message| CatalogError::Parse {
                path: file.clone(),
                message,
            })?;
        debug!(
            module = %module.name,
            package = %module.package,
            rules = module.rules.len(),
            "parsed policy module"
        );
        modules.push(module);
    }

    let mut packages: Vec<String> = Vec::new();
    for module in &modules {
        if !packages.contains(&module.package) {
            packages.push(module.package.clone());
        }
    }

    let rule_set = compiler
        .compile(modules)
        .map_err(|diagnostics| CatalogError::Compile { diagnostics })?;

    info!(path = %path, files = files.len(), "policy catalog ready");
    Ok(PolicyCatalog {
        source: path.to_path_buf(),
        files,
        packages,
        rule_set,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccheck_domain::{EngineError, Query};
    use serde_json::Value;
    use std::cell::Cell;
    use tempfile::TempDir;

    #[derive(Debug)]
    struct NamesOnly(Vec<RuleName>);

    impl RuleSet for NamesOnly {
        fn rule_names(&self) -> Vec<RuleName> {
            self.0.clone()
        }

        fn evaluate(&self, _query: &Query<'_>) -> Result<Vec<Value>, EngineError> {
            Ok(Vec::new())
        }
    }

    /// Every non-empty line is a rule name, except `package <name>`. `?` fails parsing, a
    /// `!` rule fails compilation.
    #[derive(Default)]
    struct LineCompiler {
        batches: Cell<usize>,
    }

    impl PolicyCompiler for LineCompiler {
        type RuleSet = NamesOnly;

        fn parse(&self, name: &str, source: &str) -> Result<PolicyModule, String> {
            if source.contains('?') {
                return Err("unexpected '?'".to_string());
            }
            let package = source
                .lines()
                .find_map(|l| l.strip_prefix("package "))
                .unwrap_or("main");
            Ok(PolicyModule {
                name: name.to_string(),
                source: source.to_string(),
                package: package.to_string(),
                rules: source
                    .lines()
                    .filter(|l| !l.is_empty() && !l.starts_with("package "))
                    .map(String::from)
                    .collect(),
            })
        }

        fn compile(&self, modules: Vec<PolicyModule>) -> Result<NamesOnly, Vec<Diagnostic>> {
            self.batches.set(self.batches.get() + 1);
            let diagnostics: Vec<Diagnostic> = modules
                .iter()
                .filter(|m| m.rules.iter().any(|r| r.starts_with('!')))
                .map(|m| Diagnostic::new(Some(m.name.clone()), "bang rule"))
                .collect();
            if !diagnostics.is_empty() {
                return Err(diagnostics);
            }
            Ok(NamesOnly(modules.into_iter().flat_map(|m| m.rules).collect()))
        }
    }

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    #[test]
    fn compiles_all_modules_in_one_batch_in_file_order() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        std::fs::write(root.join("b.rego"), "warn_b\n").expect("write");
        std::fs::write(root.join("a.rego"), "deny_a\nhelper\n").expect("write");

        let compiler = LineCompiler::default();
        let catalog = build_catalog_with(&root, &compiler).expect("catalog");

        assert_eq!(compiler.batches.get(), 1);
        assert_eq!(catalog.rule_names(), vec!["deny_a", "helper", "warn_b"]);
        assert_eq!(catalog.files.len(), 2);
    }

    #[test]
    fn parse_failure_names_the_file_and_skips_compilation() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        std::fs::write(root.join("bad.rego"), "deny ?\n").expect("write");

        let compiler = LineCompiler::default();
        let err = build_catalog_with(&root, &compiler).unwrap_err();

        assert!(matches!(err, CatalogError::Parse { .. }));
        assert!(err.to_string().contains("bad.rego"));
        assert_eq!(compiler.batches.get(), 0);
    }

    #[test]
    fn compile_failure_reports_every_diagnostic() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        std::fs::write(root.join("one.rego"), "!x\n").expect("write");
        std::fs::write(root.join("two.rego"), "!y\n").expect("write");

        let err = build_catalog_with(&root, &LineCompiler::default()).unwrap_err();
        let CatalogError::Compile { diagnostics } = &err else {
            panic!("expected compile error, got {err:?}");
        };
        assert_eq!(diagnostics.len(), 2);
        let text = err.to_string();
        assert!(text.contains("one.rego: bang rule"));
        assert!(text.contains("two.rego: bang rule"));
    }

    #[test]
    fn records_each_declared_package_once() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        std::fs::write(root.join("a.rego"), "package lib\nhelper\n").expect("write");
        std::fs::write(root.join("b.rego"), "package main\ndeny_b\n").expect("write");
        std::fs::write(root.join("c.rego"), "package lib\nother\n").expect("write");

        let catalog = build_catalog_with(&root, &LineCompiler::default()).expect("catalog");
        assert_eq!(catalog.packages(), ["lib", "main"]);
        assert!(catalog.declares_package("main"));
        assert!(!catalog.declares_package("k8s"));
    }

    #[test]
    fn empty_directory_builds_an_empty_catalog() {
        let tmp = TempDir::new().expect("temp dir");
        let catalog = build_catalog_with(&utf8_root(&tmp), &LineCompiler::default())
            .expect("catalog");
        assert!(catalog.rule_names().is_empty());
    }
}

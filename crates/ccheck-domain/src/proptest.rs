//! Property-based tests for the domain crate.
//!
//! Properties covered:
//! - Rule-name classification determinism
//! - Evaluation counts across parts and predicates
//! - Clean results when no rule reports anything

use crate::aggregate::aggregate;
use crate::cancel::CancelToken;
use crate::classify::PredicateClassifier;
use crate::dispatch::dispatch;
use crate::ruleset::RuleSet;
use crate::test_support::{parts, StaticRuleSet};
use proptest::prelude::*;

/// Rule names across the three shapes: denial, warning, helper.
fn arb_rule_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("deny".to_string()),
        Just("warn".to_string()),
        "deny_[a-z0-9_]{1,12}",
        "warn_[a-z0-9_]{1,12}",
        "[a-z][a-z0-9_]{0,12}",
    ]
}

/// `prefix` alone, or `prefix_` followed by at least one more character.
fn is_convention(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.len() > 1 && rest.starts_with('_'),
        None => false,
    }
}

proptest! {
    #[test]
    fn classification_is_idempotent_and_order_preserving(
        names in prop::collection::vec(arb_rule_name(), 0..40)
    ) {
        let classifier = PredicateClassifier::new().unwrap();
        let first = classifier.classify(&names);
        let second = classifier.classify(&names);
        prop_assert_eq!(&first, &second);

        let expected_denials: Vec<_> = names
            .iter()
            .filter(|n| is_convention(n, "deny"))
            .cloned()
            .collect();
        let expected_warnings: Vec<_> = names
            .iter()
            .filter(|n| is_convention(n, "warn"))
            .cloned()
            .collect();
        prop_assert_eq!(first.denials, expected_denials);
        prop_assert_eq!(first.warnings, expected_warnings);
    }

    #[test]
    fn evaluation_count_is_parts_times_predicates(
        names in prop::collection::vec(arb_rule_name(), 0..20),
        k in 1usize..6,
    ) {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let rules = StaticRuleSet::with_rules(&refs);
        let predicates = PredicateClassifier::new().unwrap().classify(&rules.rule_names());

        let evals = dispatch(&rules, "main", &predicates, &parts(k), &CancelToken::new()).unwrap();

        prop_assert_eq!(evals.len(), k * predicates.len());
        prop_assert_eq!(rules.queries().len(), k * predicates.len());
    }

    #[test]
    fn silent_rules_give_clean_results(
        names in prop::collection::vec(arb_rule_name(), 0..20),
        k in 1usize..4,
    ) {
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let rules = StaticRuleSet::with_rules(&refs);
        let predicates = PredicateClassifier::new().unwrap().classify(&rules.rule_names());

        let evals = dispatch(&rules, "main", &predicates, &parts(k), &CancelToken::new()).unwrap();
        prop_assert!(aggregate(evals).is_clean());
    }
}

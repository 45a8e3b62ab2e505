// sanitizers-core/tests/registry_tests.rs
use anyhow::Result;

use sanitizers_core::{rule_fn, same_rule, Registry, RuleRef, SanitizeError};

fn noop(label: &str) -> RuleRef {
    rule_fn(label, |_, _| Ok(()))
}

/// Returns the (handle, weight) pairs of a chain in execution order.
fn chain(registry: &Registry, name: &str) -> Vec<(RuleRef, i64)> {
    registry.sanitizers()[name]
        .iter()
        .map(|e| (e.rule().clone(), e.weight()))
        .collect()
}

fn assert_chain(registry: &Registry, name: &str, expected: &[(&RuleRef, i64)]) {
    let actual = chain(registry, name);
    assert_eq!(actual.len(), expected.len(), "chain '{}' length", name);
    for (i, ((rule, weight), (expected_rule, expected_weight))) in
        actual.iter().zip(expected.iter()).enumerate()
    {
        assert!(
            same_rule(rule, expected_rule),
            "chain '{}' position {} holds '{}'",
            name,
            i,
            rule.label()
        );
        assert_eq!(weight, expected_weight, "chain '{}' position {} weight", name, i);
    }
}

#[test]
fn test_register_new_sanitizer() {
    let mut registry = Registry::new();
    let s = noop("s");
    registry.register("test", s.clone());
    assert_chain(&registry, "test", &[(&s, 0)]);
}

#[test]
fn test_register_multiple_callbacks_keeps_registration_order() {
    let mut registry = Registry::new();
    let (s1, s2, s3) = (noop("s1"), noop("s2"), noop("s3"));
    registry.register("test", s1.clone());
    registry.register("test", s2.clone());
    registry.register("test", s3.clone());
    assert_chain(&registry, "test", &[(&s1, 0), (&s2, 0), (&s3, 0)]);
}

#[test]
fn test_multiple_callbacks_sorted_by_weight() {
    let mut registry = Registry::new();
    let (s1, s2, s3) = (noop("s1"), noop("s2"), noop("s3"));
    registry.register_with_weight("test", s1.clone(), 10);
    registry.register_with_weight("test", s2.clone(), -10);
    registry.register("test", s3.clone());
    assert_chain(&registry, "test", &[(&s2, -10), (&s3, 0), (&s1, 10)]);
}

#[test]
fn test_ties_stay_stable_across_later_sorts() {
    let mut registry = Registry::new();
    let rules: Vec<RuleRef> = (0..6).map(|i| noop(&format!("r{}", i))).collect();
    let weights = [5, 1, 5, 1, 5, 1];
    for (rule, weight) in rules.iter().zip(weights) {
        registry.register_with_weight("test", rule.clone(), weight);
    }
    assert_chain(
        &registry,
        "test",
        &[
            (&rules[1], 1),
            (&rules[3], 1),
            (&rules[5], 1),
            (&rules[0], 5),
            (&rules[2], 5),
            (&rules[4], 5),
        ],
    );
}

#[test]
fn test_names_are_case_sensitive() {
    let mut registry = Registry::new();
    registry.register("Email", noop("a"));
    assert!(registry.registered("Email"));
    assert!(!registry.registered("email"));
}

#[test]
fn test_registered_false_before_registration() {
    let registry = Registry::new();
    assert!(!registry.registered("test"));
}

#[test]
fn test_registered_false_when_registered_but_empty() -> Result<()> {
    let mut registry = Registry::new();
    registry.register("test", noop("s"));
    registry.unregister("test", None)?;
    assert!(!registry.registered("test"));
    Ok(())
}

#[test]
fn test_registered_true_after_registration() {
    let mut registry = Registry::new();
    registry.register("test", noop("s"));
    assert!(registry.registered("test"));
}

#[test]
fn test_unregister_unknown_sanitizer_fails() {
    let mut registry = Registry::new();
    let err = registry.unregister("test", None).unwrap_err();
    assert!(matches!(err, SanitizeError::UnknownSanitizer(ref name) if name == "test"));

    let err = registry.unregister("test", Some(&noop("s"))).unwrap_err();
    assert!(err.is_unknown_sanitizer());
}

#[test]
fn test_unregister_all() -> Result<()> {
    let mut registry = Registry::new();
    registry
        .register_with_weight("test", noop("s1"), 10)
        .register_with_weight("test", noop("s2"), -10)
        .register("test", noop("s3"));

    registry.unregister("test", None)?;
    assert!(registry.sanitizers()["test"].is_empty());
    Ok(())
}

#[test]
fn test_unregister_specified_callback() -> Result<()> {
    let mut registry = Registry::new();
    let (s1, s2, s3) = (noop("s1"), noop("s2"), noop("s3"));
    registry
        .register_with_weight("test", s1.clone(), 10)
        .register_with_weight("test", s2.clone(), -10)
        .register("test", s3.clone());

    registry.unregister("test", Some(&s2))?;
    assert_chain(&registry, "test", &[(&s3, 0), (&s1, 10)]);
    Ok(())
}

#[test]
fn test_unregister_specified_callback_duplicates() -> Result<()> {
    let mut registry = Registry::new();
    let (s1, s2, s3) = (noop("s1"), noop("s2"), noop("s3"));
    registry
        .register_with_weight("test", s1.clone(), 10)
        .register_with_weight("test", s2.clone(), -10)
        .register("test", s3.clone())
        .register_with_weight("test", s2.clone(), 90);

    registry.unregister("test", Some(&s2))?;
    assert_chain(&registry, "test", &[(&s3, 0), (&s1, 10)]);
    Ok(())
}

#[test]
fn test_unregister_leaves_other_chains_alone() -> Result<()> {
    let mut registry = Registry::with_builtins();
    let shared = noop("shared");
    registry.register("a", shared.clone()).register("b", shared.clone());

    registry.unregister("a", Some(&shared))?;
    assert!(!registry.registered("a"));
    assert!(registry.registered("b"));
    assert!(registry.registered("trim"));
    Ok(())
}

#[test]
fn test_register_after_clear_reuses_the_name() -> Result<()> {
    let mut registry = Registry::new();
    let s = noop("s");
    registry.register("test", noop("old"));
    registry.unregister("test", None)?;
    registry.register("test", s.clone());
    assert_chain(&registry, "test", &[(&s, 0)]);
    Ok(())
}

#[test]
fn test_summary_serializes_to_json() -> Result<()> {
    let mut registry = Registry::with_builtins();
    registry.register_with_weight("email", noop("lowercase"), 3);
    let json = serde_json::to_value(registry.summary())?;
    assert_eq!(
        json,
        serde_json::json!([
            {"name": "email", "rules": [{"rule": "lowercase", "weight": 3}]},
            {"name": "trim", "rules": [{"rule": "trim", "weight": 0}]}
        ])
    );
    Ok(())
}

// sanitizers-core/tests/trim_tests.rs
use anyhow::Result;
use serde_json::json;

use sanitizers_core::rules::trim_rule;
use sanitizers_core::{sanitize_blocking, Registry, SanitizeError};

#[test]
fn test_trim_is_available() {
    assert!(Registry::with_builtins().registered("trim"));
    assert!(Registry::default().registered("trim"));
}

#[tokio::test]
async fn test_trim_rejects_non_strings() {
    let registry = Registry::with_builtins();
    let err = registry.sanitize("trim", json!(false)).await.unwrap_err();
    match err {
        SanitizeError::InvalidValue { value, name } => {
            assert_eq!(value, json!(false));
            assert_eq!(name, "trim");
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[tokio::test]
async fn test_trim_trims_value() -> Result<()> {
    let registry = Registry::with_builtins();
    let value = registry.sanitize("trim", json!(" john doe  ")).await?;
    assert_eq!(value, json!("john doe"));
    Ok(())
}

#[tokio::test]
async fn test_trim_reports_the_chain_name_it_runs_in() {
    let mut registry = Registry::new();
    registry.register("username", trim_rule());
    let err = registry.sanitize("username", json!(42)).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "The value \"42\" is not a supported type for the sanitizer \"username\"."
    );
}

#[test]
fn test_builtin_trim_can_be_removed_by_handle() -> Result<()> {
    let mut registry = Registry::with_builtins();
    registry.unregister("trim", Some(&trim_rule()))?;
    assert!(!registry.registered("trim"));
    let err = sanitize_blocking(&registry, "trim", json!(" x ")).unwrap_err();
    assert!(err.is_unknown_sanitizer());
    Ok(())
}

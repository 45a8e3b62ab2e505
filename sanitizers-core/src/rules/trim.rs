// File: sanitizers-core/src/rules/trim.rs
//! Strips leading and trailing whitespace from string values.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::Arc;

use crate::context::SanitizeContext;
use crate::errors::SanitizeError;
use crate::rule::{Rule, RuleRef};

#[derive(Debug, Default, Clone, Copy)]
pub struct TrimRule;

#[async_trait]
impl Rule for TrimRule {
    async fn apply(&self, name: &str, ctx: &mut SanitizeContext) -> Result<(), SanitizeError> {
        let Value::String(s) = ctx.value() else {
            return Err(SanitizeError::InvalidValue {
                value: ctx.value().clone(),
                name: name.to_string(),
            });
        };

        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            let trimmed = trimmed.to_string();
            ctx.set_value(Value::String(trimmed));
        }
        Ok(())
    }

    fn label(&self) -> &str {
        "trim"
    }
}

static TRIM: Lazy<RuleRef> = Lazy::new(|| Arc::new(TrimRule));

/// The handle registered under `"trim"` by every built-in registry.
///
/// Passing this handle to `unregister` removes the built-in entry.
pub fn trim_rule() -> RuleRef {
    Arc::clone(&TRIM)
}

//! rule.rs - The contract every step of a sanitizer chain implements.
//!
//! A rule receives the name of the chain it is running in and the mutable
//! [`SanitizeContext`]. Returning `Ok(())` hands the context to the next rule;
//! returning an error ends the chain. A rule that panics is treated exactly
//! like one that returned an error.
//!
//! License: MIT OR APACHE 2.0

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::context::SanitizeContext;
use crate::errors::SanitizeError;

/// A single transformation or validation step within a chain.
#[async_trait]
pub trait Rule: Send + Sync {
    /// Applies the rule to `ctx`.
    ///
    /// # Arguments
    /// * `name` - The name of the chain being executed, for error reporting.
    /// * `ctx` - The context; `ctx.value()` is the output of the previous rule.
    async fn apply(&self, name: &str, ctx: &mut SanitizeContext) -> Result<(), SanitizeError>;

    /// A short name for logs and chain summaries.
    fn label(&self) -> &str {
        "anonymous"
    }
}

/// Shared handle to a rule. Registry entries compare by handle identity.
pub type RuleRef = Arc<dyn Rule>;

/// Two handles are the same rule when they point at the same allocation.
pub fn same_rule(a: &RuleRef, b: &RuleRef) -> bool {
    Arc::ptr_eq(a, b)
}

/// Adapts a synchronous closure into a [`Rule`].
pub struct FnRule<F> {
    label: String,
    func: F,
}

impl<F> fmt::Debug for FnRule<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule").field("label", &self.label).finish()
    }
}

#[async_trait]
impl<F> Rule for FnRule<F>
where
    F: Fn(&str, &mut SanitizeContext) -> Result<(), SanitizeError> + Send + Sync,
{
    async fn apply(&self, name: &str, ctx: &mut SanitizeContext) -> Result<(), SanitizeError> {
        (self.func)(name, ctx)
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Wraps `func` in a shareable rule handle.
///
/// ```rust
/// use sanitizers_core::{rule_fn, Registry};
/// use serde_json::Value;
///
/// let upper = rule_fn("uppercase", |_name, ctx| {
///     if let Value::String(s) = ctx.value_mut() {
///         *s = s.to_uppercase();
///     }
///     Ok(())
/// });
/// let mut registry = Registry::new();
/// registry.register("shout", upper);
/// assert!(registry.registered("shout"));
/// ```
pub fn rule_fn<F>(label: impl Into<String>, func: F) -> RuleRef
where
    F: Fn(&str, &mut SanitizeContext) -> Result<(), SanitizeError> + Send + Sync + 'static,
{
    Arc::new(FnRule {
        label: label.into(),
        func,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn fn_rule_runs_closure() {
        let rule = rule_fn("double", |_, ctx| {
            let n = ctx.value().as_i64().unwrap_or_default();
            ctx.set_value(json!(n * 2));
            Ok(())
        });
        let mut ctx = SanitizeContext::new(json!(21));
        rule.apply("math", &mut ctx).await.unwrap();
        assert_eq!(ctx.value(), &json!(42));
        assert_eq!(rule.label(), "double");
    }

    #[test]
    fn identity_is_by_handle() {
        let a = rule_fn("noop", |_, _| Ok(()));
        let b = rule_fn("noop", |_, _| Ok(()));
        assert!(same_rule(&a, &a.clone()));
        assert!(!same_rule(&a, &b));
    }
}

//! pipeline.rs - Sequential execution of a sanitizer chain.
//!
//! A [`SanitizePlan`] is a snapshot of one chain's entries taken from the
//! registry. Executing it builds a fresh [`SanitizeContext`] and awaits each
//! rule in weight order, one at a time. The first rule to fail, by returning
//! an error or by panicking, ends the chain and its error is returned; the
//! partially sanitized value is discarded.
//!
//! License: MIT OR APACHE 2.0

use futures_util::FutureExt;
use log::{debug, trace};
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;

use crate::context::SanitizeContext;
use crate::errors::SanitizeError;
use crate::registry::Entry;

/// An ordered, owned list of rules ready to run against a value.
#[derive(Debug, Clone)]
pub struct SanitizePlan {
    name: String,
    entries: Vec<Entry>,
}

impl SanitizePlan {
    /// Builds a plan from entries already sorted by weight.
    pub(crate) fn new(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every rule in order against `value`.
    ///
    /// # Errors
    /// The first error returned by a rule, or [`SanitizeError::RulePanicked`]
    /// if a rule panics. Rules after the failing one are never invoked.
    pub async fn execute(self, value: Value) -> Result<Value, SanitizeError> {
        let mut ctx = SanitizeContext::new(value);
        let total = self.entries.len();

        for (index, entry) in self.entries.iter().enumerate() {
            let rule = entry.rule();
            trace!(
                target: "sanitizers_core::pipeline",
                "Sanitizer '{}': running rule {}/{} '{}' (weight {}).",
                self.name,
                index + 1,
                total,
                rule.label(),
                entry.weight()
            );

            // Calling `apply` inside the guarded future also catches rules that
            // panic before handing back their future.
            let step =
                AssertUnwindSafe(async { rule.apply(&self.name, &mut ctx).await }).catch_unwind();
            let outcome = match step.await {
                Ok(result) => result,
                Err(payload) => Err(SanitizeError::RulePanicked {
                    name: self.name.clone(),
                    rule: rule.label().to_string(),
                    message: panic_payload_to_string(&payload),
                }),
            };

            if let Err(e) = outcome {
                debug!(
                    target: "sanitizers_core::pipeline",
                    "Sanitizer '{}' stopped at rule '{}' ({} of {}): {}",
                    self.name,
                    rule.label(),
                    index + 1,
                    total,
                    e
                );
                return Err(e);
            }
        }

        trace!(
            target: "sanitizers_core::pipeline",
            "Sanitizer '{}' completed {} rule(s).",
            self.name,
            total
        );
        Ok(ctx.into_value())
    }
}

fn panic_payload_to_string(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

//! registry.rs - Named, weight-ordered sanitizer chains.
//!
//! The registry maps a chain name to the rules registered under it, each with
//! an integer weight. Lower weights run first; rules with equal weights run in
//! registration order. The registry is an explicit value owned by the host;
//! see [`crate::global`] for the process-wide convenience instance.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::errors::SanitizeError;
use crate::pipeline::SanitizePlan;
use crate::rule::{same_rule, RuleRef};
use crate::rules::trim_rule;

/// One rule registered under a chain name.
#[derive(Clone)]
pub struct Entry {
    rule: RuleRef,
    weight: i64,
}

impl Entry {
    pub fn new(rule: RuleRef, weight: i64) -> Self {
        Self { rule, weight }
    }

    pub fn rule(&self) -> &RuleRef {
        &self.rule
    }

    pub fn weight(&self) -> i64 {
        self.weight
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("rule", &self.rule.label())
            .field("weight", &self.weight)
            .finish()
    }
}

/// A serializable description of one chain, for introspection and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSummary {
    pub name: String,
    pub rules: Vec<ChainSummaryStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainSummaryStep {
    pub rule: String,
    pub weight: i64,
}

/// Maps sanitizer names to their ordered rule entries.
#[derive(Debug, Clone)]
pub struct Registry {
    chains: HashMap<String, Vec<Entry>>,
}

impl Default for Registry {
    /// A registry holding the built-in chains (`"trim"`).
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl Registry {
    /// An empty registry with no chains at all.
    pub fn new() -> Self {
        Self {
            chains: HashMap::new(),
        }
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("trim", trim_rule());
        registry
    }

    /// Registers `rule` under `name` with weight 0.
    pub fn register(&mut self, name: impl Into<String>, rule: RuleRef) -> &mut Self {
        self.register_with_weight(name, rule, 0)
    }

    /// Appends `rule` to the chain `name`, creating the chain if needed, then
    /// re-sorts the chain by weight. Existing entries are never replaced.
    pub fn register_with_weight(
        &mut self,
        name: impl Into<String>,
        rule: RuleRef,
        weight: i64,
    ) -> &mut Self {
        let name = name.into();
        debug!(
            "Registering rule '{}' on sanitizer '{}' with weight {}.",
            rule.label(),
            name,
            weight
        );

        let entries = self.chains.entry(name).or_default();
        entries.push(Entry::new(rule, weight));
        // `sort_by_key` is stable, so equal weights keep registration order.
        entries.sort_by_key(Entry::weight);
        self
    }

    /// True if `name` has at least one entry.
    pub fn registered(&self, name: &str) -> bool {
        self.chains.get(name).is_some_and(|entries| !entries.is_empty())
    }

    /// Removes rules from the chain `name`.
    ///
    /// With `rule == None` the chain is emptied but its name stays known. With
    /// a rule, every entry holding that same handle is removed, whatever its
    /// weight; the other entries keep their order.
    ///
    /// # Errors
    /// [`SanitizeError::UnknownSanitizer`] if `name` was never registered.
    pub fn unregister(
        &mut self,
        name: &str,
        rule: Option<&RuleRef>,
    ) -> Result<&mut Self, SanitizeError> {
        let entries = self
            .chains
            .get_mut(name)
            .ok_or_else(|| SanitizeError::UnknownSanitizer(name.to_string()))?;

        match rule {
            None => {
                debug!("Clearing all {} rule(s) from sanitizer '{}'.", entries.len(), name);
                entries.clear();
            }
            Some(rule) => {
                let before = entries.len();
                entries.retain(|entry| !same_rule(&entry.rule, rule));
                let removed = before - entries.len();
                if removed == 0 {
                    warn!(
                        "Rule '{}' is not registered on sanitizer '{}'; nothing removed.",
                        rule.label(),
                        name
                    );
                } else {
                    debug!(
                        "Removed {} entr{} of rule '{}' from sanitizer '{}'.",
                        removed,
                        if removed == 1 { "y" } else { "ies" },
                        rule.label(),
                        name
                    );
                }
            }
        }
        Ok(self)
    }

    /// The live registry state.
    pub fn sanitizers(&self) -> &HashMap<String, Vec<Entry>> {
        &self.chains
    }

    /// The ordered entries for `name`, if the name is known.
    pub fn entries(&self, name: &str) -> Option<&[Entry]> {
        self.chains.get(name).map(Vec::as_slice)
    }

    /// Snapshots the chain `name` into an execution plan.
    ///
    /// # Errors
    /// [`SanitizeError::UnknownSanitizer`] if the chain is absent or empty.
    pub fn plan(&self, name: &str) -> Result<SanitizePlan, SanitizeError> {
        match self.chains.get(name) {
            Some(entries) if !entries.is_empty() => Ok(SanitizePlan::new(name, entries.clone())),
            _ => {
                debug!("Sanitizer '{}' has no registered rules.", name);
                Err(SanitizeError::UnknownSanitizer(name.to_string()))
            }
        }
    }

    /// Runs `value` through the chain `name` and returns the sanitized value.
    ///
    /// Fails with `UnknownSanitizer` before any rule runs if the chain is
    /// absent or empty; otherwise fails with the first error a rule reports.
    pub async fn sanitize(&self, name: &str, value: Value) -> Result<Value, SanitizeError> {
        self.plan(name)?.execute(value).await
    }

    /// Describes every chain, sorted by name.
    pub fn summary(&self) -> Vec<ChainSummary> {
        let mut out: Vec<ChainSummary> = self
            .chains
            .iter()
            .map(|(name, entries)| ChainSummary {
                name: name.clone(),
                rules: entries
                    .iter()
                    .map(|entry| ChainSummaryStep {
                        rule: entry.rule.label().to_string(),
                        weight: entry.weight,
                    })
                    .collect(),
            })
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

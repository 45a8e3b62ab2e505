//! global.rs - A process-wide registry for hosts that want one shared table.
//!
//! This is a thin wrapper over a single [`Registry`] held behind a lock and
//! seeded with the built-in chains. Everything here can be done with an
//! explicit `Registry` instead, which is what tests and multi-tenant hosts
//! should prefer.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use serde_json::Value;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::SanitizeError;
use crate::registry::Registry;
use crate::rule::RuleRef;

lazy_static! {
    /// The shared registry. Mutations are serialized by the lock; sanitization
    /// only holds the read lock long enough to snapshot a chain.
    static ref GLOBAL_REGISTRY: RwLock<Registry> = RwLock::new(Registry::with_builtins());
}

// Registry operations leave no partial state behind, so a poisoned lock is
// still safe to use.
fn read() -> RwLockReadGuard<'static, Registry> {
    GLOBAL_REGISTRY.read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Registry> {
    GLOBAL_REGISTRY.write().unwrap_or_else(PoisonError::into_inner)
}

/// Handle returned by the mutating functions so calls can be chained, e.g.
/// `global::register("a", r1).register_with_weight("a", r2, 5)`.
///
/// Each call takes the write lock on its own; a chain is not atomic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalRegistry;

impl GlobalRegistry {
    pub fn register(self, name: impl Into<String>, rule: RuleRef) -> Self {
        register(name, rule)
    }

    pub fn register_with_weight(self, name: impl Into<String>, rule: RuleRef, weight: i64) -> Self {
        register_with_weight(name, rule, weight)
    }

    pub fn unregister(self, name: &str, rule: Option<&RuleRef>) -> Result<Self, SanitizeError> {
        unregister(name, rule)
    }
}

pub fn register(name: impl Into<String>, rule: RuleRef) -> GlobalRegistry {
    write().register(name, rule);
    GlobalRegistry
}

pub fn register_with_weight(name: impl Into<String>, rule: RuleRef, weight: i64) -> GlobalRegistry {
    write().register_with_weight(name, rule, weight);
    GlobalRegistry
}

pub fn unregister(name: &str, rule: Option<&RuleRef>) -> Result<GlobalRegistry, SanitizeError> {
    write().unregister(name, rule)?;
    Ok(GlobalRegistry)
}

pub fn registered(name: &str) -> bool {
    read().registered(name)
}

/// Runs `value` through the shared chain `name`.
///
/// The chain is snapshotted before any rule runs, so registrations made while
/// the chain executes apply to later calls only.
pub async fn sanitize(name: &str, value: Value) -> Result<Value, SanitizeError> {
    let plan = read().plan(name)?;
    plan.execute(value).await
}

/// Gives read access to the shared registry.
pub fn with_registry<R>(f: impl FnOnce(&Registry) -> R) -> R {
    f(&read())
}

/// Restores the shared registry to its startup state.
pub fn reset() {
    debug!("Resetting the global sanitizer registry to built-ins.");
    *write() = Registry::with_builtins();
}

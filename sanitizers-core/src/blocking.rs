// File: sanitizers-core/src/blocking.rs

//! `blocking.rs`
//! Convenience wrapper for hosts without an async runtime.
//! Runs a chain to completion on a private current-thread tokio runtime.

use serde_json::Value;

use crate::errors::SanitizeError;
use crate::registry::Registry;

/// Sanitizes `value` with the chain `name`, blocking the calling thread.
///
/// Must not be called from inside a tokio runtime; use
/// [`Registry::sanitize`] there instead.
///
/// # Arguments
///
/// * `registry` - The registry holding the chain.
/// * `name` - The chain to run.
/// * `value` - The value to sanitize.
pub fn sanitize_blocking(
    registry: &Registry,
    name: &str,
    value: Value,
) -> Result<Value, SanitizeError> {
    // Resolve the chain first so an unknown name never spins up a runtime.
    let plan = registry.plan(name)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(plan.execute(value))
}

// sanitizers-core/src/lib.rs
//! # Sanitizers Core Library
//!
//! `sanitizers-core` is an extensible value-sanitization pipeline. Callers register
//! named, weight-ordered rules ("sanitizers") in a [`Registry`], then run a value
//! through a named chain. Each rule sees the output of the previous one; the first
//! failure ends the chain.
//!
//! ## Modules
//!
//! * `registry`: The chain table: registration, weight ordering and removal.
//! * `pipeline`: Sequential, fail-fast execution of one chain.
//! * `context`: The per-call carrier of the original and current value.
//! * `rule`: The [`Rule`] trait and the closure adapter [`rule_fn`].
//! * `rules`: Built-in rules (`trim`).
//! * `config`: YAML chain definitions and the [`RuleCatalog`] they refer to.
//! * `messages`: Templated, localizable error messages.
//! * `global`: A process-wide registry for hosts that want one.
//! * `blocking`: A synchronous wrapper for hosts without an async runtime.
//! * `errors`: The [`SanitizeError`] type.
//!
//! ## Usage Example
//!
//! ```rust
//! use sanitizers_core::{rule_fn, Registry, SanitizeError};
//! use serde_json::{json, Value};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut registry = Registry::with_builtins();
//!
//! // Lowercase after trimming.
//! registry
//!     .register("username", sanitizers_core::rules::trim_rule())
//!     .register_with_weight(
//!         "username",
//!         rule_fn("lowercase", |name, ctx| match ctx.value() {
//!             Value::String(s) => {
//!                 let lower = s.to_lowercase();
//!                 ctx.set_value(Value::String(lower));
//!                 Ok(())
//!             }
//!             other => Err(SanitizeError::InvalidValue {
//!                 value: other.clone(),
//!                 name: name.to_string(),
//!             }),
//!         }),
//!         10,
//!     );
//!
//! let clean = registry.sanitize("username", json!("  John.Doe ")).await.unwrap();
//! assert_eq!(clean, json!("john.doe"));
//!
//! let err = registry.sanitize("missing", json!("x")).await.unwrap_err();
//! assert!(err.is_unknown_sanitizer());
//! # });
//! ```
//!
//! ## Error Handling
//!
//! Chain execution returns `Result<Value, SanitizeError>`. Rules fail by returning an
//! error; a rule that panics is reported as [`SanitizeError::RulePanicked`] and stops
//! the chain the same way. On failure no value is returned. Config loading uses
//! `anyhow::Result` with context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod blocking;
pub mod config;
pub mod context;
pub mod errors;
pub mod global;
pub mod messages;
pub mod pipeline;
pub mod registry;
pub mod rule;
pub mod rules;

/// Re-exports the chain table and its introspection types.
pub use registry::{ChainSummary, ChainSummaryStep, Entry, Registry};

/// Re-exports the execution plan and context.
pub use context::SanitizeContext;
pub use pipeline::SanitizePlan;

/// Re-exports the rule contract.
pub use rule::{rule_fn, same_rule, FnRule, Rule, RuleRef};

/// Re-exports the error type.
pub use errors::SanitizeError;

/// Re-exports configuration and messages.
pub use config::{ChainStep, RuleCatalog, SanitizerConfig};
pub use messages::{MessageCatalog, MessageKey};

pub use blocking::sanitize_blocking;

// sanitizers-core/src/rules/mod.rs
//! Built-in rules shipped with the library.
//!
//! Each rule lives in its own file and implements the [`Rule`](crate::rule::Rule)
//! trait. Built-ins are registered by `Registry::with_builtins` and exposed by
//! name through `RuleCatalog::with_builtins` for config files.

pub mod trim;

pub use trim::{trim_rule, TrimRule};

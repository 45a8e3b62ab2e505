//! errors.rs - Error types for the sanitizers-core library.
//!
//! Every failure a sanitizer chain can produce is a variant of [`SanitizeError`].
//! Rules report failure by returning one of these; the pipeline never retries
//! or swallows them, the first one ends the chain.
//!
//! License: MIT OR APACHE 2.0

use serde_json::Value;
use thiserror::Error;

use crate::messages::{self, MessageCatalog, MessageKey};

/// This enum represents all possible error types in the `sanitizers-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SanitizeError {
    /// The named chain does not exist, or has no entries when executed.
    #[error("{}", self.catalog_text())]
    UnknownSanitizer(String),

    /// A rule's type precondition was not met by the current value.
    #[error("{}", self.catalog_text())]
    InvalidValue { value: Value, name: String },

    /// A custom rule rejected the value.
    #[error("{}", self.catalog_text())]
    RuleFailed { name: String, message: String },

    /// A rule panicked while running.
    #[error("{}", self.catalog_text())]
    RulePanicked {
        name: String,
        rule: String,
        message: String,
    },

    #[error("Invalid sanitizer configuration: {0}")]
    Config(String),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    Other(#[from] anyhow::Error),
}

impl SanitizeError {
    /// Shorthand for a custom rule failure.
    pub fn rule_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RuleFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn is_unknown_sanitizer(&self) -> bool {
        matches!(self, Self::UnknownSanitizer(_))
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValue { .. })
    }

    /// The message key and template parameters for the variants that go through
    /// the message catalog.
    fn message_parts(&self) -> Option<(MessageKey, Vec<(&'static str, Value)>)> {
        match self {
            Self::UnknownSanitizer(name) => Some((
                MessageKey::UnknownSanitizer,
                vec![("name", Value::String(name.clone()))],
            )),
            Self::InvalidValue { value, name } => Some((
                MessageKey::InvalidValue,
                vec![("value", value.clone()), ("name", Value::String(name.clone()))],
            )),
            Self::RuleFailed { name, message } => Some((
                MessageKey::RuleFailed,
                vec![
                    ("name", Value::String(name.clone())),
                    ("message", Value::String(message.clone())),
                ],
            )),
            Self::RulePanicked {
                name,
                rule,
                message,
            } => Some((
                MessageKey::RulePanicked,
                vec![
                    ("name", Value::String(name.clone())),
                    ("rule", Value::String(rule.clone())),
                    ("message", Value::String(message.clone())),
                ],
            )),
            _ => None,
        }
    }

    fn catalog_text(&self) -> String {
        match self.message_parts() {
            Some((key, params)) => messages::default_message(key, &params),
            None => String::new(),
        }
    }

    /// Renders the error through a caller-provided catalog (e.g. a translation).
    ///
    /// Falls back to the default English text when the catalog's template
    /// cannot be rendered.
    pub fn localized(&self, catalog: &MessageCatalog) -> String {
        let Some((key, params)) = self.message_parts() else {
            return self.to_string();
        };
        match catalog.render(key, &params) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("Failed to render localized message '{}': {}", key.as_str(), e);
                self.to_string()
            }
        }
    }
}

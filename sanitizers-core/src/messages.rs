//! messages.rs - Human-readable error messages and their localization.
//!
//! Messages are `tinytemplate` templates keyed by [`MessageKey`]. The built-in
//! catalog holds English text; hosts can override any key (for instance from
//! the `messages` section of a sanitizer config file) to translate them.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use tinytemplate::TinyTemplate;

/// Identifies a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    UnknownSanitizer,
    InvalidValue,
    RuleFailed,
    RulePanicked,
}

impl MessageKey {
    pub const ALL: [MessageKey; 4] = [
        MessageKey::UnknownSanitizer,
        MessageKey::InvalidValue,
        MessageKey::RuleFailed,
        MessageKey::RulePanicked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::UnknownSanitizer => "unknown_sanitizer",
            MessageKey::InvalidValue => "invalid_value",
            MessageKey::RuleFailed => "rule_failed",
            MessageKey::RulePanicked => "rule_panicked",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    fn default_template(&self) -> &'static str {
        match self {
            MessageKey::UnknownSanitizer => "Unknown sanitizer \"{name}\".",
            MessageKey::InvalidValue => {
                "The value \"{value}\" is not a supported type for the sanitizer \"{name}\"."
            }
            MessageKey::RuleFailed => "The sanitizer \"{name}\" rejected the value: {message}",
            MessageKey::RulePanicked => {
                "Rule \"{rule}\" panicked while running sanitizer \"{name}\": {message}"
            }
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of message templates, one per [`MessageKey`].
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<MessageKey, String>,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let templates = MessageKey::ALL
            .into_iter()
            .map(|key| (key, key.default_template().to_string()))
            .collect();
        Self { templates }
    }
}

static DEFAULT_CATALOG: Lazy<MessageCatalog> = Lazy::new(MessageCatalog::default);

impl MessageCatalog {
    /// Replaces the template for `key`, keeping every other template.
    pub fn with_template(mut self, key: MessageKey, template: impl Into<String>) -> Self {
        self.set_template(key, template);
        self
    }

    pub fn set_template(&mut self, key: MessageKey, template: impl Into<String>) {
        self.templates.insert(key, template.into());
    }

    pub fn template(&self, key: MessageKey) -> &str {
        self.templates
            .get(&key)
            .map(String::as_str)
            .unwrap_or_else(|| key.default_template())
    }

    /// Renders the template for `key` with the named parameters.
    ///
    /// String parameters are substituted as-is; any other JSON value is
    /// substituted as its JSON text, so `false` renders as `false` and an
    /// object renders as `{"a":1}`.
    pub fn render(&self, key: MessageKey, params: &[(&str, Value)]) -> Result<String> {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&tinytemplate::format_unescaped);
        tt.add_template(key.as_str(), self.template(key))
            .with_context(|| format!("Failed to parse message template '{}'", key))?;

        let ctx: Map<String, Value> = params
            .iter()
            .map(|(name, value)| ((*name).to_string(), Value::String(printable(value))))
            .collect();

        tt.render(key.as_str(), &Value::Object(ctx))
            .map_err(|e| anyhow!("Failed to render message template '{}': {}", key, e))
    }
}

fn printable(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders `key` through the built-in English catalog.
pub fn default_message(key: MessageKey, params: &[(&str, Value)]) -> String {
    DEFAULT_CATALOG.render(key, params).unwrap_or_else(|e| {
        log::warn!("Built-in message '{}' failed to render: {}", key, e);
        key.default_template().to_string()
    })
}

//! The per-invocation carrier passed through a sanitizer chain.

use serde::Serialize;
use serde_json::Value;

/// Holds the value as it was when the chain started and the value as it
/// currently stands.
///
/// A fresh context is built for every `sanitize` call. Rules may replace the
/// current value freely; `original` never changes for the life of the chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizeContext {
    original: Value,
    value: Value,
}

impl SanitizeContext {
    pub fn new(value: Value) -> Self {
        Self {
            original: value.clone(),
            value,
        }
    }

    /// The value at chain start.
    pub fn original(&self) -> &Value {
        &self.original
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Moves the current value out, leaving `Value::Null` behind.
    pub fn take_value(&mut self) -> Value {
        std::mem::take(&mut self.value)
    }

    pub(crate) fn into_value(self) -> Value {
        self.value
    }
}

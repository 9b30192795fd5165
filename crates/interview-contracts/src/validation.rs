//! Validation result types.
//!
//! Every validator maps a candidate value to a `ValidationResult`: the value
//! after any coercion, plus the errors found along the way. Errors
//! accumulate; nothing short-circuits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single data-driven validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// JSON-pointer-style location inside the validated value. `""` and `"/"`
    /// both address the value itself.
    pub path: String,
    /// Human-readable message, already prefixed with the field title where
    /// the producing validator does so.
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// An error addressing the validated value as a whole.
    pub fn at_root(message: impl Into<String>) -> Self {
        Self::new("/", message)
    }

    /// Return a copy of this error relocated under `prefix`.
    pub fn nested_under(&self, prefix: &str) -> Self {
        let path = match self.path.as_str() {
            "" | "/" if prefix.is_empty() => "/".to_string(),
            "" | "/" => prefix.to_string(),
            inner => format!("{prefix}{inner}"),
        };
        Self {
            path,
            message: self.message.clone(),
        }
    }
}

/// The outcome of running a validator against a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The (possibly transformed) value.
    pub value: Value,
    /// Every error produced, in stage order. Empty when valid.
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result that leaves `value` untouched.
    pub fn valid(value: Value) -> Self {
        Self {
            value,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(value: Value, errors: Vec<ValidationError>) -> Self {
        Self { value, errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

//! Validation configuration loading.
//!
//! `ValidationConfig` is read from a TOML string or file. Every key is
//! optional; an empty document yields the built-in behavior.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use interview_contracts::error::{InterviewError, InterviewResult};

use crate::messages::MessageTemplates;

/// Settings for a `SchemaEngine`.
///
/// ```toml
/// validate_formats = true
///
/// [messages]
/// default_title = "Field"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Assert the `format` keyword (`email`, `date`, ...) instead of treating
    /// it as an annotation.
    pub validate_formats: bool,

    pub messages: MessageTemplates,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            validate_formats: true,
            messages: MessageTemplates::default(),
        }
    }
}

impl ValidationConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `InterviewError::ConfigError` if the TOML is malformed or does
    /// not match the expected layout.
    pub fn from_toml_str(s: &str) -> InterviewResult<Self> {
        let config: ValidationConfig = toml::from_str(s).map_err(|e| InterviewError::ConfigError {
            reason: format!("failed to parse validation TOML: {}", e),
        })?;
        debug!(
            validate_formats = config.validate_formats,
            keyword_overrides = config.messages.keywords.len(),
            "validation config loaded"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML validation configuration.
    pub fn from_file(path: &Path) -> InterviewResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| InterviewError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

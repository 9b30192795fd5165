//! # interview-config
//!
//! TOML-driven configuration for the interview validation engine.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use interview_config::ValidationConfig;
//!
//! let config = ValidationConfig::from_file(Path::new("config/validation.toml"))?;
//! // Pass `config` to `interview_validate::SchemaEngine::with_config(...)`.
//! ```
//!
//! ## Message templates
//!
//! Generic-schema errors are rendered from per-keyword templates prefixed by
//! the field title. Built-in templates cover the supported keyword subset;
//! `[messages.keywords]` overrides them one keyword at a time.

pub mod config;
pub mod messages;

pub use config::ValidationConfig;
pub use messages::MessageTemplates;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use interview_contracts::error::InterviewError;

    use crate::{MessageTemplates, ValidationConfig};

    #[test]
    fn empty_document_yields_defaults() {
        let config = ValidationConfig::from_toml_str("").unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert!(config.validate_formats);
        assert_eq!(config.messages.default_title, "Field");
    }

    #[test]
    fn partial_messages_table_keeps_other_defaults() {
        let toml = r#"
            validate_formats = false

            [messages]
            default_title = "This field"

            [messages.keywords]
            minLength = "needs {limit} or more characters"
        "#;

        let config = ValidationConfig::from_toml_str(toml).unwrap();
        assert!(!config.validate_formats);
        assert_eq!(config.messages.default_title, "This field");
        assert_eq!(config.messages.email_invalid, "Email is invalid");
        assert_eq!(
            config.messages.render("Name", "minLength", Some(&json!(3))),
            "Name needs 3 or more characters"
        );
        // Keywords without an override still use the built-in template.
        assert_eq!(
            config.messages.render("Name", "maxLength", Some(&json!(20))),
            "Name must have 20 characters or fewer"
        );
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = ValidationConfig::from_toml_str("validate_formats = ").unwrap_err();
        match err {
            InterviewError::ConfigError { reason } => {
                assert!(reason.contains("failed to parse validation TOML"), "{reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = ValidationConfig::from_file(Path::new("/nonexistent/validation.toml"))
            .unwrap_err();
        assert!(matches!(err, InterviewError::ConfigError { .. }));
        assert!(err.to_string().contains("/nonexistent/validation.toml"));
    }

    // ── Templates ─────────────────────────────────────────────────────────────

    #[test]
    fn builtin_templates_cover_bounds() {
        let messages = MessageTemplates::default();

        assert_eq!(
            messages.render("Age", "minimum", Some(&json!(18))),
            "Age must be at least 18"
        );
        assert_eq!(
            messages.render("Age", "maximum", Some(&json!(120))),
            "Age must be 120 or less"
        );
        assert_eq!(
            messages.render("Tags", "minItems", Some(&json!(1))),
            "Tags must include at least 1 items"
        );
        assert_eq!(
            messages.render("Tags", "maxItems", Some(&json!(3))),
            "Tags must include 3 or fewer items"
        );
    }

    #[test]
    fn required_and_invalid_keywords() {
        let messages = MessageTemplates::default();

        assert_eq!(messages.render("Field", "required", None), "Field is required");
        assert_eq!(messages.render("Field", "pattern", None), "Field is invalid");
        assert_eq!(messages.render("Field", "oneOf", None), "Field is invalid");
    }

    #[test]
    fn unknown_keyword_uses_fallback() {
        let messages = MessageTemplates::default();
        assert_eq!(
            messages.render("Code", "multipleOf", Some(&json!(5))),
            "Code is invalid"
        );
    }
}

//! Text normalization stage for `text` fields.
//!
//! Runs *before* the generic schema validator: surrounding whitespace is
//! trimmed and a blank string becomes `null`, so `required`/`type` checks
//! see the normalized value. Email-formatted fields additionally get a
//! syntax and public-suffix check.

use serde_json::Value;

use interview_contracts::{
    schema::Schema,
    validation::{ValidationError, ValidationResult},
};
use interview_core::traits::Validator;

/// Trims text input and checks email addresses.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    check_email: bool,
    email_message: String,
}

impl TextNormalizer {
    pub fn new(check_email: bool, email_message: impl Into<String>) -> Self {
        Self {
            check_email,
            email_message: email_message.into(),
        }
    }

    /// Build the stage for `schema`; email checking follows `format: email`.
    pub fn for_schema(schema: &Schema, email_message: impl Into<String>) -> Self {
        Self::new(schema.format.as_deref() == Some("email"), email_message)
    }
}

impl Validator for TextNormalizer {
    fn validate(&self, value: &Value) -> ValidationResult {
        let Value::String(text) = value else {
            return ValidationResult::valid(value.clone());
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return ValidationResult::valid(Value::Null);
        }

        let mut errors = Vec::new();
        if self.check_email && !is_valid_email(trimmed) {
            errors.push(ValidationError::at_root(self.email_message.clone()));
        }

        ValidationResult::with_errors(Value::String(trimmed.to_string()), errors)
    }
}

/// Syntactic email check plus a registrable domain under a known public
/// suffix.
pub fn is_valid_email(address: &str) -> bool {
    if !email_address::EmailAddress::is_valid(address) {
        return false;
    }
    let Some((_, domain)) = address.rsplit_once('@') else {
        return false;
    };
    // Suffix rules are stored lowercase.
    let domain = domain.to_ascii_lowercase();
    psl::domain(domain.as_bytes())
        .map(|d| d.suffix().is_known())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use interview_core::traits::Validator;

    use super::{is_valid_email, TextNormalizer};

    fn plain() -> TextNormalizer {
        TextNormalizer::new(false, "Email is invalid")
    }

    fn email() -> TextNormalizer {
        TextNormalizer::new(true, "Email is invalid")
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let result = plain().validate(&json!("  hello  "));
        assert_eq!(result.value, json!("hello"));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn blank_text_becomes_null() {
        assert_eq!(plain().validate(&json!("   ")).value, Value::Null);
        assert_eq!(plain().validate(&json!("")).value, Value::Null);
    }

    #[test]
    fn non_text_passes_through() {
        let result = email().validate(&json!(42));
        assert_eq!(result.value, json!(42));
        assert!(result.errors.is_empty());
    }

    #[test]
    fn email_with_known_suffix_passes() {
        let result = email().validate(&json!(" user@example.com "));
        assert_eq!(result.value, json!("user@example.com"));
        assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
    }

    #[test]
    fn email_with_unknown_suffix_fails_once() {
        let result = email().validate(&json!("user@invalid-tld-zzz"));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Email is invalid");
        assert_eq!(result.errors[0].path, "/");
    }

    #[test]
    fn blank_email_is_not_checked() {
        let result = email().validate(&json!("  "));
        assert_eq!(result.value, Value::Null);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn email_domain_case_is_ignored() {
        assert!(is_valid_email("User@Example.COM"));
        assert!(is_valid_email("user@EXAMPLE.com"));

        let result = email().validate(&json!("User@Example.COM"));
        assert!(result.errors.is_empty(), "errors: {:?}", result.errors);
        assert_eq!(result.value, json!("User@Example.COM"), "the address is not rewritten");
    }

    #[test]
    fn email_syntax_is_checked() {
        assert!(!is_valid_email("not an email"));
        assert!(!is_valid_email("user@"));
        assert!(is_valid_email("first.last@mail.example.co.uk"));
    }
}

//! Error message templates.
//!
//! Generic-schema errors are rendered as `"{title} {template}"`, where the
//! template is chosen by the failing JSON Schema keyword. Templates may
//! reference the keyword's bound with `{limit}`.
//!
//! Example in TOML:
//! ```toml
//! [messages]
//! default_title = "This field"
//!
//! [messages.keywords]
//! minLength = "needs {limit} or more characters"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder replaced with the failing keyword's bound.
pub const LIMIT_PLACEHOLDER: &str = "{limit}";

/// The message set used by the validators.
///
/// Every field has a built-in default, so a TOML document only needs to
/// mention what it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    /// Prefix used when the failing schema node has no title.
    pub default_title: String,

    /// Template for keywords with no specific template.
    pub fallback: String,

    /// Template for `type` failures on `text` fields, where a blank value has
    /// been coerced to null.
    pub text_type: String,

    pub email_invalid: String,
    pub invalid_date: String,
    pub date_too_early: String,
    pub date_too_late: String,

    /// Per-keyword overrides, keyed by JSON Schema keyword (`minLength`, ...).
    pub keywords: BTreeMap<String, String>,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            default_title: "Field".to_string(),
            fallback: "is invalid".to_string(),
            text_type: "is required".to_string(),
            email_invalid: "Email is invalid".to_string(),
            invalid_date: "Invalid date".to_string(),
            date_too_early: "Choose a later date".to_string(),
            date_too_late: "Choose an earlier date".to_string(),
            keywords: BTreeMap::new(),
        }
    }
}

impl MessageTemplates {
    /// The template for `keyword`: an override if configured, else the
    /// built-in template, else `fallback`.
    pub fn keyword_template(&self, keyword: &str) -> &str {
        if let Some(template) = self.keywords.get(keyword) {
            return template.as_str();
        }
        builtin_template(keyword).unwrap_or(self.fallback.as_str())
    }

    /// Render `"{title} {template}"` for a failing keyword.
    pub fn render(&self, title: &str, keyword: &str, limit: Option<&Value>) -> String {
        let body = fill_limit(self.keyword_template(keyword), limit);
        format!("{title} {body}")
    }
}

fn builtin_template(keyword: &str) -> Option<&'static str> {
    let template = match keyword {
        "type" | "pattern" | "format" | "const" | "enum" | "oneOf" => "is invalid",
        "required" | "nullable" => "is required",
        "minimum" => "must be at least {limit}",
        "maximum" => "must be {limit} or less",
        "minItems" => "must include at least {limit} items",
        "maxItems" => "must include {limit} or fewer items",
        "minLength" => "must have at least {limit} characters",
        "maxLength" => "must have {limit} characters or fewer",
        _ => return None,
    };
    Some(template)
}

fn fill_limit(template: &str, limit: Option<&Value>) -> String {
    if !template.contains(LIMIT_PLACEHOLDER) {
        return template.to_string();
    }
    let rendered = match limit {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    template.replace(LIMIT_PLACEHOLDER, &rendered)
}

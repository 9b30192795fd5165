//! The schema validation engine.
//!
//! `SchemaEngine` is an explicitly constructed component: it owns its
//! `ValidationConfig` and compiles question schemas into validators. There
//! is no shared process-wide instance; every factory holds the engine it
//! was built with.
//!
//! Validators are composed per node from its `x-type` tag:
//!
//! | `x-type` | chain |
//! |---|---|
//! | `text` | text normalization → generic schema |
//! | `date` | generic schema → date range |
//! | anything else | generic schema |

use serde_json::Value;
use tracing::{debug, warn};

use interview_config::{MessageTemplates, ValidationConfig};
use interview_contracts::{
    error::{InterviewError, InterviewResult},
    schema::{FieldType, Schema},
    validation::{ValidationError, ValidationResult},
};
use interview_core::traits::Validator;

use crate::{chain::ValidatorChain, date::DateRangeValidator, text::TextNormalizer};

/// Compiles schemas into composed validators.
#[derive(Debug, Clone, Default)]
pub struct SchemaEngine {
    config: ValidationConfig,
}

impl SchemaEngine {
    /// Create an engine with the built-in configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Build the full validator chain for `schema`.
    ///
    /// # Errors
    ///
    /// `SchemaCompilation` if the schema document is rejected (for example an
    /// invalid `pattern`), `InvalidBound` for a malformed date bound.
    pub fn create_validator(&self, schema: &Schema) -> InterviewResult<ValidatorChain> {
        let messages = &self.config.messages;
        let generic = self.schema_validator(schema)?;

        let chain = match schema.field_type {
            Some(FieldType::Text) => ValidatorChain::new()
                .then(TextNormalizer::for_schema(schema, messages.email_invalid.clone()))
                .then(generic),
            Some(FieldType::Date) => ValidatorChain::new()
                .then(generic)
                .then(DateRangeValidator::for_schema(schema, messages)?),
            _ => ValidatorChain::new().then(generic),
        };

        debug!(
            title = schema.title_or(&messages.default_title),
            field_type = schema.field_type.as_ref().map(FieldType::as_str).unwrap_or("-"),
            stages = chain.len(),
            "validator created"
        );

        Ok(chain)
    }

    /// Compile only the generic schema-constraint stage for `schema`.
    pub fn schema_validator(&self, schema: &Schema) -> InterviewResult<SchemaValidator> {
        let mut document = schema.to_document()?;
        lower_nullable(&mut document);

        let compiled = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft7)
            .should_validate_formats(self.config.validate_formats)
            .build(&document)
            .map_err(|e| {
                warn!(
                    title = schema.title.as_deref().unwrap_or("-"),
                    error = %e,
                    "schema compilation failure"
                );
                InterviewError::SchemaCompilation {
                    reason: e.to_string(),
                }
            })?;

        Ok(SchemaValidator {
            compiled,
            document,
            title: schema
                .title_or(&self.config.messages.default_title)
                .to_string(),
            text_field: schema.has_field_type(&FieldType::Text),
            messages: self.config.messages.clone(),
        })
    }
}

/// The generic schema-constraint stage.
///
/// Evaluates the node's declared constraints and renders one message per
/// failing keyword as `"{title} {template}"`. Errors are reported in the
/// order the underlying engine yields them; the transformed value is always
/// the input value.
pub struct SchemaValidator {
    compiled: jsonschema::Validator,
    /// The lowered document, used to look up the bound behind each error.
    document: Value,
    title: String,
    text_field: bool,
    messages: MessageTemplates,
}

impl SchemaValidator {
    fn message_for(&self, keyword: &str, schema_path: &str, at_root: bool) -> String {
        if keyword == "type" && at_root && self.text_field {
            return format!("{} {}", self.title, self.messages.text_type);
        }
        let limit = self.document.pointer(schema_path);
        self.messages
            .render(self.owner_title(schema_path), keyword, limit)
    }

    /// The title of the property that owns the keyword at `schema_path`.
    ///
    /// Errors inside `properties/<name>` are named after that property;
    /// everything else belongs to the compiled node itself.
    fn owner_title(&self, schema_path: &str) -> &str {
        let segments: Vec<&str> = schema_path.split('/').skip(1).collect();
        let mut owner_end = None;
        let mut i = 0;
        // The final segment is the failing keyword, never a property name.
        while i + 2 < segments.len() {
            if segments[i] == "properties" {
                owner_end = Some(i + 2);
                i += 2;
            } else {
                i += 1;
            }
        }

        let Some(end) = owner_end else {
            return &self.title;
        };
        let pointer: String = segments[..end].iter().map(|s| format!("/{s}")).collect();
        match self
            .document
            .pointer(&pointer)
            .and_then(|owner| owner.get("title"))
            .and_then(Value::as_str)
        {
            Some(title) if !title.is_empty() => title,
            _ => &self.messages.default_title,
        }
    }
}

impl Validator for SchemaValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        let errors: Vec<ValidationError> = self
            .compiled
            .iter_errors(value)
            .map(|error| {
                let schema_path = error.schema_path.to_string();
                let instance_path = error.instance_path.to_string();
                let keyword = schema_path.rsplit('/').next().unwrap_or_default();
                let at_root = instance_path.is_empty() || instance_path == "/";
                let message = self.message_for(keyword, &schema_path, at_root);
                let path = if at_root { "/".to_string() } else { instance_path };
                ValidationError::new(path, message)
            })
            .collect();

        ValidationResult::with_errors(value.clone(), errors)
    }
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("title", &self.title)
            .field("text_field", &self.text_field)
            .finish_non_exhaustive()
    }
}

// ── nullable lowering ─────────────────────────────────────────────────────────

/// Sub-schema keywords holding a single schema.
const SINGLE_SCHEMA_KEYWORDS: &[&str] = &[
    "items",
    "additionalItems",
    "additionalProperties",
    "contains",
    "not",
    "if",
    "then",
    "else",
];

/// Sub-schema keywords holding a list of schemas.
const LIST_SCHEMA_KEYWORDS: &[&str] = &["oneOf", "anyOf", "allOf", "items"];

/// Sub-schema keywords holding a name → schema map.
const MAP_SCHEMA_KEYWORDS: &[&str] = &["properties", "patternProperties", "definitions"];

/// Rewrite the OpenAPI-style `nullable: true` into a `type` union with
/// `"null"`, recursively, and drop the `nullable` keyword everywhere.
///
/// A nullable node without a `type` keeps its other constraints unchanged.
pub fn lower_nullable(node: &mut Value) {
    let Value::Object(map) = node else {
        return;
    };

    if map.remove("nullable") == Some(Value::Bool(true)) {
        match map.get_mut("type") {
            Some(kind @ Value::String(_)) => {
                let single = kind.take();
                *kind = Value::Array(vec![single, Value::String("null".to_string())]);
            }
            Some(Value::Array(kinds)) => {
                let null = Value::String("null".to_string());
                if !kinds.contains(&null) {
                    kinds.push(null);
                }
            }
            _ => {}
        }
    }

    for keyword in SINGLE_SCHEMA_KEYWORDS {
        if let Some(child @ Value::Object(_)) = map.get_mut(*keyword) {
            lower_nullable(child);
        }
    }
    for keyword in LIST_SCHEMA_KEYWORDS {
        if let Some(Value::Array(children)) = map.get_mut(*keyword) {
            children.iter_mut().for_each(lower_nullable);
        }
    }
    for keyword in MAP_SCHEMA_KEYWORDS {
        if let Some(Value::Object(children)) = map.get_mut(*keyword) {
            children.values_mut().for_each(lower_nullable);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! The schema descriptor model.
//!
//! A `Schema` is a loosely-typed, JSON-Schema-like node extended with `x-*`
//! annotation keys that select the UI field type and carry type-specific
//! bounds. Schemas are immutable once read: the validation engine and the
//! field-state factory only ever borrow them.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{InterviewError, InterviewResult};

/// The JSON primitive kind declared by a node's `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::Object => "object",
            PrimitiveType::Array => "array",
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Null => "null",
        }
    }
}

/// The UI field-type tag carried in `x-type`.
///
/// Unrecognized tags are preserved as `Other` so the component lookup can
/// reject them explicitly instead of treating them as absent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Select,
    Button,
    Other(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Select => "select",
            FieldType::Button => "button",
            FieldType::Other(tag) => tag.as_str(),
        }
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "text" => FieldType::Text,
            "number" => FieldType::Number,
            "date" => FieldType::Date,
            "select" => FieldType::Select,
            "button" => FieldType::Button,
            _ => FieldType::Other(tag),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a question schema.
///
/// Only the keywords the runtime reads are typed. Everything else (`enum`,
/// `anyOf`, `$comment`, ...) is kept in `extra` and still reaches the
/// validation engine through [`Schema::to_document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrimitiveType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Initial value for freshly created field states. `null` counts as no default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Accept `null` in addition to the declared `type`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,

    /// `Some(Value::Null)` for an explicit `"const": null`, `None` when absent.
    #[serde(
        rename = "const",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub constant: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "x-type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,

    /// Presentation variant for select fields (`select`, `radio`, `checkbox`).
    #[serde(rename = "x-component", default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,

    #[serde(rename = "x-input-mode", default, skip_serializing_if = "Option::is_none")]
    pub input_mode: Option<String>,

    #[serde(rename = "x-autocomplete", default, skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,

    /// Marks a button alternative as the primary action.
    #[serde(rename = "x-primary", default, skip_serializing_if = "is_false")]
    pub primary: bool,

    /// Earliest accepted calendar date for `date` fields.
    #[serde(rename = "x-minimum", default, skip_serializing_if = "Option::is_none")]
    pub date_minimum: Option<String>,

    /// Latest accepted calendar date for `date` fields.
    #[serde(rename = "x-maximum", default, skip_serializing_if = "Option::is_none")]
    pub date_maximum: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Schema {
    /// Deserialize a schema node from a JSON value.
    pub fn from_value(value: Value) -> InterviewResult<Self> {
        serde_json::from_value(value).map_err(|e| InterviewError::ConfigError {
            reason: format!("invalid schema document: {e}"),
        })
    }

    /// Render the node back into a JSON document, annotations included.
    pub fn to_document(&self) -> InterviewResult<Value> {
        serde_json::to_value(self).map_err(|e| InterviewError::SchemaCompilation {
            reason: format!("schema could not be serialized: {e}"),
        })
    }

    pub fn is_type(&self, kind: PrimitiveType) -> bool {
        self.kind == Some(kind)
    }

    pub fn has_field_type(&self, field_type: &FieldType) -> bool {
        self.field_type.as_ref() == Some(field_type)
    }

    /// The node's title, or `fallback` when it has none.
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => fallback,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Schema> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    pub fn is_required_property(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

//! Mapping schema nodes to renderable components.
//!
//! The UI shell asks this module what to draw for a node. The lookup is
//! total over `FieldType`: known tags map to a component, `button` maps to
//! nothing (buttons are drawn by the form, not as fields), and unknown tags
//! are an explicit error that [`displayable_component`] turns into "omit
//! this field".

use serde_json::Value;
use tracing::debug;

use interview_contracts::{
    error::{InterviewError, InterviewResult},
    schema::{FieldType, PrimitiveType, Schema},
};

use crate::field::FieldState;

/// Presentation variant of a select field, from `x-component`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectStyle {
    Dropdown,
    Radio,
    Checkbox,
}

impl SelectStyle {
    pub fn for_schema(schema: &Schema) -> Self {
        match schema.component.as_deref() {
            Some("radio") => SelectStyle::Radio,
            Some("checkbox") => SelectStyle::Checkbox,
            _ => SelectStyle::Dropdown,
        }
    }
}

/// The component a schema node renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldComponent {
    Text,
    Number,
    Date,
    Select(SelectStyle),
    Object,
}

/// Look up the component for `schema`.
///
/// Returns `Ok(None)` for `button` nodes and
/// `InterviewError::UnsupportedFieldType` for unknown tags and for untagged
/// non-object nodes.
pub fn component_for(schema: &Schema) -> InterviewResult<Option<FieldComponent>> {
    let component = match &schema.field_type {
        Some(FieldType::Button) => return Ok(None),
        Some(FieldType::Text) => FieldComponent::Text,
        Some(FieldType::Number) => FieldComponent::Number,
        Some(FieldType::Date) => FieldComponent::Date,
        Some(FieldType::Select) => FieldComponent::Select(SelectStyle::for_schema(schema)),
        Some(FieldType::Other(tag)) => {
            return Err(InterviewError::UnsupportedFieldType {
                field_type: tag.clone(),
            })
        }
        None if schema.is_type(PrimitiveType::Object) => FieldComponent::Object,
        None => {
            return Err(InterviewError::UnsupportedFieldType {
                field_type: format!(
                    "untagged {}",
                    schema.kind.map(|k| k.as_str()).unwrap_or("schema")
                ),
            })
        }
    };
    Ok(Some(component))
}

/// Like [`component_for`], but an unsupported node is simply not displayed.
pub fn displayable_component(schema: &Schema) -> Option<FieldComponent> {
    match component_for(schema) {
        Ok(component) => component,
        Err(e) => {
            debug!(
                title = schema.title.as_deref().unwrap_or("-"),
                error = %e,
                "field omitted: no displayable component"
            );
            None
        }
    }
}

/// Whether a field is shown as required: the parent lists it in
/// `required`, or the node does not accept `null`.
pub fn is_required(schema: &Schema, required_by_parent: bool) -> bool {
    required_by_parent || !schema.nullable
}

// ── Select options ────────────────────────────────────────────────────────────

/// One choice of a select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: Option<String>,
    pub value: String,
}

/// The choices of a select field.
///
/// Array schemas read `items.oneOf`; scalar schemas read `oneOf` and skip
/// `type: null` alternatives. An option's value is its `const`, or its
/// 1-based position when it has none.
pub fn select_options(schema: &Schema) -> Vec<SelectOption> {
    let (alternatives, skip_null) = if schema.is_type(PrimitiveType::Array) {
        (
            schema.items.as_deref().and_then(|items| items.one_of.as_ref()),
            false,
        )
    } else {
        (schema.one_of.as_ref(), true)
    };

    alternatives
        .into_iter()
        .flatten()
        .filter(|option| !(skip_null && option.is_type(PrimitiveType::Null)))
        .enumerate()
        .map(|(index, option)| SelectOption {
            label: option.title.clone(),
            value: option_value(option.constant.as_ref(), index),
        })
        .collect()
}

fn option_value(constant: Option<&Value>, index: usize) -> String {
    match constant {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => (index + 1).to_string(),
    }
}

/// The current selection as a list of option values.
pub fn checkbox_selection(state: &FieldState) -> Vec<String> {
    match state.value() {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) => vec![s],
        other => vec![other.to_string()],
    }
}

/// Store a checkbox-group selection.
///
/// `type: array` fields store the list. Every other field stores a bare
/// scalar: the first selected value, or `null` when nothing is selected.
pub fn apply_checkbox_selection(state: &mut FieldState, selected: Vec<String>) {
    let value = if state.schema().is_type(PrimitiveType::Array) {
        Value::Array(selected.into_iter().map(Value::String).collect())
    } else {
        selected
            .into_iter()
            .next()
            .map(Value::String)
            .unwrap_or(Value::Null)
    };
    state.set_value(value);
}

// ── Buttons ───────────────────────────────────────────────────────────────────

/// One button of a `button` field.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonOption {
    pub label: Option<String>,
    /// The value assigned to the field when the button is pressed.
    pub value: Value,
    pub primary: bool,
    /// The button's value equals the field's default; it submits on Enter.
    pub is_default: bool,
}

/// The buttons declared by a `button` field's `oneOf`.
pub fn button_options(schema: &Schema) -> Vec<ButtonOption> {
    schema
        .one_of
        .iter()
        .flatten()
        .filter(|option| !option.is_type(PrimitiveType::Null))
        .map(|option| {
            let value = option.constant.clone().unwrap_or(Value::Null);
            let is_default = schema
                .default
                .as_ref()
                .is_some_and(|default| *default == value);
            ButtonOption {
                label: option.title.clone(),
                value,
                primary: option.primary,
                is_default,
            }
        })
        .collect()
}

/// Press a button: assign its value to the field.
pub fn press_button(state: &mut FieldState, button: &ButtonOption) {
    state.set_value(button.value.clone());
}

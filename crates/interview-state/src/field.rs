//! Live field state.
//!
//! A `FieldState` tracks one schema node's current value and touched flag
//! and derives everything else (`valid_value`, `errors`, `is_valid`) from
//! them on read. The common part (the compiled template) lives in the struct;
//! the variant-specific part lives in [`FieldVariant`]:
//!
//! - **Scalar** holds a raw value. Its validation result is memoized and
//!   discarded on every value write.
//! - **Object** holds either nothing (`null`) or one child state per declared
//!   property. Its value, touched flag and validity are derived from the
//!   children on every read.
//!
//! Assigning an object's value is the only operation that replaces a
//! subtree. Child references are borrows of the parent, so a replaced
//! subtree can never be observed afterwards.

use std::sync::{Arc, OnceLock};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use interview_contracts::{
    schema::Schema,
    validation::{ValidationError, ValidationResult},
};
use interview_core::traits::Validator;

use crate::{factory::StateShape, template::FieldTemplate};

/// The state of one schema node.
#[derive(Debug, Clone)]
pub struct FieldState {
    template: Arc<FieldTemplate>,
    variant: FieldVariant,
}

/// The variant-specific part of a [`FieldState`].
#[derive(Debug, Clone)]
pub enum FieldVariant {
    Scalar(ScalarState),
    Object(ObjectState),
}

#[derive(Debug, Clone)]
pub struct ScalarState {
    value: Value,
    touched: bool,
    result: OnceLock<ValidationResult>,
}

impl ScalarState {
    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[derive(Debug, Clone)]
pub struct ObjectState {
    /// `None` until a non-null value is assigned.
    properties: Option<IndexMap<String, FieldState>>,
}

impl ObjectState {
    pub fn properties(&self) -> Option<&IndexMap<String, FieldState>> {
        self.properties.as_ref()
    }

    /// Replace every child. Only keys declared in the schema get a child;
    /// keys of `supplied` outside the schema are ignored.
    fn assign(&mut self, template: &FieldTemplate, value: Value) {
        let mut supplied = match value {
            Value::Null => {
                if self.properties.take().is_some() {
                    debug!(
                        title = template.schema().title.as_deref().unwrap_or("-"),
                        "object value cleared"
                    );
                }
                return;
            }
            Value::Object(map) => map,
            other => {
                warn!(
                    title = template.schema().title.as_deref().unwrap_or("-"),
                    value = %other,
                    "non-object value assigned to object field; treating as empty"
                );
                Map::new()
            }
        };

        let children = template
            .properties()
            .iter()
            .map(|(name, child_template)| {
                let mut child = FieldState::new(Arc::clone(child_template));
                if let Some(value) = supplied.remove(name) {
                    child.set_value(value);
                }
                (name.clone(), child)
            })
            .collect();

        self.properties = Some(children);
    }
}

impl FieldState {
    /// Create the state for a compiled template.
    ///
    /// A declared `default` becomes the initial value; otherwise the value
    /// starts at `null`.
    pub fn new(template: Arc<FieldTemplate>) -> Self {
        let default = template.schema().default.clone();

        match template.shape() {
            StateShape::Scalar => Self {
                variant: FieldVariant::Scalar(ScalarState {
                    value: default.unwrap_or(Value::Null),
                    touched: false,
                    result: OnceLock::new(),
                }),
                template,
            },
            StateShape::Object => {
                let mut state = Self {
                    variant: FieldVariant::Object(ObjectState { properties: None }),
                    template,
                };
                if let Some(default @ Value::Object(_)) = default {
                    state.set_value(default);
                }
                state
            }
        }
    }

    pub fn schema(&self) -> &Schema {
        self.template.schema()
    }

    pub fn template(&self) -> &Arc<FieldTemplate> {
        &self.template
    }

    pub fn variant(&self) -> &FieldVariant {
        &self.variant
    }

    pub fn is_object(&self) -> bool {
        matches!(self.variant, FieldVariant::Object(_))
    }

    /// The raw, unvalidated value. Object states read their children.
    pub fn value(&self) -> Value {
        match &self.variant {
            FieldVariant::Scalar(scalar) => scalar.value.clone(),
            FieldVariant::Object(object) => match &object.properties {
                None => Value::Null,
                Some(children) => Value::Object(
                    children
                        .iter()
                        .map(|(name, child)| (name.clone(), child.value()))
                        .collect(),
                ),
            },
        }
    }

    /// Assign a raw value.
    ///
    /// On an object state, `null` drops every child; any mapping recreates
    /// one child per declared property and assigns the keys it contains.
    pub fn set_value(&mut self, value: Value) {
        let template = Arc::clone(&self.template);
        match &mut self.variant {
            FieldVariant::Scalar(scalar) => {
                scalar.value = value;
                scalar.result = OnceLock::new();
            }
            FieldVariant::Object(object) => object.assign(&template, value),
        }
    }

    /// Whether the user has interacted with the field. An object state is
    /// touched when every child is, and vacuously when it has none.
    pub fn touched(&self) -> bool {
        match &self.variant {
            FieldVariant::Scalar(scalar) => scalar.touched,
            FieldVariant::Object(object) => object
                .properties
                .as_ref()
                .map_or(true, |children| children.values().all(FieldState::touched)),
        }
    }

    /// Set the touched flag, propagating to every existing child.
    pub fn set_touched(&mut self, touched: bool) {
        match &mut self.variant {
            FieldVariant::Scalar(scalar) => scalar.touched = touched,
            FieldVariant::Object(object) => {
                if let Some(children) = object.properties.as_mut() {
                    children
                        .values_mut()
                        .for_each(|child| child.set_touched(touched));
                }
            }
        }
    }

    /// The full result of this node's own validator.
    ///
    /// For object states the validator runs against the mapping of each
    /// child's valid value, so it sees child coercions such as trimming.
    pub fn validation_result(&self) -> ValidationResult {
        self.with_result(ValidationResult::clone)
    }

    /// The value after every coercion in the validator chain.
    pub fn valid_value(&self) -> Value {
        self.with_result(|result| result.value.clone())
    }

    /// This node's own errors. Child errors are not flattened upward; see
    /// [`field_errors`](Self::field_errors).
    pub fn errors(&self) -> Vec<ValidationError> {
        self.with_result(|result| result.errors.clone())
    }

    /// True when this node and, for objects, every child is valid.
    pub fn is_valid(&self) -> bool {
        let children_valid = match &self.variant {
            FieldVariant::Scalar(_) => true,
            FieldVariant::Object(object) => object
                .properties
                .as_ref()
                .map_or(true, |children| children.values().all(FieldState::is_valid)),
        };
        children_valid && self.with_result(ValidationResult::is_valid)
    }

    pub fn properties(&self) -> Option<&IndexMap<String, FieldState>> {
        match &self.variant {
            FieldVariant::Scalar(_) => None,
            FieldVariant::Object(object) => object.properties.as_ref(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&FieldState> {
        self.properties().and_then(|children| children.get(name))
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut FieldState> {
        match &mut self.variant {
            FieldVariant::Scalar(_) => None,
            FieldVariant::Object(object) => object
                .properties
                .as_mut()
                .and_then(|children| children.get_mut(name)),
        }
    }

    /// Resolve a nested state by a `/`-separated property path such as
    /// `"address/street"`. The empty path resolves to `self`.
    pub fn field(&self, path: &str) -> Option<&FieldState> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |state, segment| state.property(segment))
    }

    pub fn field_mut(&mut self, path: &str) -> Option<&mut FieldState> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |state, segment| state.property_mut(segment))
    }

    /// Every error in the tree, each node's own errors first, children in
    /// declaration order, with paths prefixed by the node's location.
    ///
    /// An object's own errors that point inside one of its child states are
    /// left out; the child reports that failure under its own title.
    pub fn field_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        self.collect_errors("", &mut errors);
        errors
    }

    fn collect_errors(&self, prefix: &str, out: &mut Vec<ValidationError>) {
        out.extend(
            self.errors()
                .iter()
                .filter(|e| !self.reported_by_child(e))
                .map(|e| e.nested_under(prefix)),
        );
        if let Some(children) = self.properties() {
            for (name, child) in children {
                child.collect_errors(&format!("{prefix}/{name}"), out);
            }
        }
    }

    fn reported_by_child(&self, error: &ValidationError) -> bool {
        let Some(children) = self.properties() else {
            return false;
        };
        let Some(key) = error.path.strip_prefix('/').and_then(|p| p.split('/').next()) else {
            return false;
        };
        let key = key.replace("~1", "/").replace("~0", "~");
        children.contains_key(key.as_str())
    }

    fn with_result<R>(&self, f: impl FnOnce(&ValidationResult) -> R) -> R {
        match &self.variant {
            FieldVariant::Scalar(scalar) => f(scalar
                .result
                .get_or_init(|| self.template.validator().validate(&scalar.value))),
            FieldVariant::Object(object) => {
                let input = match &object.properties {
                    None => Value::Null,
                    Some(children) => Value::Object(
                        children
                            .iter()
                            .map(|(name, child)| (name.clone(), child.valid_value()))
                            .collect(),
                    ),
                };
                f(&self.template.validator().validate(&input))
            }
        }
    }
}

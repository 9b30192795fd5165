//! The field-state factory.
//!
//! `StateFactory` is the sole construction entry point for schema-derived
//! state. It owns the `SchemaEngine` used to compile validators.
//!
//! Dispatch rule, in priority order:
//!
//! 1. `type: object` → object state
//! 2. `x-type: select | button` → scalar state (the selection is opaque)
//! 3. `type: array` → unsupported, configuration error
//! 4. anything else → scalar state

use std::sync::Arc;

use interview_config::ValidationConfig;
use interview_contracts::{
    error::{InterviewError, InterviewResult},
    schema::{FieldType, PrimitiveType, Schema},
};
use interview_validate::SchemaEngine;

use crate::{field::FieldState, template::FieldTemplate};

/// Which field-state variant a schema node produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateShape {
    Scalar,
    Object,
}

/// Classify `schema` according to the dispatch rule.
///
/// Returns `InterviewError::UnsupportedSchema` for array nodes without an
/// array-capable field type.
pub fn state_shape(schema: &Schema) -> InterviewResult<StateShape> {
    if schema.is_type(PrimitiveType::Object) {
        return Ok(StateShape::Object);
    }
    if matches!(
        schema.field_type,
        Some(FieldType::Select) | Some(FieldType::Button)
    ) {
        return Ok(StateShape::Scalar);
    }
    if schema.is_type(PrimitiveType::Array) {
        return Err(InterviewError::UnsupportedSchema {
            reason: format!(
                "field '{}' has type 'array' but no array-capable field type",
                schema.title_or("(untitled)")
            ),
        });
    }
    Ok(StateShape::Scalar)
}

/// Builds field states from schemas.
#[derive(Debug, Clone, Default)]
pub struct StateFactory {
    engine: Arc<SchemaEngine>,
}

impl StateFactory {
    pub fn new(engine: Arc<SchemaEngine>) -> Self {
        Self { engine }
    }

    /// Create a factory around a fresh engine built from `config`.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self::new(Arc::new(SchemaEngine::with_config(config)))
    }

    pub fn engine(&self) -> &SchemaEngine {
        &self.engine
    }

    /// Compile `schema` into a reusable template.
    ///
    /// Fails fast: an unsupported node anywhere in the tree fails the whole
    /// compilation.
    pub fn compile(&self, schema: &Schema) -> InterviewResult<Arc<FieldTemplate>> {
        FieldTemplate::compile(&self.engine, schema)
    }

    /// Create a fresh field state for `schema`.
    pub fn create_state(&self, schema: &Schema) -> InterviewResult<FieldState> {
        Ok(FieldState::new(self.compile(schema)?))
    }
}

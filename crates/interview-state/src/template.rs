//! Compiled field templates.
//!
//! A `FieldTemplate` is the immutable, shareable result of compiling one
//! schema node: the schema, its validator chain, and (for object nodes) the
//! templates of every declared property. Field states point at their
//! template, so re-creating children on assignment never recompiles a
//! validator and cannot fail.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use interview_contracts::{error::InterviewResult, schema::Schema};
use interview_validate::{SchemaEngine, ValidatorChain};

use crate::factory::{state_shape, StateShape};

#[derive(Debug)]
pub struct FieldTemplate {
    schema: Schema,
    shape: StateShape,
    validator: ValidatorChain,
    /// Child templates in schema declaration order. Empty for scalars.
    properties: IndexMap<String, Arc<FieldTemplate>>,
}

impl FieldTemplate {
    /// Compile `schema` and, for object nodes, every declared property.
    pub fn compile(engine: &SchemaEngine, schema: &Schema) -> InterviewResult<Arc<Self>> {
        let shape = state_shape(schema)?;

        let mut properties = IndexMap::new();
        if shape == StateShape::Object {
            for (name, child) in schema.properties.iter().flatten() {
                properties.insert(name.clone(), Self::compile(engine, child)?);
            }
        }

        let validator = engine.create_validator(schema)?;

        debug!(
            title = schema.title.as_deref().unwrap_or("-"),
            shape = ?shape,
            properties = properties.len(),
            "field template compiled"
        );

        Ok(Arc::new(Self {
            schema: schema.clone(),
            shape,
            validator,
            properties,
        }))
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn shape(&self) -> StateShape {
        self.shape
    }

    pub fn validator(&self) -> &ValidatorChain {
        &self.validator
    }

    pub fn properties(&self) -> &IndexMap<String, Arc<FieldTemplate>> {
        &self.properties
    }
}

//! The form-submission boundary.
//!
//! `InterviewForm` owns the root object state of one interview step and
//! hands its valid values to an external [`SubmitHandler`]. A submit that
//! arrives while another is pending is swallowed, and a rejected submit
//! leaves the form ready to retry with its values untouched.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use serde_json::{Map, Value};
use tracing::{info, warn};

use interview_contracts::{
    error::{InterviewError, InterviewResult},
    schema::{PrimitiveType, Schema},
};
use interview_core::traits::SubmitHandler;

use crate::{factory::StateFactory, field::FieldState};

/// The result of one [`InterviewForm::submit`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The handler accepted the values. The form stays in the submitting
    /// state; the shell is expected to move on.
    Submitted,
    /// The tree failed validation. The handler was not called.
    Invalid,
    /// A previous submit is still pending. Nothing happened.
    AlreadySubmitting,
    /// The handler failed. The submitting flag was reset.
    Rejected,
}

/// Shared read handle on a form's "submitting" flag.
#[derive(Debug, Clone, Default)]
pub struct SubmittingFlag(Arc<AtomicBool>);

impl SubmittingFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, submitting: bool) {
        self.0.store(submitting, Ordering::SeqCst);
    }
}

#[derive(Debug)]
pub struct InterviewForm {
    state: FieldState,
    submitting: SubmittingFlag,
}

impl InterviewForm {
    /// Build the form for an object `schema`, seeded with `initial_values`.
    ///
    /// Returns `InterviewError::UnsupportedSchema` when the root is not an
    /// object, and any configuration error from compiling the tree.
    pub fn new(
        factory: &StateFactory,
        schema: &Schema,
        initial_values: Option<Map<String, Value>>,
    ) -> InterviewResult<Self> {
        if !schema.is_type(PrimitiveType::Object) {
            return Err(InterviewError::UnsupportedSchema {
                reason: format!(
                    "form root '{}' must have type 'object'",
                    schema.title_or("(untitled)")
                ),
            });
        }

        let mut state = factory.create_state(schema)?;
        state.set_value(Value::Object(initial_values.unwrap_or_default()));

        Ok(Self {
            state,
            submitting: SubmittingFlag::default(),
        })
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut FieldState {
        &mut self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_set()
    }

    pub fn submitting_flag(&self) -> SubmittingFlag {
        self.submitting.clone()
    }

    /// The root's valid value as a mapping.
    pub fn values(&self) -> Map<String, Value> {
        match self.state.valid_value() {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    /// Validate the whole tree and, if valid, hand its values to `handler`.
    pub async fn submit(&mut self, handler: &dyn SubmitHandler) -> SubmitOutcome {
        self.state.set_touched(true);

        if self.submitting.is_set() {
            return SubmitOutcome::AlreadySubmitting;
        }
        if !self.state.is_valid() {
            info!(
                errors = self.state.field_errors().len(),
                "submit blocked: form has errors"
            );
            return SubmitOutcome::Invalid;
        }

        let values = self.values();
        self.submitting.set(true);
        info!(fields = values.len(), "submitting form values");

        match handler.submit(values).await {
            Ok(()) => SubmitOutcome::Submitted,
            Err(e) => {
                warn!(error = %e, "submit handler rejected; form can be resubmitted");
                self.submitting.set(false);
                SubmitOutcome::Rejected
            }
        }
    }
}

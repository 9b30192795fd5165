//! Core trait definitions for the interview form runtime.
//!
//! These three traits define every boundary the field-state engine has:
//!
//! - `Validator`: pure checker (value in, transformed value + errors out)
//! - `RecordStore`: external key-value collaborator holding step snapshots
//! - `SubmitHandler`: external transport receiving the validated values
//!
//! Field states own their validators; the store and the submit handler are
//! supplied by the embedding shell.

use async_trait::async_trait;
use serde_json::{Map, Value};

use interview_contracts::{
    error::InterviewResult, record::InterviewRecord, validation::ValidationResult,
};

/// A pure validation function.
///
/// Implementations must be deterministic for a given input and must not
/// mutate any shared state: field states call `validate()` on every read of
/// their derived properties.
pub trait Validator: Send + Sync {
    /// Validate `value`, returning the possibly transformed value and every
    /// error found. Validation failures are never returned as `Err`.
    fn validate(&self, value: &Value) -> ValidationResult;
}

impl<F> Validator for F
where
    F: Fn(&Value) -> ValidationResult + Send + Sync,
{
    fn validate(&self, value: &Value) -> ValidationResult {
        self(value)
    }
}

/// The interview record store.
///
/// Records are addressed by `InterviewRecord::id`. Saving replaces the whole
/// record; there is no merge.
pub trait RecordStore: Send + Sync {
    /// Return a copy of the record stored under `id`, if any.
    fn get_record(&self, id: &str) -> InterviewResult<Option<InterviewRecord>>;

    /// Insert `record`, replacing any record with the same id.
    fn save_record(&self, record: InterviewRecord) -> InterviewResult<()>;
}

/// The transport that receives a form's valid values on submit.
///
/// Returning `Err` is the only failure signal. The form resets its
/// submitting flag and keeps its values so the user can retry.
#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn submit(&self, values: Map<String, Value>) -> InterviewResult<()>;
}

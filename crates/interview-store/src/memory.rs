//! In-memory implementation of `RecordStore`.
//!
//! `InMemoryRecordStore` keeps every record in a `HashMap` behind a `Mutex`,
//! so one store can be shared between the shell's navigation code and the
//! form that saves the step it just submitted.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::{debug, info};

use interview_contracts::{
    error::{InterviewError, InterviewResult},
    record::InterviewRecord,
};
use interview_core::traits::RecordStore;

/// A process-local record store. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<Mutex<HashMap<String, InterviewRecord>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> InterviewResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> InterviewResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> InterviewResult<MutexGuard<'_, HashMap<String, InterviewRecord>>> {
        self.records.lock().map_err(|e| InterviewError::StoreError {
            reason: format!("record store lock poisoned: {}", e),
        })
    }
}

// ── RecordStore impl ──────────────────────────────────────────────────────────

impl RecordStore for InMemoryRecordStore {
    fn get_record(&self, id: &str) -> InterviewResult<Option<InterviewRecord>> {
        let record = self.lock()?.get(id).cloned();
        debug!(id = %id, found = record.is_some(), "record lookup");
        Ok(record)
    }

    /// Replace whatever is stored under `record.id`. Nothing is merged.
    fn save_record(&self, record: InterviewRecord) -> InterviewResult<()> {
        let mut records = self.lock()?;
        let id = record.id.clone();
        let complete = record.state_response.is_complete();
        let replaced = records.insert(id.clone(), record).is_some();

        info!(
            id = %id,
            complete,
            replaced,
            record_count = records.len(),
            "interview record saved"
        );

        Ok(())
    }
}

//! # interview-store
//!
//! Record storage for interview steps.
//!
//! A record is a named snapshot of one step: its field values and the last
//! state response received for it. The store persists whichever response it
//! is handed, verbatim, and replaces records wholesale.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use interview_store::InMemoryRecordStore;
//! use interview_core::traits::RecordStore;
//!
//! let store = InMemoryRecordStore::new();
//! store.save_record(record)?;
//! let again = store.get_record("step-1")?;
//! ```

pub mod memory;

pub use memory::InMemoryRecordStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

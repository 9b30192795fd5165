//! # interview-core
//!
//! The trait seams of the interview form runtime.
//!
//! This crate provides:
//! - `Validator`: a pure value → (value, errors) function
//! - `RecordStore`: the read/write contract for interview records
//! - `SubmitHandler`: the asynchronous transport that receives valid values
//!
//! ## Usage
//!
//! ```rust,ignore
//! use interview_core::traits::{RecordStore, SubmitHandler, Validator};
//! ```

pub mod traits;

pub use traits::{RecordStore, SubmitHandler, Validator};

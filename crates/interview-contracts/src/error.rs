//! Runtime error types for the interview form runtime.
//!
//! Only configuration and collaborator failures are errors. Validation
//! failures are data: they travel inside a `ValidationResult` and never
//! surface as an `InterviewError`.

use thiserror::Error;

/// The unified error type for the interview crates.
#[derive(Debug, Error)]
pub enum InterviewError {
    /// The schema has a shape no field state can be built for, such as an
    /// array node without an array-capable field type.
    #[error("unsupported schema: {reason}")]
    UnsupportedSchema { reason: String },

    /// The schema carries a field type tag that has no component mapping.
    #[error("unsupported field type '{field_type}'")]
    UnsupportedFieldType { field_type: String },

    /// The validation engine refused to compile the schema document.
    #[error("schema compilation failed: {reason}")]
    SchemaCompilation { reason: String },

    /// A type-specific bound (e.g. `x-minimum` on a date field) is malformed.
    #[error("invalid bound '{keyword}' = '{value}': {reason}")]
    InvalidBound {
        keyword: String,
        value: String,
        reason: String,
    },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The record store could not complete a read or write.
    #[error("record store error: {reason}")]
    StoreError { reason: String },

    /// The external submit handler rejected the submitted values.
    #[error("submit rejected: {reason}")]
    SubmitRejected { reason: String },
}

/// Convenience alias used throughout the interview crates.
pub type InterviewResult<T> = Result<T, InterviewError>;

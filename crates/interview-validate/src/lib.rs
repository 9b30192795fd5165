//! # interview-validate
//!
//! Validation for interview question schemas.
//!
//! This crate provides [`engine::SchemaEngine`], which compiles a schema node
//! into a [`chain::ValidatorChain`] implementing
//! [`interview_core::traits::Validator`]. A chain is built from three kinds
//! of stage:
//!
//! 1. **Generic schema**: JSON Schema constraints via the `jsonschema`
//!    crate, with per-keyword message templates.
//! 2. **Text normalization**: trimming, blank → null, email checks.
//! 3. **Date range**: calendar-date parsing and `x-minimum`/`x-maximum`.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use interview_validate::SchemaEngine;
//! use interview_core::traits::Validator;
//!
//! let engine = SchemaEngine::new();
//! let validator = engine.create_validator(&schema)?;
//! let result = validator.validate(&serde_json::json!("  hello  "));
//! ```

pub mod chain;
pub mod date;
pub mod engine;
pub mod text;

pub use chain::ValidatorChain;
pub use engine::{SchemaEngine, SchemaValidator};

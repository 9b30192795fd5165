//! # interview-contracts
//!
//! Shared types for the interview form runtime.
//!
//! All crates in the workspace import from here. This crate holds the schema
//! model, validation result types, interview records and the error type, and
//! no business logic.

pub mod error;
pub mod record;
pub mod schema;
pub mod validation;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use error::InterviewError;
    use record::{InterviewRecord, StateResponse, StepContent};
    use schema::{FieldType, PrimitiveType, Schema};
    use validation::ValidationError;

    // ── Schema ───────────────────────────────────────────────────────────────

    #[test]
    fn schema_reads_core_keywords_and_annotations() {
        let schema = Schema::from_value(json!({
            "type": "string",
            "title": "Birth date",
            "nullable": true,
            "x-type": "date",
            "x-minimum": "1900-01-01",
            "x-maximum": "2020-12-31",
            "x-autocomplete": "bday",
            "minLength": 2
        }))
        .unwrap();

        assert_eq!(schema.kind, Some(PrimitiveType::String));
        assert_eq!(schema.title.as_deref(), Some("Birth date"));
        assert!(schema.nullable);
        assert_eq!(schema.field_type, Some(FieldType::Date));
        assert_eq!(schema.date_minimum.as_deref(), Some("1900-01-01"));
        assert_eq!(schema.date_maximum.as_deref(), Some("2020-12-31"));
        assert_eq!(schema.autocomplete.as_deref(), Some("bday"));
        assert_eq!(schema.min_length, Some(2));
        assert!(schema.extra.is_empty(), "all keys are typed: {:?}", schema.extra);
    }

    #[test]
    fn schema_preserves_property_declaration_order() {
        let schema = Schema::from_value(json!({
            "type": "object",
            "properties": {
                "zeta": { "type": "string" },
                "alpha": { "type": "string" },
                "mid": { "type": "integer" }
            }
        }))
        .unwrap();

        let keys: Vec<&str> = schema
            .properties
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn schema_distinguishes_null_const_from_absent_const() {
        let with_null = Schema::from_value(json!({ "const": null })).unwrap();
        let without = Schema::from_value(json!({ "type": "null" })).unwrap();

        assert_eq!(with_null.constant, Some(serde_json::Value::Null));
        assert_eq!(without.constant, None);
    }

    #[test]
    fn unknown_field_type_is_kept_verbatim() {
        let schema = Schema::from_value(json!({ "x-type": "signature" })).unwrap();
        assert_eq!(
            schema.field_type,
            Some(FieldType::Other("signature".to_string()))
        );
        assert_eq!(schema.field_type.unwrap().as_str(), "signature");
    }

    #[test]
    fn unknown_keywords_survive_in_the_document() {
        let schema = Schema::from_value(json!({
            "type": "string",
            "enum": ["a", "b"],
            "x-type": "text"
        }))
        .unwrap();

        let doc = schema.to_document().unwrap();
        assert_eq!(doc["enum"], json!(["a", "b"]));
        assert_eq!(doc["x-type"], json!("text"));
        assert_eq!(doc["type"], json!("string"));
        assert!(doc.get("nullable").is_none(), "false flags are not emitted");
    }

    #[test]
    fn malformed_schema_is_a_config_error() {
        let err = Schema::from_value(json!({ "minLength": "two" })).unwrap_err();
        assert!(matches!(err, InterviewError::ConfigError { .. }));
    }

    #[test]
    fn title_or_falls_back_for_missing_and_empty_titles() {
        let untitled = Schema::default();
        let empty = Schema {
            title: Some(String::new()),
            ..Schema::default()
        };
        assert_eq!(untitled.title_or("Field"), "Field");
        assert_eq!(empty.title_or("Field"), "Field");
    }

    // ── ValidationError ──────────────────────────────────────────────────────

    #[test]
    fn nested_under_prefixes_paths() {
        let root = ValidationError::at_root("Email is invalid");
        let inner = ValidationError::new("/street", "Street is required");

        assert_eq!(root.nested_under("/address").path, "/address");
        assert_eq!(inner.nested_under("/address").path, "/address/street");
        assert_eq!(root.nested_under("").path, "/");
    }

    // ── StateResponse / InterviewRecord ──────────────────────────────────────

    #[test]
    fn incomplete_state_response_reads_question_content() {
        let response: StateResponse = serde_json::from_value(json!({
            "state": "abc",
            "complete": false,
            "update_url": "https://example.com/update",
            "content": {
                "type": "question",
                "schema": { "type": "object", "title": "Your name" }
            }
        }))
        .unwrap();

        match &response {
            StateResponse::Incomplete {
                state,
                content: Some(StepContent::Question { schema }),
                update_url,
            } => {
                assert_eq!(state, "abc");
                assert_eq!(update_url, "https://example.com/update");
                assert_eq!(schema.title.as_deref(), Some("Your name"));
            }
            other => panic!("expected incomplete question, got {:?}", other),
        }
        assert!(!response.is_complete());
    }

    #[test]
    fn complete_state_response_keeps_wire_shape() {
        let response = StateResponse::Complete {
            state: "done".to_string(),
            target_url: Some("https://example.com/next".to_string()),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({
                "state": "done",
                "complete": true,
                "target_url": "https://example.com/next"
            })
        );
    }

    #[test]
    fn incomplete_response_without_update_url_is_rejected() {
        let result: Result<StateResponse, _> = serde_json::from_value(json!({
            "state": "abc",
            "complete": false,
            "content": null
        }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("update_url"), "unexpected error: {err}");
    }

    #[test]
    fn record_content_is_hidden_once_complete() {
        let exit = InterviewRecord::new(
            "r-1",
            StateResponse::Incomplete {
                state: "s".to_string(),
                content: Some(StepContent::Exit {
                    title: "Not eligible".to_string(),
                    description: None,
                }),
                update_url: "/update".to_string(),
            },
        );
        assert_eq!(exit.content().map(StepContent::title), Some("Not eligible"));

        let complete = InterviewRecord::new(
            "r-2",
            StateResponse::Complete {
                state: "s".to_string(),
                target_url: None,
            },
        );
        assert!(complete.content().is_none());
    }

    #[test]
    fn untitled_question_uses_default_title() {
        let content = StepContent::Question {
            schema: Schema::default(),
        };
        assert_eq!(content.title(), record::DEFAULT_QUESTION_TITLE);
    }

    // ── InterviewError display messages ──────────────────────────────────────

    #[test]
    fn error_unsupported_schema_display() {
        let err = InterviewError::UnsupportedSchema {
            reason: "array fields need a select type".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("unsupported schema"));
        assert!(msg.contains("array fields"));
    }

    #[test]
    fn error_invalid_bound_display() {
        let err = InterviewError::InvalidBound {
            keyword: "x-minimum".to_string(),
            value: "soon".to_string(),
            reason: "not a calendar date".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("x-minimum"));
        assert!(msg.contains("soon"));
    }

    #[test]
    fn error_submit_rejected_display() {
        let err = InterviewError::SubmitRejected {
            reason: "HTTP 503".to_string(),
        };
        assert!(err.to_string().contains("submit rejected: HTTP 503"));
    }
}

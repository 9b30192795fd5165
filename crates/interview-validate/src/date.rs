//! Date-range stage for `date` fields.
//!
//! Runs *after* the generic schema validator. Text values must parse as a
//! calendar date and fall inside the `x-minimum`/`x-maximum` bounds;
//! non-text values are left to the schema validator.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use interview_config::MessageTemplates;
use interview_contracts::{
    error::{InterviewError, InterviewResult},
    schema::Schema,
    validation::{ValidationError, ValidationResult},
};
use interview_core::traits::Validator;

/// Checks that a date string parses and lies within inclusive bounds.
#[derive(Debug, Clone)]
pub struct DateRangeValidator {
    min: Option<NaiveDate>,
    max: Option<NaiveDate>,
    invalid_message: String,
    too_early_message: String,
    too_late_message: String,
}

impl DateRangeValidator {
    /// Build the stage for `schema`.
    ///
    /// Returns `InterviewError::InvalidBound` when `x-minimum` or `x-maximum`
    /// is not a parseable date.
    pub fn for_schema(schema: &Schema, messages: &MessageTemplates) -> InterviewResult<Self> {
        Ok(Self {
            min: parse_bound("x-minimum", schema.date_minimum.as_deref())?,
            max: parse_bound("x-maximum", schema.date_maximum.as_deref())?,
            invalid_message: messages.invalid_date.clone(),
            too_early_message: messages.date_too_early.clone(),
            too_late_message: messages.date_too_late.clone(),
        })
    }

    pub fn min(&self) -> Option<NaiveDate> {
        self.min
    }

    pub fn max(&self) -> Option<NaiveDate> {
        self.max
    }
}

impl Validator for DateRangeValidator {
    fn validate(&self, value: &Value) -> ValidationResult {
        let Some(text) = value.as_str() else {
            return ValidationResult::valid(value.clone());
        };

        let error = match parse_date(text) {
            None => Some(&self.invalid_message),
            Some(date) if self.min.is_some_and(|min| date < min) => Some(&self.too_early_message),
            Some(date) if self.max.is_some_and(|max| date > max) => Some(&self.too_late_message),
            Some(_) => None,
        };

        match error {
            Some(message) => ValidationResult::with_errors(
                value.clone(),
                vec![ValidationError::at_root(message.clone())],
            ),
            None => ValidationResult::valid(value.clone()),
        }
    }
}

/// Naive date-time layouts accepted after plain dates and RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 date-times (the offset's local date is
/// used), and naive date-times with a `T` or space separator, with or
/// without seconds.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Some(datetime.date_naive());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|datetime| datetime.date())
}

fn parse_bound(keyword: &str, raw: Option<&str>) -> InterviewResult<Option<NaiveDate>> {
    match raw {
        None => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| InterviewError::InvalidBound {
                keyword: keyword.to_string(),
                value: text.to_string(),
                reason: "not a calendar date".to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use interview_config::MessageTemplates;
    use interview_contracts::{error::InterviewError, schema::Schema};
    use interview_core::traits::Validator;

    use super::{parse_date, DateRangeValidator};

    fn bounded(min: Option<&str>, max: Option<&str>) -> DateRangeValidator {
        let schema = Schema {
            date_minimum: min.map(str::to_string),
            date_maximum: max.map(str::to_string),
            ..Schema::default()
        };
        DateRangeValidator::for_schema(&schema, &MessageTemplates::default()).unwrap()
    }

    fn messages(validator: &DateRangeValidator, value: serde_json::Value) -> Vec<String> {
        validator
            .validate(&value)
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect()
    }

    #[test]
    fn date_before_minimum_is_rejected() {
        let validator = bounded(Some("1900-01-01"), None);
        assert_eq!(messages(&validator, json!("1899-12-31")), vec!["Choose a later date"]);
        assert!(messages(&validator, json!("1950-01-01")).is_empty());
        assert!(
            messages(&validator, json!("1900-01-01")).is_empty(),
            "the bound itself is accepted"
        );
    }

    #[test]
    fn date_after_maximum_is_rejected() {
        let validator = bounded(None, Some("2000-06-30"));
        assert_eq!(messages(&validator, json!("2000-07-01")), vec!["Choose an earlier date"]);
        assert!(messages(&validator, json!("2000-06-30")).is_empty());
    }

    #[test]
    fn unparseable_text_is_an_invalid_date() {
        let validator = bounded(None, None);
        let result = validator.validate(&json!("next tuesday"));
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].message, "Invalid date");
        assert_eq!(result.errors[0].path, "/");
        assert_eq!(result.value, json!("next tuesday"));
    }

    #[test]
    fn non_text_values_pass_through() {
        let validator = bounded(Some("1900-01-01"), None);
        assert!(messages(&validator, json!(null)).is_empty());
        assert!(messages(&validator, json!(19000101)).is_empty());
    }

    #[test]
    fn malformed_bound_is_a_configuration_error() {
        let schema = Schema {
            date_minimum: Some("sometime".to_string()),
            ..Schema::default()
        };
        let err = DateRangeValidator::for_schema(&schema, &MessageTemplates::default()).unwrap_err();
        assert!(matches!(err, InterviewError::InvalidBound { ref keyword, .. } if keyword == "x-minimum"));
    }

    #[test]
    fn parse_date_accepts_datetimes() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(parse_date("2024-02-29"), expected);
        assert_eq!(parse_date("2024-02-29T10:30:00Z"), expected);
        assert_eq!(parse_date("2024-02-29T10:30:00"), expected);
        assert_eq!(parse_date("2024-02-29T10:30"), expected);
        assert_eq!(parse_date("2023-02-29"), None);
    }

    #[test]
    fn parse_date_accepts_space_separated_datetimes() {
        let expected = NaiveDate::from_ymd_opt(2024, 2, 29);
        assert_eq!(parse_date("2024-02-29 10:30"), expected);
        assert_eq!(parse_date("2024-02-29 10:30:15"), expected);
        assert_eq!(parse_date("2024-02-29 25:30"), None);

        let validator = bounded(Some("2024-03-01"), None);
        assert_eq!(
            messages(&validator, json!("2024-02-29 10:30")),
            vec!["Choose a later date"],
            "space-separated values are compared, not reported as invalid"
        );
    }
}

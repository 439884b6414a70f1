//! Argument validation.
//!
//! The chokepoint between the probabilistic extractor and operation code: a
//! hallucinated or malformed payload must fail closed here. Parsing is
//! structural only; type mismatches are left for dispatch to surface so
//! extraction errors are never silently repaired.

use serde_json::Value;

use crate::core::operation::ArgumentSchema;
use crate::model::types::RawExtraction;
use crate::ops::ArgumentMapping;

/// Validator rejections, classified as client-input errors.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("failed to extract parameters for the given question")]
    MissingArguments,
    #[error("invalid arguments format: {0}")]
    MalformedPayload(String),
}

/// Parse a raw extraction payload into a validated argument mapping.
///
/// - no `arguments` field at all → `MissingArguments`
/// - unparseable or non-object `arguments` → `MalformedPayload`
/// - empty or null `arguments` against a schema with required parameters →
///   `MissingArguments`
pub fn validate(
    raw: &RawExtraction,
    schema: &ArgumentSchema,
) -> Result<ArgumentMapping, ValidationError> {
    let Some(arguments) = raw.arguments.as_deref() else {
        return Err(ValidationError::MissingArguments);
    };

    let parsed: Value = serde_json::from_str(arguments)
        .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;

    let mapping = match parsed {
        Value::Object(map) => map,
        Value::Null => ArgumentMapping::new(),
        other => {
            return Err(ValidationError::MalformedPayload(format!(
                "expected a JSON object, got {}",
                type_name(&other)
            )))
        }
    };

    if mapping.is_empty() && schema.has_required() {
        return Err(ValidationError::MissingArguments);
    }
    Ok(mapping)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::operation::{ParamSpec, ParamType};

    fn schema_with_required() -> ArgumentSchema {
        ArgumentSchema::new(vec![ParamSpec::required(
            "text",
            ParamType::String,
            "text to process",
        )])
    }

    #[test]
    fn test_valid_payload_parses() {
        let raw = RawExtraction::with_arguments(r#"{"text": "hello", "extra": 2}"#);
        let mapping = validate(&raw, &schema_with_required()).unwrap();
        assert_eq!(mapping["text"], Value::String("hello".into()));
        assert_eq!(mapping["extra"], Value::from(2));
    }

    #[test]
    fn test_missing_arguments_field() {
        let err = validate(&RawExtraction::default(), &schema_with_required()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingArguments));
    }

    #[test]
    fn test_unparseable_payload() {
        let raw = RawExtraction::with_arguments("{not json");
        let err = validate(&raw, &schema_with_required()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedPayload(_)));
    }

    #[test]
    fn test_non_object_payload() {
        let raw = RawExtraction::with_arguments("[1, 2, 3]");
        let err = validate(&raw, &schema_with_required()).unwrap_err();
        assert!(matches!(err, ValidationError::MalformedPayload(_)));
    }

    #[test]
    fn test_empty_object_against_required_schema() {
        let raw = RawExtraction::with_arguments("{}");
        let err = validate(&raw, &schema_with_required()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingArguments));
    }

    #[test]
    fn test_null_against_required_schema() {
        let raw = RawExtraction::with_arguments("null");
        let err = validate(&raw, &schema_with_required()).unwrap_err();
        assert!(matches!(err, ValidationError::MissingArguments));
    }

    #[test]
    fn test_empty_object_against_empty_schema_is_fine() {
        let raw = RawExtraction::with_arguments("{}");
        let mapping = validate(&raw, &ArgumentSchema::empty()).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_no_type_coercion() {
        // A mistyped value passes validation untouched; dispatch surfaces it.
        let raw = RawExtraction::with_arguments(r#"{"text": 42}"#);
        let mapping = validate(&raw, &schema_with_required()).unwrap();
        assert_eq!(mapping["text"], Value::from(42));
    }
}

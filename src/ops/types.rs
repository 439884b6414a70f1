//! Shared types for the operation system.
//!
//! - `Operation` trait implemented by every registered solution operation
//! - `ArgumentMapping` consumed by dispatch
//! - `OperationError` for execution failures

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::operation::OperationDescriptor;

/// Validated mapping from parameter name to extracted value, scoped to one
/// request. Produced by the argument validator, consumed once by dispatch.
pub type ArgumentMapping = serde_json::Map<String, Value>;

/// Errors raised while executing an operation.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("execution failed: {0}")]
    Execution(String),
}

/// Trait implemented by every solution operation.
///
/// Operations are registered once at startup and must be Send + Sync so the
/// registry can be shared read-only across concurrent requests.
pub trait Operation: Send + Sync {
    /// Descriptor for this operation: identifier, description, and the
    /// argument schema handed to the extraction service.
    fn descriptor(&self) -> OperationDescriptor;

    /// For file-consuming operations, the argument name that must be
    /// overwritten with the uploaded file's real path.
    fn file_param(&self) -> Option<&'static str> {
        None
    }

    /// Execute with validated arguments. Type mismatches surface here, not
    /// in the validator, so extraction errors are never silently repaired.
    fn invoke(&self, args: &ArgumentMapping) -> Result<Value, OperationError>;
}

/// Deserialize an operation's typed argument struct from the validated
/// mapping. Unknown extra keys are tolerated; missing or mistyped fields
/// fail with `InvalidArguments`.
pub fn decode_args<T: DeserializeOwned>(args: &ArgumentMapping) -> Result<T, OperationError> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| OperationError::InvalidArguments(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct DemoArgs {
        text: String,
        #[serde(default)]
        repeat: Option<u32>,
    }

    #[test]
    fn test_decode_args_with_optional_field() {
        let mut map = ArgumentMapping::new();
        map.insert("text".into(), Value::String("hello".into()));
        let decoded: DemoArgs = decode_args(&map).unwrap();
        assert_eq!(decoded.text, "hello");
        assert_eq!(decoded.repeat, None);
    }

    #[test]
    fn test_decode_args_rejects_type_mismatch() {
        let mut map = ArgumentMapping::new();
        map.insert("text".into(), Value::Bool(true));
        let err = decode_args::<DemoArgs>(&map).unwrap_err();
        assert!(matches!(err, OperationError::InvalidArguments(_)));
    }
}

//! Result normalization: any operation result becomes one answer string.

use serde_json::Value;

/// Convert an operation result to its answer string. Total: never fails,
/// whatever shape the operation returned.
///
/// Strings pass through unchanged; objects and arrays are serialized to
/// compact JSON (falling back to their display form if serialization ever
/// fails); remaining scalars use their JSON textual form.
pub fn normalize(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string_passes_through() {
        assert_eq!(normalize(&Value::String("already text".into())), "already text");
    }

    #[test]
    fn test_object_serializes_compact() {
        let value = serde_json::json!({"answer": 42, "unit": "kg"});
        let text = normalize(&value);
        let round_trip: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(round_trip, value);
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_array_round_trips() {
        let value = serde_json::json!([1, "two", {"three": 3}, null]);
        let round_trip: Value = serde_json::from_str(&normalize(&value)).unwrap();
        assert_eq!(round_trip, value);
    }

    #[test]
    fn test_total_over_every_scalar_shape() {
        assert_eq!(normalize(&Value::from(7)), "7");
        assert_eq!(normalize(&Value::from(2.5)), "2.5");
        assert_eq!(normalize(&Value::Bool(true)), "true");
        assert_eq!(normalize(&Value::Null), "null");
    }

    #[test]
    fn test_non_ascii_preserved() {
        let value = serde_json::json!({"greeting": "こんにちは"});
        assert!(normalize(&value).contains("こんにちは"));
    }
}

//! Structured-data solution operations: JSON sorting and CSV aggregation.

use std::cmp::Ordering;

use serde::Deserialize;
use serde_json::Value;

use crate::core::operation::{ArgumentSchema, OperationDescriptor, ParamSpec, ParamType};
use crate::ops::types::{decode_args, ArgumentMapping, Operation, OperationError};

/// Sorts a JSON array of objects by one or more keys.
pub struct SortJsonObjectsOp;

#[derive(Debug, Deserialize)]
struct SortJsonObjectsArgs {
    json_text: String,
    sort_keys: Vec<String>,
}

impl Operation for SortJsonObjectsOp {
    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: "sort_json_objects".into(),
            description: "Sort a JSON array of objects by the given keys, in order, ascending. Returns the sorted array.".into(),
            schema: ArgumentSchema::new(vec![
                ParamSpec::required("json_text", ParamType::String, "The JSON array to sort, as text"),
                ParamSpec::required("sort_keys", ParamType::Array, "Object keys to sort by, highest priority first"),
            ]),
        }
    }

    fn invoke(&self, args: &ArgumentMapping) -> Result<Value, OperationError> {
        let args: SortJsonObjectsArgs = decode_args(args)?;
        let parsed: Value = serde_json::from_str(&args.json_text)
            .map_err(|e| OperationError::Execution(format!("invalid JSON input: {e}")))?;
        let Value::Array(mut items) = parsed else {
            return Err(OperationError::Execution("input is not a JSON array".into()));
        };
        items.sort_by(|a, b| {
            for key in &args.sort_keys {
                let ord = compare_values(a.get(key), b.get(key));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        Ok(Value::Array(items))
    }
}

/// Ordering over heterogeneous JSON values: missing first, then numbers,
/// then everything else by its textual form.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(nx), Some(ny)) => nx.partial_cmp(&ny).unwrap_or(Ordering::Equal),
            _ => value_text(x).cmp(&value_text(y)),
        },
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Sums a numeric column in an uploaded CSV file.
pub struct SumCsvColumnOp;

#[derive(Debug, Deserialize)]
struct SumCsvColumnArgs {
    csv_path: String,
    column: String,
}

impl Operation for SumCsvColumnOp {
    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: "sum_csv_column".into(),
            description: "Sum the numeric values of one column in an uploaded CSV file with a header row.".into(),
            schema: ArgumentSchema::new(vec![
                ParamSpec::required("csv_path", ParamType::String, "Path to the CSV file"),
                ParamSpec::required("column", ParamType::String, "Name of the column to sum"),
            ]),
        }
    }

    fn file_param(&self) -> Option<&'static str> {
        Some("csv_path")
    }

    fn invoke(&self, args: &ArgumentMapping) -> Result<Value, OperationError> {
        let args: SumCsvColumnArgs = decode_args(args)?;
        let mut reader = csv::Reader::from_path(&args.csv_path)
            .map_err(|e| OperationError::Execution(format!("failed to open CSV: {e}")))?;
        let headers = reader
            .headers()
            .map_err(|e| OperationError::Execution(format!("failed to read CSV header: {e}")))?;
        let index = headers
            .iter()
            .position(|h| h.trim() == args.column.trim())
            .ok_or_else(|| {
                OperationError::Execution(format!("column '{}' not found", args.column))
            })?;

        let mut sum = 0.0f64;
        for record in reader.records() {
            let record =
                record.map_err(|e| OperationError::Execution(format!("bad CSV record: {e}")))?;
            let field = record.get(index).unwrap_or("").trim();
            if field.is_empty() {
                continue;
            }
            let value: f64 = field.parse().map_err(|_| {
                OperationError::Execution(format!("non-numeric value '{field}' in column '{}'", args.column))
            })?;
            sum += value;
        }
        Ok(Value::from(sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_sort_by_two_keys() {
        let mut map = ArgumentMapping::new();
        map.insert(
            "json_text".into(),
            Value::String(r#"[{"name":"b","age":3},{"name":"a","age":3},{"name":"c","age":1}]"#.into()),
        );
        map.insert("sort_keys".into(), serde_json::json!(["age", "name"]));
        let result = SortJsonObjectsOp.invoke(&map).unwrap();
        let names: Vec<&str> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_sort_rejects_non_array() {
        let mut map = ArgumentMapping::new();
        map.insert("json_text".into(), Value::String("{\"a\":1}".into()));
        map.insert("sort_keys".into(), serde_json::json!(["a"]));
        let err = SortJsonObjectsOp.invoke(&map).unwrap_err();
        assert!(matches!(err, OperationError::Execution(_)));
    }

    #[test]
    fn test_sum_csv_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "name,marks").unwrap();
        writeln!(file, "alice,10").unwrap();
        writeln!(file, "bob,32.5").unwrap();

        let mut map = ArgumentMapping::new();
        map.insert("csv_path".into(), Value::String(path.display().to_string()));
        map.insert("column".into(), Value::String("marks".into()));
        let result = SumCsvColumnOp.invoke(&map).unwrap();
        assert_eq!(result, Value::from(42.5));
    }

    #[test]
    fn test_sum_csv_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marks.csv");
        std::fs::write(&path, "name,marks\nalice,10\n").unwrap();

        let mut map = ArgumentMapping::new();
        map.insert("csv_path".into(), Value::String(path.display().to_string()));
        map.insert("column".into(), Value::String("grade".into()));
        let err = SumCsvColumnOp.invoke(&map).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}

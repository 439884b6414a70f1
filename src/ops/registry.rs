//! Operation registry: the closed set of solution operations.
//!
//! Registration is static — all operations are inserted at construction and
//! the registry is never mutated afterwards, so it is safe to share behind an
//! `Arc` across concurrent requests. Identifiers produced by the intent
//! matcher that have no registry entry resolve to a deterministic fallback
//! operation that answers with a well-formed error instead of failing the
//! request.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::operation::{ArgumentSchema, OperationDescriptor};
use crate::ops::data::{SortJsonObjectsOp, SumCsvColumnOp};
use crate::ops::dates::CountWeekdayOp;
use crate::ops::image::CompressImageOp;
use crate::ops::text::{CountWordsOp, Sha256HashOp};
use crate::ops::types::{ArgumentMapping, Operation, OperationError};

/// Answer produced when no registered operation matches the question.
pub const NO_MATCH_MESSAGE: &str = "No matching function found";

/// Operation dispatched for identifiers with no registry entry.
pub struct FallbackOperation;

impl Operation for FallbackOperation {
    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: "unmatched_question".into(),
            description: "Answers with a structured error when no registered operation matches.".into(),
            schema: ArgumentSchema::empty(),
        }
    }

    fn invoke(&self, _args: &ArgumentMapping) -> Result<Value, OperationError> {
        Ok(serde_json::json!({ "error": NO_MATCH_MESSAGE }))
    }
}

/// Registry of all registered solution operations.
pub struct OperationRegistry {
    operations: HashMap<String, Box<dyn Operation>>,
    fallback: FallbackOperation,
}

impl OperationRegistry {
    /// Creates a registry with all built-in operations registered.
    pub fn with_builtins() -> Self {
        let mut registry = Self {
            operations: HashMap::new(),
            fallback: FallbackOperation,
        };

        // Text operations
        registry.insert(Sha256HashOp);
        registry.insert(CountWordsOp);

        // Date operations
        registry.insert(CountWeekdayOp);

        // Structured-data operations
        registry.insert(SortJsonObjectsOp);
        registry.insert(SumCsvColumnOp);

        // Image operations
        registry.insert(CompressImageOp);

        registry
    }

    fn insert<O: Operation + 'static>(&mut self, op: O) {
        let name = op.descriptor().name;
        self.operations.insert(name, Box::new(op));
    }

    /// Resolve an identifier to its registered operation.
    pub fn resolve(&self, identifier: &str) -> Option<&dyn Operation> {
        self.operations.get(identifier).map(|op| op.as_ref())
    }

    /// Deterministic fallback for identifiers with no registry entry.
    pub fn fallback(&self) -> &dyn Operation {
        &self.fallback
    }

    /// Argument schema for an identifier. Unregistered identifiers get an
    /// empty schema so extraction stays invocable for schema-less paths.
    pub fn schema_for(&self, identifier: &str) -> ArgumentSchema {
        self.resolve(identifier)
            .map(|op| op.descriptor().schema)
            .unwrap_or_else(ArgumentSchema::empty)
    }

    /// Descriptors of every registered operation, for matcher construction
    /// and prompt rendering.
    pub fn descriptors(&self) -> Vec<OperationDescriptor> {
        let mut descriptors: Vec<_> = self.operations.values().map(|op| op.descriptor()).collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_operations_registered() {
        let registry = OperationRegistry::with_builtins();
        for name in [
            "sha256_hash",
            "count_words",
            "count_weekday_occurrences",
            "sort_json_objects",
            "sum_csv_column",
            "compress_an_image",
        ] {
            assert!(registry.resolve(name).is_some(), "missing operation {name}");
        }
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_resolve_is_referentially_stable() {
        let registry = OperationRegistry::with_builtins();
        let first = registry.resolve("sha256_hash").unwrap();
        let second = registry.resolve("sha256_hash").unwrap();
        assert!(std::ptr::eq(
            first as *const dyn Operation as *const u8,
            second as *const dyn Operation as *const u8
        ));
        assert_eq!(
            registry.schema_for("sha256_hash").params.len(),
            first.descriptor().schema.params.len()
        );
    }

    #[test]
    fn test_unknown_identifier_gets_empty_schema() {
        let registry = OperationRegistry::with_builtins();
        assert!(registry.resolve("no_such_op").is_none());
        assert!(registry.schema_for("no_such_op").is_empty());
    }

    #[test]
    fn test_fallback_produces_no_match_answer() {
        let registry = OperationRegistry::with_builtins();
        let result = registry.fallback().invoke(&ArgumentMapping::new()).unwrap();
        assert_eq!(result["error"], Value::String(NO_MATCH_MESSAGE.into()));
    }

    #[test]
    fn test_file_consuming_subset() {
        let registry = OperationRegistry::with_builtins();
        assert_eq!(
            registry.resolve("compress_an_image").unwrap().file_param(),
            Some("image_path")
        );
        assert_eq!(
            registry.resolve("sum_csv_column").unwrap().file_param(),
            Some("csv_path")
        );
        assert_eq!(registry.resolve("sha256_hash").unwrap().file_param(), None);
    }
}

//! Text solution operations: hashing and word counting.

use serde::Deserialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::core::operation::{ArgumentSchema, OperationDescriptor, ParamSpec, ParamType};
use crate::ops::types::{decode_args, ArgumentMapping, Operation, OperationError};

/// Computes the SHA-256 digest of a text snippet.
pub struct Sha256HashOp;

#[derive(Debug, Deserialize)]
struct Sha256HashArgs {
    text: String,
}

impl Operation for Sha256HashOp {
    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: "sha256_hash".into(),
            description: "Compute the SHA-256 hash of a piece of text and return it as a lowercase hex digest.".into(),
            schema: ArgumentSchema::new(vec![ParamSpec::required(
                "text",
                ParamType::String,
                "The exact text to hash",
            )]),
        }
    }

    fn invoke(&self, args: &ArgumentMapping) -> Result<Value, OperationError> {
        let args: Sha256HashArgs = decode_args(args)?;
        let mut hasher = Sha256::new();
        hasher.update(args.text.as_bytes());
        let digest = hasher.finalize();
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        Ok(Value::String(hex))
    }
}

/// Counts whitespace-separated words in a text snippet.
pub struct CountWordsOp;

#[derive(Debug, Deserialize)]
struct CountWordsArgs {
    text: String,
}

impl Operation for CountWordsOp {
    fn descriptor(&self) -> OperationDescriptor {
        OperationDescriptor {
            name: "count_words".into(),
            description: "Count the number of whitespace-separated words in a piece of text.".into(),
            schema: ArgumentSchema::new(vec![ParamSpec::required(
                "text",
                ParamType::String,
                "The text whose words should be counted",
            )]),
        }
    }

    fn invoke(&self, args: &ArgumentMapping) -> Result<Value, OperationError> {
        let args: CountWordsArgs = decode_args(args)?;
        Ok(Value::from(args.text.split_whitespace().count()))
    }
}

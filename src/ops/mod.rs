//! Solution operations and the registry that owns them.
//!
//! This module provides:
//! - The `Operation` trait and dispatch types
//! - The closed `OperationRegistry` with its deterministic fallback
//! - Built-in operations: text, dates, structured data, images
//!
//! # Adding a new operation
//!
//! 1. Implement `Operation` in the appropriate submodule with a typed
//!    argument struct
//! 2. Register it in `OperationRegistry::with_builtins`
//! 3. Declare `file_param` if the operation consumes an uploaded file

pub use registry::{FallbackOperation, OperationRegistry, NO_MATCH_MESSAGE};
pub use types::{decode_args, ArgumentMapping, Operation, OperationError};

mod data;
mod dates;
mod image;
mod registry;
mod text;
mod types;

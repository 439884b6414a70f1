//! Argument-extraction clients for external reasoning services.
//!
//! - `types`: boundary trait and payload/error types
//! - `openai`: OpenAI-compatible chat-completions implementation

pub mod openai;
pub mod types;

pub use openai::OpenAiExtractor;
pub use types::{ArgumentExtractor, ExtractError, RawExtraction};

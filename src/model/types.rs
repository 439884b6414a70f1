//! Types for the argument-extraction boundary.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::operation::OperationDescriptor;

/// Raw structured-arguments payload returned by the reasoning service.
///
/// Convention: the service answers with `{"arguments": "<json-encoded
/// object>"}`. A missing `arguments` field is preserved as `None` so the
/// validator can classify it, rather than being treated as an error here.
#[derive(Debug, Clone, Default)]
pub struct RawExtraction {
    pub arguments: Option<String>,
}

impl RawExtraction {
    pub fn with_arguments(arguments: &str) -> Self {
        Self {
            arguments: Some(arguments.to_string()),
        }
    }
}

/// Errors raised at the extraction boundary.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("auth error: {0}")]
    Auth(String),
}

/// Boundary to the external reasoning service that fills argument schemas
/// from question text.
///
/// One idempotent call per request, no retries. `deadline`, when supplied by
/// a wrapping transport layer, bounds the external call so the pipeline can
/// degrade gracefully instead of hanging.
#[async_trait]
pub trait ArgumentExtractor: Send + Sync {
    async fn extract(
        &self,
        question: &str,
        operation: &OperationDescriptor,
        deadline: Option<Duration>,
    ) -> Result<RawExtraction, ExtractError>;
}

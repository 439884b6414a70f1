//! The routing pipeline.
//!
//! One request-scoped execution per question: match the intent, resolve the
//! operation's schema, extract arguments via the reasoning service, validate
//! them, bind the uploaded file's real path over anything the extractor
//! guessed, dispatch, and normalize the result. Every failure branch yields
//! a classified outcome with a human-readable answer; nothing here panics a
//! request.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::files::{FileContext, FileError, UploadStore};
use crate::matcher::{IntentMatch, IntentMatcher};
use crate::model::types::{ArgumentExtractor, ExtractError};
use crate::ops::{ArgumentMapping, Operation, OperationRegistry};
use crate::pipeline::validate::{validate, ValidationError};

pub mod normalize;
pub mod validate;

pub use normalize::normalize;

/// HTTP-equivalent classification of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// Answer produced, including the fallback "no matching function" answer.
    Ok,
    /// The client's input was unusable (bad upload, unextractable arguments).
    ClientError,
    /// The reasoning service or the operation itself failed.
    ServerError,
}

/// Terminal artifact of the pipeline: always a single answer string plus a
/// status classification, even on failure.
#[derive(Debug, Clone)]
pub struct RoutingOutcome {
    pub answer: String,
    pub status: StatusClass,
}

impl RoutingOutcome {
    pub fn is_ok(&self) -> bool {
        self.status == StatusClass::Ok
    }

    fn from_error(error: &RouteError) -> Self {
        Self {
            answer: serde_json::json!({ "error": error.to_string() }).to_string(),
            status: error.status(),
        }
    }
}

/// Pipeline failure taxonomy. Client-class variants reflect unusable input;
/// server-class variants reflect collaborator or operation failures.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("failed to extract parameters: {0}")]
    Extraction(#[from] ExtractError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    File(#[from] FileError),
    #[error("Error executing function {operation}: {message}")]
    Execution { operation: String, message: String },
}

impl RouteError {
    pub fn status(&self) -> StatusClass {
        match self {
            RouteError::Extraction(_) => StatusClass::ServerError,
            RouteError::Validation(_) => StatusClass::ClientError,
            RouteError::File(_) => StatusClass::ClientError,
            RouteError::Execution { .. } => StatusClass::ServerError,
        }
    }
}

/// An uploaded file as received from the transport layer.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Overwrite the operation's file parameter with the uploaded file's real
/// path. The upload is ground truth; any path the extractor derived from
/// question text loses. Idempotent.
pub fn bind_file_argument(args: &mut ArgumentMapping, param: &str, context: &FileContext) {
    if let Some(path) = context.primary_path() {
        let path = path.display().to_string();
        tracing::debug!("overriding '{param}' with uploaded file path {path}");
        args.insert(param.to_string(), Value::String(path));
    }
}

/// Binds the matcher, registry, extractor, and upload store into one
/// request pipeline. Cheap to clone via the shared `Arc`s; all shared state
/// is read-only, so any number of requests may run concurrently.
pub struct Router {
    registry: Arc<OperationRegistry>,
    matcher: Arc<dyn IntentMatcher>,
    extractor: Arc<dyn ArgumentExtractor>,
    uploads: UploadStore,
}

impl Router {
    pub fn new(
        registry: Arc<OperationRegistry>,
        matcher: Arc<dyn IntentMatcher>,
        extractor: Arc<dyn ArgumentExtractor>,
        uploads: UploadStore,
    ) -> Self {
        Self {
            registry,
            matcher,
            extractor,
            uploads,
        }
    }

    pub fn registry(&self) -> &OperationRegistry {
        &self.registry
    }

    /// Full request entry point: stage the upload if present, then run the
    /// pipeline. Upload staging failures are client-input errors.
    pub async fn handle(
        &self,
        question: &str,
        upload: Option<Upload>,
        deadline: Option<Duration>,
    ) -> RoutingOutcome {
        let context = match upload {
            Some(upload) => match self.uploads.stage(&upload.file_name, &upload.bytes) {
                Ok(context) => Some(context),
                Err(e) => {
                    tracing::warn!("upload rejected: {e}");
                    return RoutingOutcome::from_error(&RouteError::File(e));
                }
            },
            None => None,
        };
        self.answer(question, context.as_ref(), deadline).await
    }

    /// Run the pipeline for a question with an already-staged file context.
    pub async fn answer(
        &self,
        question: &str,
        file: Option<&FileContext>,
        deadline: Option<Duration>,
    ) -> RoutingOutcome {
        match self.run(question, file, deadline).await {
            Ok(answer) => RoutingOutcome {
                answer,
                status: StatusClass::Ok,
            },
            Err(error) => {
                tracing::warn!("pipeline failed: {error}");
                RoutingOutcome::from_error(&error)
            }
        }
    }

    async fn run(
        &self,
        question: &str,
        file: Option<&FileContext>,
        deadline: Option<Duration>,
    ) -> Result<String, RouteError> {
        let matched = match self.matcher.best_match(question).await {
            Ok(matched) => matched,
            Err(e) => {
                // Matcher failures degrade to the fallback answer.
                tracing::warn!("intent matcher failed: {e}");
                IntentMatch::none()
            }
        };
        tracing::debug!(
            identifier = %matched.identifier,
            score = matched.score,
            "matched operation"
        );

        let operation = if matched.is_unmatched() {
            None
        } else {
            self.registry.resolve(&matched.identifier)
        };
        let Some(operation) = operation else {
            // Unmatched or unknown identifiers produce the registry's
            // well-formed error answer, not a failed request.
            let result = self
                .registry
                .fallback()
                .invoke(&ArgumentMapping::new())
                .map_err(|e| RouteError::Execution {
                    operation: "fallback".to_string(),
                    message: e.to_string(),
                })?;
            return Ok(normalize(&result));
        };

        let descriptor = operation.descriptor();
        let raw = self.extractor.extract(question, &descriptor, deadline).await?;
        tracing::debug!("raw extraction payload: {:?}", raw.arguments);

        let mut args = validate(&raw, &descriptor.schema)?;
        if let (Some(context), Some(param)) = (file, operation.file_param()) {
            bind_file_argument(&mut args, param, context);
        }

        tracing::debug!("dispatching {} with {} argument(s)", descriptor.name, args.len());
        let result = operation.invoke(&args).map_err(|e| RouteError::Execution {
            operation: descriptor.name.clone(),
            message: e.to_string(),
        })?;
        Ok(normalize(&result))
    }
}

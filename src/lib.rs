//! Question-to-operation routing library.
//!
//! `askroute` answers free-text questions by routing each one to a
//! registered solution operation: the intent matcher picks the operation,
//! an external reasoning service fills its argument schema from the
//! question, the validated arguments are dispatched, and the result is
//! normalized to a single answer string. An optional uploaded file is
//! staged per request and its real path overrides whatever path the
//! extractor guessed.
//!
//! # Architecture
//!
//! - `core`: operation descriptors and argument schemas
//! - `ops`: solution operations and the closed registry with its fallback
//! - `matcher`: intent-matching boundary plus a built-in fuzzy matcher
//! - `model`: argument-extraction boundary (OpenAI-compatible client)
//! - `files`: per-request upload staging
//! - `pipeline`: the router tying it all together, outcome classification
//! - `config`: environment-driven settings
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use askroute::config::RouterConfig;
//! use askroute::files::UploadStore;
//! use askroute::matcher::FuzzyIntentMatcher;
//! use askroute::model::OpenAiExtractor;
//! use askroute::ops::OperationRegistry;
//! use askroute::pipeline::Router;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RouterConfig::from_env()?;
//! let registry = Arc::new(OperationRegistry::with_builtins());
//! let matcher = Arc::new(FuzzyIntentMatcher::from_registry(&registry));
//! let extractor = Arc::new(OpenAiExtractor::new(config.extractor));
//! let router = Router::new(registry, matcher, extractor, UploadStore::new(config.staging_dir));
//!
//! let outcome = router.handle("what is the sha256 of abc?", None, None).await;
//! println!("{}", outcome.answer);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod files;
pub mod matcher;
pub mod model;
pub mod ops;
pub mod pipeline;

pub use config::RouterConfig;
pub use files::{FileContext, UploadStore};
pub use matcher::{FuzzyIntentMatcher, IntentMatch, IntentMatcher};
pub use model::{ArgumentExtractor, OpenAiExtractor, RawExtraction};
pub use ops::{Operation, OperationRegistry};
pub use pipeline::{RouteError, Router, RoutingOutcome, StatusClass, Upload};

//! Intent matcher boundary.
//!
//! The matcher maps free question text to the identifier of the operation
//! that should answer it. Its scoring internals are a collaborator concern:
//! the pipeline only consumes this trait, so an external semantic service
//! can replace the built-in fuzzy matcher without touching the pipeline.

use async_trait::async_trait;

pub use fuzzy::FuzzyIntentMatcher;

mod fuzzy;

/// One ranked candidate from a match call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredIdentifier {
    pub identifier: String,
    pub score: u32,
}

/// Best-guess match for a question, with ranking info.
///
/// An empty `identifier` means no recognizable intent; the pipeline routes
/// it to the registry fallback rather than failing.
#[derive(Debug, Clone)]
pub struct IntentMatch {
    pub identifier: String,
    pub score: u32,
    pub alternatives: Vec<ScoredIdentifier>,
}

impl IntentMatch {
    pub fn none() -> Self {
        Self {
            identifier: String::new(),
            score: 0,
            alternatives: Vec::new(),
        }
    }

    pub fn is_unmatched(&self) -> bool {
        self.identifier.is_empty()
    }
}

/// Errors raised by a matcher backend.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error("matcher backend failed: {0}")]
    Backend(String),
}

/// Boundary to the intent-matching collaborator.
#[async_trait]
pub trait IntentMatcher: Send + Sync {
    /// Return the best-matching operation identifier for a question.
    async fn best_match(&self, question: &str) -> Result<IntentMatch, MatchError>;
}

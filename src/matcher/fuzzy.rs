//! In-process fuzzy intent matcher.
//!
//! Scores the question's tokens against each operation's name, description,
//! and registered example phrasings using `nucleo-matcher`. Deliberately
//! simple: it needs no network and no model, and any semantic matcher can
//! replace it through the `IntentMatcher` trait.

use async_trait::async_trait;

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::matcher::{IntentMatch, IntentMatcher, MatchError, ScoredIdentifier};
use crate::ops::OperationRegistry;

struct Candidate {
    identifier: String,
    phrase: String,
}

/// Fuzzy matcher over the registry's descriptors plus optional extra
/// example phrasings per operation.
pub struct FuzzyIntentMatcher {
    candidates: Vec<Candidate>,
}

impl FuzzyIntentMatcher {
    /// Build candidates from every registered operation's descriptor.
    pub fn from_registry(registry: &OperationRegistry) -> Self {
        let candidates = registry
            .descriptors()
            .into_iter()
            .map(|d| Candidate {
                phrase: format!("{} {}", d.name.replace('_', " "), d.description),
                identifier: d.name,
            })
            .collect();
        Self { candidates }
    }

    /// Register an extra example phrasing for an identifier. Questions that
    /// resemble the phrasing will rank that identifier higher.
    pub fn add_example(&mut self, identifier: &str, phrase: &str) {
        self.candidates.push(Candidate {
            identifier: identifier.to_string(),
            phrase: phrase.to_string(),
        });
    }

    fn score_candidates(&self, question: &str) -> Vec<ScoredIdentifier> {
        let tokens: Vec<&str> = question
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| t.len() > 2)
            .collect();
        if tokens.is_empty() {
            return Vec::new();
        }
        let patterns: Vec<Pattern> = tokens
            .iter()
            .map(|t| {
                Pattern::new(t, CaseMatching::Ignore, Normalization::Smart, AtomKind::Substring)
            })
            .collect();

        let mut matcher = Matcher::new(Config::DEFAULT);
        let mut utf32_buf = Vec::new();
        let mut best_per_identifier: Vec<ScoredIdentifier> = Vec::new();

        for candidate in &self.candidates {
            let haystack = Utf32Str::new(&candidate.phrase, &mut utf32_buf);
            let total: u32 = patterns
                .iter()
                .filter_map(|p| p.score(haystack, &mut matcher))
                .sum();
            if total == 0 {
                continue;
            }
            match best_per_identifier
                .iter_mut()
                .find(|s| s.identifier == candidate.identifier)
            {
                Some(existing) => existing.score = existing.score.max(total),
                None => best_per_identifier.push(ScoredIdentifier {
                    identifier: candidate.identifier.clone(),
                    score: total,
                }),
            }
        }

        // Descending score, ascending identifier for deterministic ties.
        best_per_identifier.sort_by(|a, b| match b.score.cmp(&a.score) {
            std::cmp::Ordering::Equal => a.identifier.cmp(&b.identifier),
            other => other,
        });
        best_per_identifier
    }
}

#[async_trait]
impl IntentMatcher for FuzzyIntentMatcher {
    async fn best_match(&self, question: &str) -> Result<IntentMatch, MatchError> {
        let mut ranked = self.score_candidates(question);
        if ranked.is_empty() {
            return Ok(IntentMatch::none());
        }
        let best = ranked.remove(0);
        Ok(IntentMatch {
            identifier: best.identifier,
            score: best.score,
            alternatives: ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> FuzzyIntentMatcher {
        let registry = OperationRegistry::with_builtins();
        let mut matcher = FuzzyIntentMatcher::from_registry(&registry);
        matcher.add_example("count_weekday_occurrences", "how many Wednesdays are there between two dates");
        matcher
    }

    #[tokio::test]
    async fn test_matches_compress_image_question() {
        let result = matcher().best_match("please compress this image for me").await.unwrap();
        assert_eq!(result.identifier, "compress_an_image");
        assert!(result.score > 0);
    }

    #[tokio::test]
    async fn test_example_phrase_boosts_match() {
        let result = matcher()
            .best_match("how many Wednesdays between 2024-01-01 and 2024-12-31?")
            .await
            .unwrap();
        assert_eq!(result.identifier, "count_weekday_occurrences");
    }

    #[tokio::test]
    async fn test_gibberish_is_unmatched() {
        let result = matcher().best_match("zzz qqq xyzzy").await.unwrap();
        assert!(result.is_unmatched());
        assert!(result.alternatives.is_empty());
    }

    #[tokio::test]
    async fn test_ranking_is_deterministic() {
        let m = matcher();
        let a = m.best_match("sum the marks column of this csv").await.unwrap();
        let b = m.best_match("sum the marks column of this csv").await.unwrap();
        assert_eq!(a.identifier, b.identifier);
        assert_eq!(a.score, b.score);
    }
}

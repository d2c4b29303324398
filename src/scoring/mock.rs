use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::error::ScoringError;
use super::scorer::RelevanceModel;

/// Relevance model with scores fixed per passage text.
#[derive(Debug, Default)]
pub struct MockRelevanceModel {
    scores: HashMap<String, f32>,
    default_score: f32,
    fail: AtomicBool,
    drop_last: AtomicBool,
    calls: AtomicUsize,
    pairs_scored: AtomicUsize,
}

impl MockRelevanceModel {
    pub fn new(default_score: f32) -> Self {
        Self {
            default_score,
            ..Default::default()
        }
    }

    pub fn with_score(mut self, passage: impl Into<String>, score: f32) -> Self {
        self.scores.insert(passage.into(), score);
        self
    }

    pub fn with_scores<I, S>(mut self, scores: I) -> Self
    where
        I: IntoIterator<Item = (S, f32)>,
        S: Into<String>,
    {
        self.scores
            .extend(scores.into_iter().map(|(p, s)| (p.into(), s)));
        self
    }

    /// Makes every subsequent call fail with `Unavailable`.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Makes the model return one score fewer than requested.
    pub fn set_drop_last(&self, drop_last: bool) {
        self.drop_last.store(drop_last, Ordering::SeqCst);
    }

    /// Number of `predict` invocations.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Total pairs across all invocations.
    pub fn pairs_scored(&self) -> usize {
        self.pairs_scored.load(Ordering::SeqCst)
    }
}

impl RelevanceModel for MockRelevanceModel {
    fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, ScoringError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pairs_scored.fetch_add(pairs.len(), Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(ScoringError::Unavailable {
                reason: "mock relevance model set to fail".to_string(),
            });
        }

        let mut scores: Vec<f32> = pairs
            .iter()
            .map(|(_, passage)| {
                self.scores
                    .get(*passage)
                    .copied()
                    .unwrap_or(self.default_score)
            })
            .collect();

        if self.drop_last.load(Ordering::SeqCst) {
            scores.pop();
        }

        Ok(scores)
    }
}

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::candidate::Candidate;
use crate::embedding::Reranker;

use super::error::ScoringError;

/// Stateless batch scorer over `(query, passage)` pairs.
///
/// Scores are unbounded and need not be normalized; higher means more relevant.
pub trait RelevanceModel: Send + Sync {
    fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, ScoringError>;
}

impl RelevanceModel for Reranker {
    fn predict(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, ScoringError> {
        Ok(Reranker::predict(self, pairs)?)
    }
}

pub struct RelevanceScorer<R: RelevanceModel> {
    model: Arc<R>,
}

impl<R: RelevanceModel> Clone for RelevanceScorer<R> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
        }
    }
}

impl<R: RelevanceModel> std::fmt::Debug for RelevanceScorer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceScorer").finish_non_exhaustive()
    }
}

impl<R: RelevanceModel> RelevanceScorer<R> {
    pub fn new(model: Arc<R>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &Arc<R> {
        &self.model
    }

    /// Scores each candidate's claim text against `query`, in candidate order.
    pub fn score(&self, query: &str, candidates: &[Candidate]) -> Result<Vec<f32>, ScoringError> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let pairs: Vec<(&str, &str)> = candidates
            .iter()
            .map(|c| (query, c.content.as_str()))
            .collect();

        let scores = self.model.predict(&pairs)?;

        if scores.len() != pairs.len() {
            return Err(ScoringError::LengthMismatch {
                expected: pairs.len(),
                actual: scores.len(),
            });
        }

        debug!(num_candidates = candidates.len(), "Relevance scoring complete");
        Ok(scores)
    }
}

impl<R: RelevanceModel + 'static> RelevanceScorer<R> {
    /// Runs [`score`](Self::score) on the blocking thread pool.
    #[instrument(skip(self, query, candidates), fields(num_candidates = candidates.len()))]
    pub async fn score_blocking(
        &self,
        query: &str,
        candidates: Arc<[Candidate]>,
    ) -> Result<Vec<f32>, ScoringError> {
        let scorer = self.clone();
        let query = query.to_string();

        tokio::task::spawn_blocking(move || scorer.score(&query, &candidates))
            .await
            .map_err(|e| ScoringError::ComputationFailed {
                reason: e.to_string(),
            })?
    }
}

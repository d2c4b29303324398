use thiserror::Error;

use crate::embedding::RerankerError;

#[derive(Debug, Error)]
/// Errors returned by relevance scoring. Always fatal for the current search.
pub enum ScoringError {
    /// Reranker load/inference/tokenization error.
    #[error("reranker error: {0}")]
    Reranker(#[from] RerankerError),

    /// The model backend cannot serve requests.
    #[error("relevance model unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },

    /// The model returned a different number of scores than it was given pairs.
    #[error("relevance model returned {actual} scores for {expected} pairs")]
    LengthMismatch {
        /// Number of pairs sent.
        expected: usize,
        /// Number of scores received.
        actual: usize,
    },

    /// The blocking inference task failed to complete.
    #[error("scoring computation failed: {reason}")]
    ComputationFailed {
        /// Error message.
        reason: String,
    },
}

use thiserror::Error;

use crate::ranking::RankingError;
use crate::retrieval::RetrievalError;
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
/// A failed search. No partial results are returned with any variant.
pub enum SearchError {
    /// Candidate retrieval failed (index unavailable, empty or unreachable).
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrievalError),

    /// Relevance scoring failed.
    #[error("relevance scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    /// Stage outputs could not be merged.
    #[error("ranking failed: {0}")]
    Ranking(#[from] RankingError),

    /// Pipeline configuration is invalid.
    #[error("invalid pipeline configuration: {reason}")]
    InvalidConfig {
        /// Error message.
        reason: String,
    },
}

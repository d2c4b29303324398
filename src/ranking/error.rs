use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned when merging stage outputs.
pub enum RankingError {
    /// Candidates, scores and weights must be positionally aligned.
    #[error(
        "misaligned stage outputs: {candidates} candidates, {scores} scores, {weights} weights"
    )]
    Misaligned {
        /// Candidate count.
        candidates: usize,
        /// Relevance score count.
        scores: usize,
        /// Filter weight count.
        weights: usize,
    },
}

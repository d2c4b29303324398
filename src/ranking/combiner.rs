use std::cmp::Ordering;

use tracing::debug;

use crate::candidate::Candidate;
use crate::constants::SCORE_DECIMALS;
use crate::filter::FilterWeight;

use super::error::RankingError;
use super::types::{ResultRecord, ScoredCandidate};

/// Multiplies each relevance score by its filter weight and drops excluded candidates.
///
/// All three inputs must have the same length; survivors keep their input order.
pub fn combine(
    candidates: &[Candidate],
    scores: &[f32],
    weights: &[FilterWeight],
) -> Result<Vec<ScoredCandidate>, RankingError> {
    if candidates.len() != scores.len() || candidates.len() != weights.len() {
        return Err(RankingError::Misaligned {
            candidates: candidates.len(),
            scores: scores.len(),
            weights: weights.len(),
        });
    }

    let combined: Vec<ScoredCandidate> = candidates
        .iter()
        .zip(scores)
        .zip(weights)
        .enumerate()
        .filter_map(|(rank, ((candidate, &score), weight))| {
            weight
                .apply(score)
                .map(|final_score| ScoredCandidate::new(final_score, rank, candidate.clone()))
        })
        .collect();

    debug!(
        candidates = candidates.len(),
        kept = combined.len(),
        "Scores combined with filter weights"
    );

    Ok(combined)
}

// NaN ranks below every real score.
fn by_score_desc(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    let key = |s: f32| if s.is_nan() { f32::NEG_INFINITY } else { s };

    key(b.final_score)
        .total_cmp(&key(a.final_score))
        .then(a.retrieval_rank.cmp(&b.retrieval_rank))
}

/// Sorts by final score (highest first, ties by retrieval order) and keeps the top `limit`.
pub fn rank(mut scored: Vec<ScoredCandidate>, limit: usize) -> Vec<ScoredCandidate> {
    scored.sort_by(by_score_desc);
    scored.truncate(limit);
    scored
}

/// Ranks `scored` and shapes the top `limit` into display records.
pub fn format_results(scored: Vec<ScoredCandidate>, limit: usize) -> Vec<ResultRecord> {
    rank(scored, limit)
        .into_iter()
        .map(ResultRecord::from_scored)
        .collect()
}

/// Rounds a score to three decimals for display.
pub fn round_score(score: f32) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score as f64 * factor).round() / factor
}

//! Result combination: relevance × filter weight, exclusion, ordering, truncation.

pub mod combiner;
pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use combiner::{combine, format_results, rank, round_score};
pub use error::RankingError;
pub use types::{ResultRecord, ScoredCandidate};

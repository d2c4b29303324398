//! Cross-cutting, shared constants.
//!
//! Ranking constants (boosts, budgets) live here so the filter engine, the
//! combiner and the pipeline config agree on one set of values.

/// Candidates requested from the vector store per query.
pub const DEFAULT_TOP_K: u64 = 75;

/// Maximum number of records returned to the caller.
pub const DEFAULT_RESULT_LIMIT: usize = 15;

/// Decimal places kept on the displayed score.
pub const SCORE_DECIMALS: i32 = 3;

/// Base filter weight before any preferred boost.
pub const BASE_FILTER_WEIGHT: f32 = 1.0;

/// Boost for a matching preferred classification prefix.
pub const CLASSIFICATION_BOOST: f32 = 0.10;

/// Boost for a matching preferred exact title.
pub const TITLE_BOOST: f32 = 0.30;

/// Boost for a matching preferred keyword (title or abstract).
pub const KEYWORD_BOOST: f32 = 0.15;

/// Embedding dimension of `text-embedding-3-small`.
pub const DEFAULT_EMBEDDING_DIM: usize = 1536;

/// Embedding model the persisted index was built with.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Qdrant collection holding one point per patent claim.
pub const DEFAULT_COLLECTION_NAME: &str = "patent_claims";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_preferred_boosts_sum() {
        let total = BASE_FILTER_WEIGHT + CLASSIFICATION_BOOST + TITLE_BOOST + KEYWORD_BOOST;
        assert!((total - 1.55).abs() < 1e-6);
    }

    #[test]
    fn test_top_k_exceeds_limit() {
        assert!(DEFAULT_TOP_K as usize > DEFAULT_RESULT_LIMIT);
    }
}

//! Claimsearch library crate (used by the CLI binary and integration tests).
//!
//! A search runs in five stages: retrieve the top-K similar claims from Qdrant,
//! score every `(query, claim)` pair with a cross-encoder, weigh candidates against
//! the caller's metadata filters, combine both signals, and return the top results.
//!
//! # Public API Surface
//!
//! ## Orchestration
//! - [`SearchPipeline`], [`SearchRequest`], [`PipelineConfig`] - End-to-end search
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! ## Stages
//! - [`CandidateRetriever`] - Query embedding and similarity search
//! - [`RelevanceScorer`], [`RelevanceModel`] - Cross-encoder scoring
//! - [`FilterEngine`], [`QueryFilters`], [`FilterWeight`] - Required/preferred metadata rules
//! - [`combine`], [`format_results`] - Score fusion and ranking
//!
//! ## Backends
//! - [`OpenAiEmbedder`] - Query embeddings over HTTP
//! - [`Reranker`], [`RerankerConfig`] - BERT cross-encoder on candle
//! - [`QdrantClient`] - Vector index access
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod candidate;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod filter;
pub mod ranking;
pub mod retrieval;
pub mod scoring;
pub mod search;
pub mod vectordb;

pub use candidate::{Candidate, ClaimMetadata};
pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingError, OpenAiEmbedder, QueryEmbedder, Reranker, RerankerConfig, RerankerError,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbedder;
pub use filter::{
    Constraint, FilterEngine, FilterField, FilterMode, FilterWeight, QueryFilters,
    compute_filter_weights,
};
pub use ranking::{RankingError, ResultRecord, ScoredCandidate, combine, format_results};
pub use retrieval::{CandidateRetriever, RetrievalError};
#[cfg(any(test, feature = "mock"))]
pub use scoring::MockRelevanceModel;
pub use scoring::{RelevanceModel, RelevanceScorer, ScoringError};
pub use search::{PipelineConfig, SearchError, SearchPipeline, SearchRequest};
#[cfg(any(test, feature = "mock"))]
pub use vectordb::MockVectorDbClient;
pub use vectordb::{QdrantClient, VectorDbClient, VectorDbError};

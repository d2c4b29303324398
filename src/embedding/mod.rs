//! Embedding + model utilities.
//!
//! - [`openai`] embeds query text for the vector store lookup.
//! - [`reranker`] provides the cross-encoder used by [`crate::scoring`].

/// BERT cross-encoder wrapper used by the reranker.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// OpenAI-compatible query embedder.
pub mod openai;
/// Cross-encoder reranker.
pub mod reranker;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockEmbedder;
pub use openai::OpenAiEmbedder;
pub use reranker::{Reranker, RerankerConfig, RerankerError};

/// Turns query text into a vector in the same space as the persisted index.
pub trait QueryEmbedder: Send + Sync {
    fn embed(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<Vec<f32>, EmbeddingError>> + Send;
}

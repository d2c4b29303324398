use thiserror::Error;

use crate::embedding::EmbeddingError;
use crate::vectordb::VectorDbError;

#[derive(Debug, Error)]
/// Errors returned while fetching candidates from the index.
pub enum RetrievalError {
    /// The query could not be embedded.
    #[error("query embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    /// The vector store is unreachable, missing the collection, or failed the search.
    #[error("vector store error: {0}")]
    VectorDb(#[from] VectorDbError),

    /// The collection exists but holds no claims.
    #[error("index '{collection}' is empty")]
    EmptyIndex {
        /// Collection name.
        collection: String,
    },
}

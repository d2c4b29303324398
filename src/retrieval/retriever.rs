use tracing::{debug, instrument};

use crate::candidate::Candidate;
use crate::embedding::QueryEmbedder;
use crate::vectordb::VectorDbClient;

use super::error::RetrievalError;

pub struct CandidateRetriever<E: QueryEmbedder, V: VectorDbClient> {
    embedder: E,
    store: V,
    collection: String,
}

impl<E: QueryEmbedder, V: VectorDbClient> std::fmt::Debug for CandidateRetriever<E, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateRetriever")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl<E: QueryEmbedder, V: VectorDbClient> CandidateRetriever<E, V> {
    pub fn new(embedder: E, store: V, collection: impl Into<String>) -> Self {
        Self {
            embedder,
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    pub fn store(&self) -> &V {
        &self.store
    }

    /// Returns up to `k` candidates, most similar first.
    ///
    /// An empty result is not an error; an empty or missing index is. The index is
    /// only counted when the search comes back empty.
    #[instrument(skip(self, query), fields(collection = %self.collection, query_len = query.len()))]
    pub async fn retrieve(&self, query: &str, k: u64) -> Result<Vec<Candidate>, RetrievalError> {
        let embedding = self.embedder.embed(query).await?;
        debug!(dim = embedding.len(), "Query embedded, searching index");

        let hits = self.store.search(&self.collection, embedding, k).await?;

        if hits.is_empty() && self.store.count_points(&self.collection).await? == 0 {
            return Err(RetrievalError::EmptyIndex {
                collection: self.collection.clone(),
            });
        }

        debug!(
            candidates = hits.len(),
            top_similarity = hits.first().map(|h| h.score),
            "Similarity search complete"
        );

        Ok(hits.into_iter().map(|hit| hit.candidate).collect())
    }
}

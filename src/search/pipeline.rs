use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::candidate::Candidate;
use crate::config::Config;
use crate::constants::{DEFAULT_RESULT_LIMIT, DEFAULT_TOP_K};
use crate::embedding::QueryEmbedder;
use crate::filter::FilterEngine;
use crate::ranking::{ResultRecord, combine, format_results};
use crate::retrieval::CandidateRetriever;
use crate::scoring::{RelevanceModel, RelevanceScorer};
use crate::vectordb::VectorDbClient;

use super::error::SearchError;
use super::request::SearchRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Candidates requested from the index.
    pub top_k: u64,
    /// Records returned to the caller.
    pub result_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            top_k: config.top_k,
            result_limit: config.result_limit,
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if self.top_k == 0 {
            return Err(SearchError::InvalidConfig {
                reason: "top_k must be greater than 0".to_string(),
            });
        }
        if self.result_limit == 0 {
            return Err(SearchError::InvalidConfig {
                reason: "result_limit must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Retrieval → (relevance scoring ∥ filter evaluation) → combination → ranking.
pub struct SearchPipeline<E: QueryEmbedder, V: VectorDbClient, R: RelevanceModel> {
    retriever: CandidateRetriever<E, V>,
    scorer: RelevanceScorer<R>,
    config: PipelineConfig,
}

impl<E, V, R> std::fmt::Debug for SearchPipeline<E, V, R>
where
    E: QueryEmbedder,
    V: VectorDbClient,
    R: RelevanceModel,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchPipeline")
            .field("retriever", &self.retriever)
            .field("scorer", &self.scorer)
            .field("config", &self.config)
            .finish()
    }
}

impl<E, V, R> SearchPipeline<E, V, R>
where
    E: QueryEmbedder,
    V: VectorDbClient,
    R: RelevanceModel + 'static,
{
    /// `model` is the process-wide cross-encoder handle; it is shared, never reloaded.
    pub fn new(
        retriever: CandidateRetriever<E, V>,
        model: Arc<R>,
        config: PipelineConfig,
    ) -> Result<Self, SearchError> {
        config.validate()?;

        Ok(Self {
            retriever,
            scorer: RelevanceScorer::new(model),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn retriever(&self) -> &CandidateRetriever<E, V> {
        &self.retriever
    }

    #[instrument(skip(self, request), fields(query_len = request.query.len()))]
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<ResultRecord>, SearchError> {
        if request.is_blank() {
            debug!("Blank query, returning no results");
            return Ok(Vec::new());
        }
        let query = request.trimmed_query();

        let candidates: Arc<[Candidate]> = self
            .retriever
            .retrieve(query, self.config.top_k)
            .await?
            .into();

        if candidates.is_empty() {
            debug!("Retriever returned no candidates");
            return Ok(Vec::new());
        }

        let filters = request.filters();
        debug!(
            candidates = candidates.len(),
            has_required = filters.has_required(),
            "Scoring and filtering candidates"
        );
        let (scores, weights) = tokio::join!(
            self.scorer.score_blocking(query, Arc::clone(&candidates)),
            async { FilterEngine::new(&filters).weigh_all(&candidates) },
        );
        let scores = scores?;

        let combined = combine(&candidates, &scores, &weights)?;
        let results = format_results(combined, self.config.result_limit);

        info!(
            candidates = candidates.len(),
            returned = results.len(),
            top_score = results.first().map(|r| r.score),
            "Search complete"
        );

        Ok(results)
    }
}

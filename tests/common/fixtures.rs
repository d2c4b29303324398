//! Test fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use claimsearch::candidate::{Candidate, ClaimMetadata};
use claimsearch::embedding::MockEmbedder;
use claimsearch::retrieval::CandidateRetriever;
use claimsearch::scoring::MockRelevanceModel;
use claimsearch::search::{PipelineConfig, SearchPipeline};
use claimsearch::vectordb::{ClaimPoint, MockVectorDbClient};

pub const COLLECTION: &str = "patent_claims";

pub const EMBEDDING_DIM: usize = 8;

pub type MockPipeline = SearchPipeline<MockEmbedder, MockVectorDbClient, MockRelevanceModel>;

#[derive(Default)]
pub struct ClaimBuilder {
    doc_number: Option<String>,
    title: Option<String>,
    classification: Option<String>,
    r#abstract: Option<String>,
    content: Option<String>,
}

impl ClaimBuilder {
    pub fn new(doc_number: &str) -> Self {
        Self {
            doc_number: Some(doc_number.to_string()),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn classification(mut self, classification: &str) -> Self {
        self.classification = Some(classification.to_string());
        self
    }

    pub fn r#abstract(mut self, text: &str) -> Self {
        self.r#abstract = Some(text.to_string());
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn build(self) -> Candidate {
        let doc_number = self.doc_number.unwrap_or_default();
        let content = self
            .content
            .unwrap_or_else(|| format!("1. The apparatus of {doc_number}."));

        Candidate::new(
            content,
            ClaimMetadata::new(
                doc_number,
                self.title.unwrap_or_default(),
                self.classification.unwrap_or_default(),
            )
            .with_abstract(self.r#abstract.unwrap_or_default()),
        )
    }
}

/// `n` filler claims titled "Generic Device" under H05K.
pub fn filler_claims(n: usize) -> Vec<Candidate> {
    (0..n)
        .map(|i| {
            ClaimBuilder::new(&format!("US2024{i:04}"))
                .title("Generic Device")
                .classification("H05K 7/20")
                .build()
        })
        .collect()
}

pub fn seeded_store(candidates: Vec<Candidate>) -> MockVectorDbClient {
    let embedder = MockEmbedder::new(EMBEDDING_DIM);
    let store = MockVectorDbClient::new();
    store.create_collection(COLLECTION, EMBEDDING_DIM as u64);

    let points = candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| ClaimPoint::new(i as u64, embedder.embedding_for(&c.content), c))
        .collect();
    store
        .insert_points(COLLECTION, points)
        .expect("Seeding the mock store should succeed");
    store
}

pub fn build_pipeline(candidates: Vec<Candidate>, model: Arc<MockRelevanceModel>) -> MockPipeline {
    build_pipeline_with(candidates, model, PipelineConfig::default())
}

pub fn build_pipeline_with(
    candidates: Vec<Candidate>,
    model: Arc<MockRelevanceModel>,
    config: PipelineConfig,
) -> MockPipeline {
    let retriever = CandidateRetriever::new(
        MockEmbedder::new(EMBEDDING_DIM),
        seeded_store(candidates),
        COLLECTION,
    );
    SearchPipeline::new(retriever, model, config).expect("Pipeline config should be valid")
}

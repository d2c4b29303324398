use std::sync::Arc;

use super::*;
use crate::candidate::{Candidate, ClaimMetadata};
use crate::embedding::MockEmbedder;
use crate::filter::FilterMode;
use crate::retrieval::{CandidateRetriever, RetrievalError};
use crate::scoring::{MockRelevanceModel, ScoringError};
use crate::vectordb::{ClaimPoint, MockVectorDbClient};

const COLLECTION: &str = "claims";
const DIM: usize = 4;

type TestPipeline = SearchPipeline<MockEmbedder, MockVectorDbClient, MockRelevanceModel>;

fn claim(doc: &str, title: &str, class: &str) -> Candidate {
    Candidate::new(
        format!("1. Claim of {doc}."),
        ClaimMetadata::new(doc, title, class),
    )
}

fn pipeline_with(candidates: Vec<Candidate>, model: Arc<MockRelevanceModel>) -> TestPipeline {
    let embedder = MockEmbedder::new(DIM);
    let store = MockVectorDbClient::new();
    store.create_collection(COLLECTION, DIM as u64);

    let points = candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| ClaimPoint::new(i as u64, embedder.embedding_for(&c.content), c))
        .collect();
    store.insert_points(COLLECTION, points).unwrap();

    let retriever = CandidateRetriever::new(embedder, store, COLLECTION);
    SearchPipeline::new(retriever, model, PipelineConfig::default()).unwrap()
}

fn docs(results: &[crate::ranking::ResultRecord]) -> Vec<&str> {
    results.iter().map(|r| r.document_number.as_str()).collect()
}

#[tokio::test]
async fn test_required_classification_excludes_mismatch() {
    let model = Arc::new(
        MockRelevanceModel::new(1.0)
            .with_score("1. Claim of US-A.", 4.0)
            .with_score("1. Claim of US-B.", 9.5)
            .with_score("1. Claim of US-C.", 2.0),
    );
    let pipeline = pipeline_with(
        vec![
            claim("US-A", "Inductive Charger", "H02J 50/10"),
            claim("US-B", "Radio Link", "H04W 4/80"),
            claim("US-C", "Charging Pad", "h02j 7/00"),
        ],
        model,
    );

    let request =
        SearchRequest::new("wireless charging").classification("H02J", FilterMode::Required);
    let results = pipeline.search(&request).await.unwrap();

    assert_eq!(docs(&results), vec!["US-A", "US-C"]);
    assert_eq!(results[0].score, 4.0);
    assert_eq!(results[1].score, 2.0);
}

#[tokio::test]
async fn test_blank_query_makes_no_calls() {
    let model = Arc::new(MockRelevanceModel::new(1.0));
    let pipeline = pipeline_with(vec![claim("US1", "T", "H02J")], Arc::clone(&model));

    for query in ["", "   ", "\t\n"] {
        let results = pipeline.search(&SearchRequest::new(query)).await.unwrap();
        assert!(results.is_empty());
    }

    assert_eq!(pipeline.retriever().embedder().call_count(), 0);
    assert_eq!(pipeline.retriever().store().search_calls(), 0);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_preferred_title_boost_keeps_all() {
    let mut candidates: Vec<Candidate> = (0..19)
        .map(|i| claim(&format!("US{i:02}"), "Other Device", "H01M"))
        .collect();
    candidates.push(claim("US-BP", "Battery Pack", "H01M"));

    let model = Arc::new(MockRelevanceModel::new(1.0).with_score("1. Claim of US-BP.", 2.0));
    let pipeline = pipeline_with(candidates, Arc::clone(&model));

    let request = SearchRequest::new("battery").title("Battery Pack", FilterMode::Preferred);
    let results = pipeline.search(&request).await.unwrap();

    assert_eq!(results.len(), 15);
    assert_eq!(results[0].document_number, "US-BP");
    assert_eq!(results[0].score, 2.6);
    assert!(results[1..].iter().all(|r| r.score == 1.0));
    assert_eq!(model.call_count(), 1);
    assert_eq!(model.pairs_scored(), 20);
}

#[tokio::test]
async fn test_all_preferred_boosts_add() {
    let model = Arc::new(MockRelevanceModel::new(2.0));
    let pipeline = pipeline_with(
        vec![
            Candidate::new(
                "1. Claim of US1.",
                ClaimMetadata::new("US1", "Battery Pack", "H01M 50/20")
                    .with_abstract("A lithium cell module."),
            ),
            claim("US2", "Seat", "B60N"),
        ],
        model,
    );

    let request = SearchRequest::new("battery")
        .classification("H01M", FilterMode::Preferred)
        .title("battery pack", FilterMode::Preferred)
        .keyword("LITHIUM", FilterMode::Preferred);
    let results = pipeline.search(&request).await.unwrap();

    assert_eq!(docs(&results), vec!["US1", "US2"]);
    assert_eq!(results[0].score, 3.1);
    assert_eq!(results[1].score, 2.0);
}

#[tokio::test]
async fn test_boost_does_not_rescue_excluded() {
    let model = Arc::new(MockRelevanceModel::new(5.0));
    let pipeline = pipeline_with(
        vec![
            claim("US1", "Battery Pack", "B60L"),
            claim("US2", "Cell", "H01M"),
        ],
        model,
    );

    let request = SearchRequest::new("battery")
        .classification("H01M", FilterMode::Required)
        .title("Battery Pack", FilterMode::Preferred);
    let results = pipeline.search(&request).await.unwrap();

    assert_eq!(docs(&results), vec!["US2"]);
}

#[tokio::test]
async fn test_results_sorted_and_limited() {
    let candidates: Vec<Candidate> = (0..40)
        .map(|i| claim(&format!("US{i:02}"), "Title", "H02J"))
        .collect();
    let model = Arc::new(MockRelevanceModel::new(0.0).with_scores(
        (0..40).map(|i| (format!("1. Claim of US{i:02}."), ((i * 7) % 13) as f32 - 6.0)),
    ));
    let pipeline = pipeline_with(candidates, model);

    let results = pipeline.search(&SearchRequest::new("grid")).await.unwrap();

    assert_eq!(results.len(), 15);
    assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_search_is_idempotent() {
    let candidates: Vec<Candidate> = (0..10)
        .map(|i| claim(&format!("US{i}"), "Title", "H02J"))
        .collect();
    let model = Arc::new(MockRelevanceModel::new(1.0).with_score("1. Claim of US3.", 3.0));
    let pipeline = pipeline_with(candidates, model);

    let request = SearchRequest::new("charging").keyword("title", FilterMode::Preferred);
    let first = pipeline.search(&request).await.unwrap();
    let second = pipeline.search(&request).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_query_is_trimmed_before_retrieval() {
    let model = Arc::new(MockRelevanceModel::new(1.0));
    let pipeline = pipeline_with(vec![claim("US1", "T", "H02J")], model);

    let padded = pipeline
        .search(&SearchRequest::new("  wireless charging  "))
        .await
        .unwrap();
    let plain = pipeline
        .search(&SearchRequest::new("wireless charging"))
        .await
        .unwrap();

    assert_eq!(padded, plain);
}

#[tokio::test]
async fn test_retrieval_failure_propagates() {
    let model = Arc::new(MockRelevanceModel::new(1.0));
    let pipeline = pipeline_with(vec![claim("US1", "T", "H02J")], Arc::clone(&model));
    pipeline.retriever().store().set_unavailable(true);

    let err = pipeline
        .search(&SearchRequest::new("charging"))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::Retrieval(RetrievalError::VectorDb(_))));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn test_empty_index_is_an_error() {
    let model = Arc::new(MockRelevanceModel::new(1.0));
    let pipeline = pipeline_with(Vec::new(), model);

    let err = pipeline
        .search(&SearchRequest::new("charging"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::Retrieval(RetrievalError::EmptyIndex { .. })
    ));
}

#[tokio::test]
async fn test_scoring_failure_propagates() {
    let model = Arc::new(MockRelevanceModel::new(1.0));
    model.set_failing(true);
    let pipeline = pipeline_with(vec![claim("US1", "T", "H02J")], model);

    let err = pipeline
        .search(&SearchRequest::new("charging"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::Scoring(ScoringError::Unavailable { .. })
    ));
}

#[tokio::test]
async fn test_short_score_vector_is_an_error() {
    let model = Arc::new(MockRelevanceModel::new(1.0));
    model.set_drop_last(true);
    let pipeline = pipeline_with(
        vec![claim("US1", "T", "H02J"), claim("US2", "T", "H02J")],
        model,
    );

    let err = pipeline
        .search(&SearchRequest::new("charging"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SearchError::Scoring(ScoringError::LengthMismatch {
            expected: 2,
            actual: 1
        })
    ));
}

#[test]
fn test_pipeline_config_validation() {
    assert!(PipelineConfig::default().validate().is_ok());

    let zero_k = PipelineConfig {
        top_k: 0,
        ..Default::default()
    };
    assert!(matches!(
        zero_k.validate(),
        Err(SearchError::InvalidConfig { .. })
    ));

    let zero_limit = PipelineConfig {
        result_limit: 0,
        ..Default::default()
    };
    assert!(zero_limit.validate().is_err());
}

#[test]
fn test_request_deserializes_with_defaults() {
    let request: SearchRequest =
        serde_json::from_str(r#"{"query":"battery","title":"Battery Pack","title_mode":"preferred"}"#)
            .unwrap();

    assert_eq!(request.title_mode, FilterMode::Preferred);
    assert_eq!(request.classification_mode, FilterMode::Ignored);
    assert!(!request.filters().has_required());
}

use super::*;
use crate::candidate::{Candidate, ClaimMetadata};
use crate::filter::FilterWeight;

fn candidate(doc_number: &str) -> Candidate {
    Candidate::new(
        format!("1. Claim of {doc_number}."),
        ClaimMetadata::new(doc_number, format!("Title {doc_number}"), "H02J"),
    )
}

fn docs(scored: &[ScoredCandidate]) -> Vec<&str> {
    scored
        .iter()
        .map(|s| s.candidate.metadata.doc_number.as_str())
        .collect()
}

#[test]
fn test_combine_multiplies_and_drops_excluded() {
    let candidates = vec![candidate("A"), candidate("B"), candidate("C")];
    let scores = [2.0, 9.0, -1.0];
    let weights = [
        FilterWeight::Included(1.5),
        FilterWeight::Excluded,
        FilterWeight::Included(1.0),
    ];

    let combined = combine(&candidates, &scores, &weights).unwrap();

    assert_eq!(docs(&combined), vec!["A", "C"]);
    assert_eq!(combined[0].final_score, 3.0);
    assert_eq!(combined[0].retrieval_rank, 0);
    assert_eq!(combined[1].final_score, -1.0);
    assert_eq!(combined[1].retrieval_rank, 2);
}

#[test]
fn test_combine_all_excluded() {
    let candidates = vec![candidate("A"), candidate("B")];
    let combined = combine(
        &candidates,
        &[5.0, 6.0],
        &[FilterWeight::Excluded, FilterWeight::Excluded],
    )
    .unwrap();

    assert!(combined.is_empty());
    assert!(format_results(combined, 15).is_empty());
}

#[test]
fn test_combine_misaligned() {
    let candidates = vec![candidate("A"), candidate("B")];

    let err = combine(&candidates, &[1.0], &[FilterWeight::Included(1.0); 2]).unwrap_err();
    assert!(matches!(
        err,
        RankingError::Misaligned {
            candidates: 2,
            scores: 1,
            weights: 2
        }
    ));
}

#[test]
fn test_rank_descending() {
    let scored = vec![
        ScoredCandidate::new(0.5, 0, candidate("A")),
        ScoredCandidate::new(3.0, 1, candidate("B")),
        ScoredCandidate::new(-2.0, 2, candidate("C")),
        ScoredCandidate::new(1.0, 3, candidate("D")),
    ];

    assert_eq!(docs(&rank(scored, 15)), vec!["B", "D", "A", "C"]);
}

#[test]
fn test_rank_ties_keep_retrieval_order() {
    let scored = vec![
        ScoredCandidate::new(1.0, 3, candidate("D")),
        ScoredCandidate::new(1.0, 0, candidate("A")),
        ScoredCandidate::new(2.0, 2, candidate("C")),
        ScoredCandidate::new(1.0, 1, candidate("B")),
    ];

    assert_eq!(docs(&rank(scored, 15)), vec!["C", "A", "B", "D"]);
}

#[test]
fn test_rank_nan_sorts_last() {
    let scored = vec![
        ScoredCandidate::new(f32::NAN, 0, candidate("A")),
        ScoredCandidate::new(-100.0, 1, candidate("B")),
        ScoredCandidate::new(0.0, 2, candidate("C")),
    ];

    assert_eq!(docs(&rank(scored, 15)), vec!["C", "B", "A"]);
}

#[test]
fn test_rank_truncates_to_limit() {
    let scored: Vec<_> = (0..40)
        .map(|i| ScoredCandidate::new(i as f32, i, candidate(&format!("D{i}"))))
        .collect();

    let ranked = rank(scored, 15);

    assert_eq!(ranked.len(), 15);
    assert_eq!(ranked[0].final_score, 39.0);
    assert!(
        ranked
            .windows(2)
            .all(|w| w[0].final_score >= w[1].final_score)
    );
}

#[test]
fn test_rank_fewer_than_limit() {
    let scored = vec![ScoredCandidate::new(1.0, 0, candidate("A"))];
    assert_eq!(rank(scored, 15).len(), 1);
}

#[test]
fn test_format_results_shape() {
    let c = Candidate::new(
        "1. A battery pack comprising cells.",
        ClaimMetadata::new("US20240001", "Battery Pack", "H01M 50/20")
            .with_abstract("ignored in output"),
    );
    let records = format_results(vec![ScoredCandidate::new(2.34567, 0, c)], 15);

    assert_eq!(
        records,
        vec![ResultRecord {
            document_number: "US20240001".to_string(),
            title: "Battery Pack".to_string(),
            classification: "H01M 50/20".to_string(),
            claim: "1. A battery pack comprising cells.".to_string(),
            score: 2.346,
        }]
    );
}

#[test]
fn test_result_record_json() {
    let record = ResultRecord::from_scored(ScoredCandidate::new(1.0, 0, candidate("A")));
    let json = serde_json::to_value(&record).unwrap();

    for key in ["document_number", "title", "classification", "claim", "score"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}

#[test]
fn test_round_score() {
    assert_eq!(round_score(1.23449), 1.234);
    assert_eq!(round_score(-0.0004), -0.0);
    assert_eq!(round_score(7.0), 7.0);
    assert_eq!(round_score(-3.14159), -3.142);
}

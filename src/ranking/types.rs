use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;

#[derive(Debug, Clone, PartialEq)]
/// A candidate that survived filtering, with its final ranking score.
pub struct ScoredCandidate {
    /// Relevance score multiplied by filter weight.
    pub final_score: f32,
    /// Position in the retriever's output; used as the tie-break.
    pub retrieval_rank: usize,
    /// The candidate itself.
    pub candidate: Candidate,
}

impl ScoredCandidate {
    /// Creates a new scored-candidate record.
    pub fn new(final_score: f32, retrieval_rank: usize, candidate: Candidate) -> Self {
        Self {
            final_score,
            retrieval_rank,
            candidate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A ranked claim as shown to the caller.
pub struct ResultRecord {
    /// Patent document number.
    pub document_number: String,
    /// Patent title.
    pub title: String,
    /// Classification code.
    pub classification: String,
    /// Claim text.
    pub claim: String,
    /// Final score rounded to three decimals.
    pub score: f64,
}

impl ResultRecord {
    /// Builds the display record for a scored candidate.
    pub fn from_scored(scored: ScoredCandidate) -> Self {
        let ScoredCandidate {
            final_score,
            candidate,
            ..
        } = scored;

        Self {
            document_number: candidate.metadata.doc_number,
            title: candidate.metadata.title,
            classification: candidate.metadata.classification,
            claim: candidate.content,
            score: super::combiner::round_score(final_score),
        }
    }
}

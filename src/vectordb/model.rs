use std::collections::HashMap;

use qdrant_client::qdrant::point_id::PointIdOptions;
use qdrant_client::qdrant::{PointId, ScoredPoint, Value};

use super::error::VectorDbError;
use crate::candidate::{Candidate, ClaimMetadata};

/// Payload keys written by the claim indexer.
pub mod payload_keys {
    pub const CONTENT: &str = "content";
    pub const DOC_NUMBER: &str = "doc_number";
    pub const TITLE: &str = "title";
    pub const CLASSIFICATION: &str = "classification";
    pub const ABSTRACT: &str = "abstract";
    pub const DESCRIPTION: &str = "description";
}

/// Qdrant point id: indexers assign either integers or UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClaimId {
    Num(u64),
    Uuid(String),
}

impl From<u64> for ClaimId {
    fn from(n: u64) -> Self {
        ClaimId::Num(n)
    }
}

impl From<&str> for ClaimId {
    fn from(uuid: &str) -> Self {
        ClaimId::Uuid(uuid.to_string())
    }
}

impl std::fmt::Display for ClaimId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimId::Num(n) => write!(f, "{n}"),
            ClaimId::Uuid(u) => f.write_str(u),
        }
    }
}

impl ClaimId {
    pub fn from_point_id(id: PointId) -> Option<Self> {
        match id.point_id_options? {
            PointIdOptions::Num(n) => Some(ClaimId::Num(n)),
            PointIdOptions::Uuid(u) => Some(ClaimId::Uuid(u)),
        }
    }
}

/// A stored claim together with its vector (used by the mock store).
#[derive(Debug, Clone)]
pub struct ClaimPoint {
    pub id: ClaimId,
    pub vector: Vec<f32>,
    pub candidate: Candidate,
}

impl ClaimPoint {
    pub fn new(id: u64, vector: Vec<f32>, candidate: Candidate) -> Self {
        Self::with_id(ClaimId::Num(id), vector, candidate)
    }

    pub fn with_id(id: ClaimId, vector: Vec<f32>, candidate: Candidate) -> Self {
        Self {
            id,
            vector,
            candidate,
        }
    }
}

/// A similarity hit: the stored claim and the store's similarity score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub id: ClaimId,
    pub score: f32,
    pub candidate: Candidate,
}

impl SearchResult {
    /// Converts a Qdrant hit. A hit without an id is malformed and is an error.
    pub fn from_scored_point(collection: &str, point: ScoredPoint) -> Result<Self, VectorDbError> {
        let id = point
            .id
            .and_then(ClaimId::from_point_id)
            .ok_or_else(|| VectorDbError::MalformedPoint {
                collection: collection.to_string(),
                reason: "scored point has no id".to_string(),
            })?;

        Ok(SearchResult {
            id,
            score: point.score,
            candidate: candidate_from_payload(&point.payload),
        })
    }
}

/// Maps a point payload to a [`Candidate`]; missing or non-text keys become `""`.
pub fn candidate_from_payload(payload: &HashMap<String, Value>) -> Candidate {
    use payload_keys::*;

    let field = |key: &str| -> String {
        match payload.get(key) {
            Some(value) => {
                if let Some(s) = value.as_str() {
                    s.to_string()
                } else if let Some(n) = value.as_integer() {
                    // Document numbers are sometimes indexed as integers.
                    n.to_string()
                } else {
                    String::new()
                }
            }
            None => String::new(),
        }
    };

    Candidate {
        content: field(CONTENT),
        metadata: ClaimMetadata {
            doc_number: field(DOC_NUMBER),
            title: field(TITLE),
            classification: field(CLASSIFICATION),
            r#abstract: field(ABSTRACT),
            description: field(DESCRIPTION),
        },
    }
}

//! Retrieved claim passages and their patent metadata.

use serde::{Deserialize, Serialize};

/// Metadata of the patent application a claim belongs to.
///
/// Absent fields in the store are represented as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimMetadata {
    #[serde(default)]
    pub doc_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub r#abstract: String,
    #[serde(default)]
    pub description: String,
}

/// One claim as returned by the vector store. Never mutated after retrieval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Claim text.
    pub content: String,
    pub metadata: ClaimMetadata,
}

impl Candidate {
    pub fn new(content: impl Into<String>, metadata: ClaimMetadata) -> Self {
        Self {
            content: content.into(),
            metadata,
        }
    }
}

impl ClaimMetadata {
    pub fn new(
        doc_number: impl Into<String>,
        title: impl Into<String>,
        classification: impl Into<String>,
    ) -> Self {
        Self {
            doc_number: doc_number.into(),
            title: title.into(),
            classification: classification.into(),
            ..Default::default()
        }
    }

    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.r#abstract = text.into();
        self
    }

    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }
}

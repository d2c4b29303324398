//! Pairwise relevance scoring with a cross-encoder.
//!
//! [`RelevanceScorer`] sends every `(query, claim)` pair to a [`RelevanceModel`] in one
//! batch and returns scores aligned with the candidate order. The model handle is an
//! `Arc` created once at startup; scoring never mutates it.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod scorer;


pub use error::ScoringError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRelevanceModel;
pub use scorer::{RelevanceModel, RelevanceScorer};

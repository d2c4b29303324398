//! Search orchestration.
//!
//! [`SearchPipeline::search`] runs retrieval, then relevance scoring and filter
//! evaluation side by side, then combination and ranking. A blank query returns an
//! empty result without touching the index or the model.

pub mod error;
pub mod pipeline;
pub mod request;

#[cfg(test)]
mod tests;

pub use error::SearchError;
pub use pipeline::{PipelineConfig, SearchPipeline};
pub use request::SearchRequest;

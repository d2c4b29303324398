//! Candidate retrieval: embed the query and pull the top-K claims from the index.
//!
//! No filtering happens here. Candidate order is the store's similarity order and
//! is preserved by every later stage until the final sort.

pub mod error;
pub mod retriever;


pub use error::RetrievalError;
pub use retriever::CandidateRetriever;

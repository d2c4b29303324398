use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::QueryEmbedder;
use super::error::EmbeddingError;

/// Deterministic embedder for tests: the same text always yields the same vector.
#[derive(Debug)]
pub struct MockEmbedder {
    embedding_dim: usize,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new(8)
    }
}

impl MockEmbedder {
    pub fn new(embedding_dim: usize) -> Self {
        Self {
            embedding_dim,
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent call fail with `RequestFailed`.
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn embedding_for(&self, text: &str) -> Vec<f32> {
        let mut state: u64 = 0xcbf29ce484222325;
        for byte in text.bytes() {
            state ^= byte as u64;
            state = state.wrapping_mul(0x100000001b3);
        }

        (0..self.embedding_dim)
            .map(|i| {
                let mixed = state.wrapping_mul(31).wrapping_add(i as u64 * 7919) % 1000;
                mixed as f32 / 1000.0 + 0.001
            })
            .collect()
    }
}

impl QueryEmbedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.fail.load(Ordering::SeqCst) {
            return Err(EmbeddingError::RequestFailed {
                url: "mock://embeddings".to_string(),
                reason: "mock embedder set to fail".to_string(),
            });
        }

        Ok(self.embedding_for(text))
    }
}

use crate::vectordb::{ClaimPoint, SearchResult, VectorDbClient, VectorDbError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory stand-in for Qdrant with brute-force cosine search.
#[derive(Default)]
pub struct MockVectorDbClient {
    collections: std::sync::RwLock<HashMap<String, MockCollection>>,
    unavailable: AtomicBool,
    search_calls: AtomicUsize,
    count_calls: AtomicUsize,
}

#[derive(Default, Clone)]
struct MockCollection {
    vector_size: u64,
    points: Vec<ClaimPoint>,
}

impl MockVectorDbClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty collection (no-op if it already exists).
    pub fn create_collection(&self, name: &str, vector_size: u64) {
        if let Ok(mut collections) = self.collections.write() {
            collections
                .entry(name.to_string())
                .or_insert(MockCollection {
                    vector_size,
                    points: Vec::new(),
                });
        }
    }

    /// Inserts or replaces points by id.
    pub fn insert_points(
        &self,
        collection: &str,
        points: Vec<ClaimPoint>,
    ) -> Result<(), VectorDbError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|_| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get_mut(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        for point in points {
            if point.vector.len() as u64 != coll.vector_size {
                return Err(VectorDbError::InvalidDimension {
                    expected: coll.vector_size as usize,
                    actual: point.vector.len(),
                });
            }

            coll.points.retain(|p| p.id != point.id);
            coll.points.push(point);
        }

        Ok(())
    }

    /// Simulates an unreachable store: every call fails with `ConnectionFailed`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    pub fn point_count(&self, collection: &str) -> Option<usize> {
        self.collections
            .read()
            .ok()?
            .get(collection)
            .map(|c| c.points.len())
    }

    fn check_available(&self) -> Result<(), VectorDbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(VectorDbError::ConnectionFailed {
                url: "mock://qdrant".to_string(),
                message: "mock store set to unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl VectorDbClient for MockVectorDbClient {
    async fn count_points(&self, collection: &str) -> Result<u64, VectorDbError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::CountFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        collections
            .get(collection)
            .map(|c| c.points.len() as u64)
            .ok_or_else(|| VectorDbError::CollectionNotFound {
                collection: collection.to_string(),
            })
    }

    async fn search(
        &self,
        collection: &str,
        query: Vec<f32>,
        limit: u64,
    ) -> Result<Vec<SearchResult>, VectorDbError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;

        let collections = self
            .collections
            .read()
            .map_err(|_| VectorDbError::SearchFailed {
                collection: collection.to_string(),
                message: "lock poisoned".to_string(),
            })?;

        let coll =
            collections
                .get(collection)
                .ok_or_else(|| VectorDbError::CollectionNotFound {
                    collection: collection.to_string(),
                })?;

        if query.len() as u64 != coll.vector_size {
            return Err(VectorDbError::InvalidDimension {
                expected: coll.vector_size as usize,
                actual: query.len(),
            });
        }

        let mut results: Vec<SearchResult> = coll
            .points
            .iter()
            .map(|p| SearchResult {
                id: p.id.clone(),
                score: cosine_similarity(&query, &p.vector),
                candidate: p.candidate.clone(),
            })
            .collect();

        // Stable, so equal similarities keep insertion order.
        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        results.truncate(limit as usize);
        Ok(results)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

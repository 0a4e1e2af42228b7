use std::future::Future;

use crate::error::Result;
use crate::types::{Dimension, QueryMatch, TaskType, VectorRecord};

pub trait Embedder: Send + Sync {
    /// Embed one text at the requested dimensionality.
    fn embed(&self, text: &str, dimension: Dimension, task: TaskType) -> impl Future<Output = Result<Vec<f32>>> + Send;
}

pub trait VectorIndex: Send + Sync {
    /// Insert or overwrite `records` in the index for `dimension`. Returns the
    /// number of records the index reports as written.
    fn upsert(&self, dimension: Dimension, records: &[VectorRecord]) -> impl Future<Output = Result<usize>> + Send;

    /// Return up to `top_k` nearest records to `vector`, best first.
    fn query(&self, dimension: Dimension, vector: &[f32], top_k: usize) -> impl Future<Output = Result<Vec<QueryMatch>>> + Send;
}

/// Pacing between outbound calls.
pub trait RateLimiter: Send + Sync {
    /// Called after each successful per-item request.
    fn after_item(&self) -> impl Future<Output = ()> + Send;
    /// Called after each per-dimension batch.
    fn after_batch(&self) -> impl Future<Output = ()> + Send;
}


//! In-process stand-in for the remote index. Upsert overwrites by id; query
//! ranks by cosine similarity, ties broken by id so results are stable.
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use chatvec_core::traits::VectorIndex;
use chatvec_core::types::{Dimension, MatchMetadata, QueryMatch, VectorRecord};
use chatvec_core::Result;

type Partition = BTreeMap<String, VectorRecord>;

#[derive(Default)]
pub struct MemoryIndex {
    partitions: Mutex<HashMap<Dimension, Partition>>,
}

impl MemoryIndex {
    pub fn new() -> Self { Self::default() }

    fn lock(&self) -> MutexGuard<'_, HashMap<Dimension, Partition>> {
        self.partitions.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Number of records stored for `dimension`.
    pub fn len(&self, dimension: Dimension) -> usize {
        self.lock().get(&dimension).map_or(0, BTreeMap::len)
    }

    pub fn is_empty(&self) -> bool { self.lock().values().all(BTreeMap::is_empty) }

    pub fn get(&self, dimension: Dimension, id: &str) -> Option<VectorRecord> {
        self.lock().get(&dimension).and_then(|p| p.get(id).cloned())
    }

    pub fn insert(&self, dimension: Dimension, records: &[VectorRecord]) -> usize {
        let mut guard = self.lock();
        let partition = guard.entry(dimension).or_default();
        for r in records { partition.insert(r.id.clone(), r.clone()); }
        records.len()
    }

    pub fn search(&self, dimension: Dimension, vector: &[f32], top_k: usize) -> Vec<QueryMatch> {
        let guard = self.lock();
        let Some(partition) = guard.get(&dimension) else { return Vec::new() };
        let mut hits: Vec<QueryMatch> = partition
            .values()
            .map(|r| QueryMatch { id: r.id.clone(), score: cosine(vector, &r.values), metadata: MatchMetadata::from(&r.metadata) })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(top_k);
        hits
    }
}

/// Cosine similarity; zero when either side has no magnitude.
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 { 0.0 } else { dot / (na * nb) }
}

impl VectorIndex for MemoryIndex {
    async fn upsert(&self, dimension: Dimension, records: &[VectorRecord]) -> Result<usize> {
        Ok(self.insert(dimension, records))
    }

    async fn query(&self, dimension: Dimension, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        Ok(self.search(dimension, vector, top_k))
    }
}

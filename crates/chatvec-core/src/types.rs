//! Domain types shared by the embedding client, the vector index clients and
//! the pipelines.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Error, Result};

/// Output dimensionality supported by the embedding model and the indexes.
///
/// Ordering follows the size, so iterating a table keyed by `Dimension`
/// visits 384, 512, 1024 in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Dimension {
    D384,
    D512,
    D1024,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::D384, Dimension::D512, Dimension::D1024];

    pub const fn size(self) -> usize {
        match self {
            Dimension::D384 => 384,
            Dimension::D512 => 512,
            Dimension::D1024 => 1024,
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            384 => Ok(Dimension::D384),
            512 => Ok(Dimension::D512),
            1024 => Ok(Dimension::D1024),
            other => Err(Error::UnsupportedDimension(other)),
        }
    }
}

impl From<Dimension> for usize {
    fn from(d: Dimension) -> usize { d.size() }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.size()) }
}

/// What the embedding will be used for. The service tunes vectors differently
/// for stored documents and for queries against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    RetrievalDocument,
    RetrievalQuery,
}

/// A canned user utterance and the bot reply it should produce.
///
/// JSON files written by other tools use capitalised keys, so both
/// `input`/`Input` and `output`/`Output` are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    #[serde(alias = "Input")]
    pub input: String,
    #[serde(alias = "Output")]
    pub output: String,
}

impl Pair {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self { input: input.into(), output: output.into() }
    }
}

/// Metadata stored next to every uploaded vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub input: String,
    pub output: String,
    pub dimension: usize,
    pub pair_id: usize,
    pub created_at: i64,
    pub input_len: usize,
    pub output_len: usize,
}

/// A vector as sent to the index on upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: RecordMetadata,
}

/// Stable record id for a pair at a given dimension. Re-uploading the same
/// pair list overwrites instead of duplicating.
pub fn record_id(pair_index: usize, dimension: Dimension) -> String {
    format!("pair_{pair_index}_dim_{dimension}")
}

impl VectorRecord {
    pub fn from_pair(pair_index: usize, pair: &Pair, dimension: Dimension, values: Vec<f32>, created_at: i64) -> Self {
        Self {
            id: record_id(pair_index, dimension),
            values,
            metadata: RecordMetadata {
                input: pair.input.clone(),
                output: pair.output.clone(),
                dimension: dimension.size(),
                pair_id: pair_index,
                created_at,
                input_len: pair.input.len(),
                output_len: pair.output.len(),
            },
        }
    }
}

/// Metadata as read back from a query. Every field is optional on the wire;
/// absent strings decode as empty so the diagnostics can flag them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub output: String,
    /// The index stores numbers as doubles, so this may come back as `384.0`.
    #[serde(default)]
    pub dimension: Option<f64>,
}

impl MatchMetadata {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn dimension(&self) -> Option<usize> {
        self.dimension.filter(|d| d.is_finite() && *d >= 0.0).map(|d| d as usize)
    }
}

impl From<&RecordMetadata> for MatchMetadata {
    #[allow(clippy::cast_precision_loss)]
    fn from(m: &RecordMetadata) -> Self {
        Self { input: m.input.clone(), output: m.output.clone(), dimension: Some(m.dimension as f64) }
    }
}

/// One scored hit from a similarity query. Higher score is closer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMatch {
    pub id: String,
    #[serde(default)]
    pub score: f32,
    #[serde(default)]
    pub metadata: MatchMetadata,
}

/// Where the vectors for one dimension live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexTarget {
    pub index_name: String,
    pub region: String,
    pub namespace: String,
    /// Full base URL, overriding the one derived from name and region.
    #[serde(default)]
    pub host: Option<String>,
}

impl IndexTarget {
    pub fn new(index_name: impl Into<String>, region: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self { index_name: index_name.into(), region: region.into(), namespace: namespace.into(), host: None }
    }

    pub fn base_url(&self) -> String {
        match &self.host {
            Some(h) => h.trim_end_matches('/').to_string(),
            None => format!("https://{}.svc.{}.pinecone.io", self.index_name, self.region),
        }
    }
}

/// One index per dimension. Lookups go straight from dimension to target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTable {
    entries: BTreeMap<Dimension, IndexTarget>,
}

impl IndexTable {
    pub fn new(entries: impl IntoIterator<Item = (Dimension, IndexTarget)>) -> Result<Self> {
        let mut map = BTreeMap::new();
        for (dim, target) in entries {
            if map.insert(dim, target).is_some() {
                return Err(Error::InvalidConfig(format!("dimension {dim} configured more than once")));
            }
        }
        if map.is_empty() {
            return Err(Error::InvalidConfig("no indexes configured".to_string()));
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, dimension: Dimension) -> Result<&IndexTarget> {
        self.entries.get(&dimension).ok_or(Error::NoIndex(dimension.size()))
    }

    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ { self.entries.keys().copied() }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, &IndexTarget)> { self.entries.iter().map(|(d, t)| (*d, t)) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Replace the namespace on every entry.
    #[must_use]
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        for t in self.entries.values_mut() { t.namespace = namespace.to_string(); }
        self
    }
}

pub const DEFAULT_REGION: &str = "aped-4627-b74a";
pub const DEFAULT_NAMESPACE: &str = "chatbot-training-data-test-semantic";

impl Default for IndexTable {
    fn default() -> Self {
        let entries = Dimension::ALL.into_iter().map(|d| {
            (d, IndexTarget::new(format!("chatbot-embeddings-{d}-2x9jann"), DEFAULT_REGION, DEFAULT_NAMESPACE))
        });
        Self { entries: entries.collect() }
    }
}

//! Vector index clients: the remote Pinecone data plane and an in-memory
//! index with the same surface.
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use chatvec_core::traits::VectorIndex;
use chatvec_core::types::{Dimension, IndexTable, QueryMatch, VectorRecord};
use chatvec_core::{Error, Result};

pub mod memory;
pub mod search;
pub mod writer;

pub use memory::MemoryIndex;

/// Talks to one index per dimension, as listed in the [`IndexTable`].
pub struct PineconeClient {
    pub(crate) http: reqwest::Client,
    pub(crate) table: IndexTable,
    pub(crate) api_key: String,
}

impl PineconeClient {
    pub fn new(table: IndexTable, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Request { context: "failed to build HTTP client", message: e.to_string() })?;
        Ok(Self { http, table, api_key: api_key.to_string() })
    }

    pub fn table(&self) -> &IndexTable { &self.table }

    pub(crate) async fn post<B: Serialize + Sync>(&self, url: &str, body: &B, context: &'static str) -> Result<(reqwest::StatusCode, String)> {
        debug!(%url, "pinecone request");
        let res = self
            .http
            .post(url)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Request { context, message: e.to_string() })?;
        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| Error::Request { context: "failed to read response", message: e.to_string() })?;
        debug!(%url, status = status.as_u16(), "pinecone response");
        Ok((status, text))
    }
}

impl VectorIndex for PineconeClient {
    async fn upsert(&self, dimension: Dimension, records: &[VectorRecord]) -> Result<usize> {
        self.upsert_vectors(dimension, records).await
    }

    async fn query(&self, dimension: Dimension, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        self.query_vector(dimension, vector, top_k).await
    }
}

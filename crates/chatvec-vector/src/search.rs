use serde::{Deserialize, Serialize};

use chatvec_core::types::{Dimension, QueryMatch};
use chatvec_core::{Error, Result};

use crate::PineconeClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QueryRequest<'a> {
    pub vector: &'a [f32],
    pub top_k: usize,
    pub include_metadata: bool,
    pub namespace: &'a str,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

pub(crate) fn parse_matches(body: &str) -> Result<Vec<QueryMatch>> {
    serde_json::from_str::<QueryResponse>(body)
        .map(|r| r.matches)
        .map_err(|e| Error::Decode(e.to_string()))
}

impl PineconeClient {
    /// Top-`top_k` matches for `vector`, in the order the service ranks them.
    pub async fn query_vector(&self, dimension: Dimension, vector: &[f32], top_k: usize) -> Result<Vec<QueryMatch>> {
        let target = self.table.get(dimension)?;
        let url = format!("{}/query", target.base_url());
        let body = QueryRequest { vector, top_k, include_metadata: true, namespace: &target.namespace };
        let (status, text) = self.post(&url, &body, "query failed").await?;
        if !status.is_success() {
            return Err(Error::Status { service: "Pinecone", status: status.as_u16(), body: text });
        }
        parse_matches(&text)
    }
}

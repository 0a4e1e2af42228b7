use serde::{Deserialize, Serialize};
use tracing::debug;

use chatvec_core::types::{Dimension, VectorRecord};
use chatvec_core::{Error, Result};

use crate::PineconeClient;

#[derive(Serialize)]
pub(crate) struct UpsertRequest<'a> {
    pub vectors: &'a [VectorRecord],
    pub namespace: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    #[serde(default)]
    upserted_count: Option<usize>,
}

/// The count the service reports, or the batch size when the body says nothing.
pub(crate) fn upserted_count(body: &str, sent: usize) -> usize {
    serde_json::from_str::<UpsertResponse>(body).ok().and_then(|r| r.upserted_count).unwrap_or(sent)
}

impl PineconeClient {
    /// Upload `records` to the index for `dimension`. One call for the whole
    /// batch; a status of 400 or above fails the batch with the response body.
    pub async fn upsert_vectors(&self, dimension: Dimension, records: &[VectorRecord]) -> Result<usize> {
        if records.is_empty() { return Ok(0); }
        let target = self.table.get(dimension)?;
        let url = format!("{}/vectors/upsert", target.base_url());
        let body = UpsertRequest { vectors: records, namespace: &target.namespace };
        let (status, text) = self.post(&url, &body, "failed to upload to Pinecone").await?;
        if status.as_u16() >= 400 {
            return Err(Error::Status { service: "Pinecone", status: status.as_u16(), body: text });
        }
        let count = upserted_count(&text, records.len());
        debug!(index = %target.index_name, %dimension, count, "upserted");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatvec_core::types::Pair;
    use serde_json::json;

    #[test]
    fn upsert_body_carries_vectors_and_namespace() {
        let pair = Pair::new("Book", "Can you please specify the date and time for your trip?");
        let records = vec![VectorRecord::from_pair(22, &pair, Dimension::D384, vec![0.25, -0.5], 1_700_000_000)];
        let body = serde_json::to_value(UpsertRequest { vectors: &records, namespace: "ns" }).unwrap();
        assert_eq!(body["namespace"], "ns");
        let v = &body["vectors"][0];
        assert_eq!(v["id"], "pair_22_dim_384");
        assert_eq!(v["values"], json!([0.25, -0.5]));
        assert_eq!(v["metadata"]["pair_id"], 22);
        assert_eq!(v["metadata"]["dimension"], 384);
        assert_eq!(v["metadata"]["input_len"], 4);
        assert_eq!(v["metadata"]["created_at"], 1_700_000_000_i64);
    }

    #[test]
    fn upserted_count_prefers_the_service_value() {
        assert_eq!(upserted_count(r#"{"upsertedCount": 31}"#, 32), 31);
        assert_eq!(upserted_count("{}", 32), 32);
        assert_eq!(upserted_count("", 5), 5);
    }
}

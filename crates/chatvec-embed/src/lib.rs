//! Text embedding clients.
//!
//! `GeminiEmbedder` calls the remote `embedContent` endpoint. `FakeEmbedder`
//! hashes tokens into a vector of the requested size; it is selected with
//! `APP_USE_FAKE_EMBEDDINGS=1` and backs the pipeline tests.
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use chatvec_core::config::{Credentials, EmbeddingSettings, Settings};
use chatvec_core::traits::Embedder;
use chatvec_core::types::{Dimension, TaskType};
use chatvec_core::{Error, Result};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedRequest<'a> {
    content: Content<'a>,
    task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_dimensionality: Option<usize>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> EmbedRequest<'a> {
    fn new(text: &'a str, task_type: TaskType, dimension: Option<Dimension>) -> Self {
        Self {
            content: Content { parts: vec![Part { text }] },
            task_type,
            output_dimensionality: dimension.map(Dimension::size),
        }
    }
}

#[derive(Deserialize)]
struct EmbedResponse {
    embedding: ContentEmbedding,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}

fn parse_embedding(body: &str) -> Result<Vec<f32>> {
    serde_json::from_str::<EmbedResponse>(body)
        .map(|r| r.embedding.values)
        .map_err(|e| Error::Decode(e.to_string()))
}

pub struct GeminiEmbedder {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiEmbedder {
    pub fn new(settings: &EmbeddingSettings, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Request { context: "failed to build HTTP client", message: e.to_string() })?;
        Ok(Self { http, endpoint: embed_endpoint(settings), api_key: api_key.to_string() })
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    /// The key travels in the query string, so transport errors are reported
    /// without their URL.
    async fn send(&self, request: &EmbedRequest<'_>) -> Result<(reqwest::StatusCode, String)> {
        debug!(endpoint = %self.endpoint, task = ?request.task_type, dim = ?request.output_dimensionality, "embedContent");
        let res = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Request { context: "API request failed", message: e.without_url().to_string() })?;
        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::Request { context: "failed to read response", message: e.without_url().to_string() })?;
        Ok((status, body))
    }

    pub async fn embed_text(&self, text: &str, dimension: Dimension, task: TaskType) -> Result<Vec<f32>> {
        let (status, body) = self.send(&EmbedRequest::new(text, task, Some(dimension))).await?;
        if status != reqwest::StatusCode::OK {
            return Err(Error::Status { service: "embedding API", status: status.as_u16(), body });
        }
        let values = parse_embedding(&body)?;
        if values.len() != dimension.size() {
            warn!(expected = dimension.size(), got = values.len(), "embedding length differs from requested dimension");
        }
        Ok(values)
    }

    /// Send one request and hand back the status and raw body, whatever the
    /// status. `dimension: None` leaves the model's native size.
    pub async fn probe_raw(&self, text: &str, task: TaskType, dimension: Option<Dimension>) -> Result<(u16, String)> {
        let (status, body) = self.send(&EmbedRequest::new(text, task, dimension)).await?;
        Ok((status.as_u16(), body))
    }
}

fn embed_endpoint(settings: &EmbeddingSettings) -> String {
    format!("{}/models/{}:embedContent", settings.api_base.trim_end_matches('/'), settings.model)
}

impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str, dimension: Dimension, task: TaskType) -> Result<Vec<f32>> {
        self.embed_text(text, dimension, task).await
    }
}

/// Deterministic token-hash embedding. Same text and dimension always give
/// the same unit vector; the task type is ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeEmbedder;

impl FakeEmbedder {
    pub fn new() -> Self { Self }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn embed_sync(&self, text: &str, dimension: Dimension) -> Vec<f32> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;
        let dim = dimension.size();
        let mut v = vec![0f32; dim];
        for (i, token) in text.split_whitespace().enumerate() {
            let mut hasher = XxHash64::with_seed(0);
            token.to_lowercase().hash(&mut hasher);
            let h = hasher.finish();
            let idx = (h as usize) % dim;
            let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
            v[idx] += val + (i as f32 % 3.0) * 0.01;
        }
        let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
        for x in &mut v { *x /= norm; }
        v
    }
}

impl Embedder for FakeEmbedder {
    async fn embed(&self, text: &str, dimension: Dimension, _task: TaskType) -> Result<Vec<f32>> {
        Ok(self.embed_sync(text, dimension))
    }
}

/// The embedder the binaries run with.
pub enum DefaultEmbedder {
    Gemini(GeminiEmbedder),
    Fake(FakeEmbedder),
}

impl Embedder for DefaultEmbedder {
    async fn embed(&self, text: &str, dimension: Dimension, task: TaskType) -> Result<Vec<f32>> {
        match self {
            DefaultEmbedder::Gemini(g) => g.embed_text(text, dimension, task).await,
            DefaultEmbedder::Fake(f) => Ok(f.embed_sync(text, dimension)),
        }
    }
}

pub fn use_fake_embeddings() -> bool {
    std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

pub fn get_default_embedder(settings: &Settings, credentials: &Credentials) -> Result<DefaultEmbedder> {
    if use_fake_embeddings() {
        println!("🧪 Using FakeEmbedder");
        return Ok(DefaultEmbedder::Fake(FakeEmbedder::new()));
    }
    let gemini = GeminiEmbedder::new(&settings.embedding, &credentials.gemini_api_key, settings.http.timeout())?;
    Ok(DefaultEmbedder::Gemini(gemini))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_body_matches_the_wire_format() {
        let body = serde_json::to_value(EmbedRequest::new("Book my ride", TaskType::RetrievalDocument, Some(Dimension::D384))).unwrap();
        assert_eq!(
            body,
            json!({
                "content": {"parts": [{"text": "Book my ride"}]},
                "taskType": "RETRIEVAL_DOCUMENT",
                "outputDimensionality": 384
            })
        );
    }

    #[test]
    fn request_without_dimension_omits_the_field() {
        let body = serde_json::to_value(EmbedRequest::new("hi", TaskType::RetrievalQuery, None)).unwrap();
        assert!(body.get("outputDimensionality").is_none());
        assert_eq!(body["taskType"], "RETRIEVAL_QUERY");
    }

    #[test]
    fn parses_values_of_the_returned_length() {
        let values: Vec<f32> = (0..384).map(|i| i as f32 / 384.0).collect();
        let body = json!({"embedding": {"values": values}}).to_string();
        let parsed = parse_embedding(&body).unwrap();
        assert_eq!(parsed.len(), 384);
        assert!((parsed[383] - 383.0 / 384.0).abs() < 1e-6);
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        assert!(matches!(parse_embedding("<html>quota</html>"), Err(Error::Decode(_))));
        assert!(matches!(parse_embedding(r#"{"error": {"code": 400}}"#), Err(Error::Decode(_))));
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let settings = EmbeddingSettings { api_base: "http://localhost:8080/v1beta/".to_string(), ..EmbeddingSettings::default() };
        assert_eq!(embed_endpoint(&settings), "http://localhost:8080/v1beta/models/gemini-embedding-001:embedContent");
        let e = GeminiEmbedder::new(&EmbeddingSettings::default(), "k", Duration::from_secs(1)).unwrap();
        assert_eq!(e.endpoint(), "https://generativelanguage.googleapis.com/v1beta/models/gemini-embedding-001:embedContent");
    }
}

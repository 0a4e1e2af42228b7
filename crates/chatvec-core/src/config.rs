//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `APP_*` env vars (`__` separates nested keys, e.g. `APP_QUERY__TOP_K=5`).
//! API keys are not part of the config; see [`Credentials`].
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::{Dimension, IndexTable, IndexTarget, DEFAULT_NAMESPACE, DEFAULT_REGION};

pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const PINECONE_API_KEY: &str = "PINECONE_API_KEY";

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    /// Build from an explicit figment, layered over the defaults.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment: Figment::from(Serialized::defaults(Settings::default())).merge(figment) }
    }

    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub embedding: EmbeddingSettings,
    pub http: HttpSettings,
    pub pacing: PacingSettings,
    pub data: DataSettings,
    pub query: QuerySettings,
    pub diagnose: DiagnoseSettings,
    pub indexes: Vec<IndexEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub api_base: String,
    pub model: String,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-embedding-001".to_string(),
        }
    }
}

/// Shared by both HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
}

impl Default for HttpSettings {
    fn default() -> Self { Self { timeout_secs: 30 } }
}

impl HttpSettings {
    pub fn timeout(&self) -> Duration { Duration::from_secs(self.timeout_secs) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    pub item_delay_ms: u64,
    pub batch_delay_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self { Self { item_delay_ms: 100, batch_delay_ms: 500 } }
}

impl PacingSettings {
    pub fn item_delay(&self) -> Duration { Duration::from_millis(self.item_delay_ms) }
    pub fn batch_delay(&self) -> Duration { Duration::from_millis(self.batch_delay_ms) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Pairs to embed and upload. Falls back to the built-in list when unreadable.
    pub pairs_file: Option<String>,
    /// Pairs written to the processing log.
    pub log_pairs_file: Option<String>,
    pub log_dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            pairs_file: Some("test_embedding.json".to_string()),
            log_pairs_file: Some("extracted_input_output_pairs.json".to_string()),
            log_dir: "output_logs".to_string(),
        }
    }
}

impl DataSettings {
    pub fn pairs_path(&self) -> Option<PathBuf> { self.pairs_file.as_deref().map(expand_path) }
    pub fn log_pairs_path(&self) -> Option<PathBuf> { self.log_pairs_file.as_deref().map(expand_path) }
    pub fn log_dir_path(&self) -> PathBuf { expand_path(&self.log_dir) }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    pub top_k: usize,
}

impl Default for QuerySettings {
    fn default() -> Self { Self { top_k: 3 } }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnoseSettings {
    pub top_k: usize,
    /// Rows printed per index before the listing is cut short.
    pub display_limit: usize,
    /// Scan this namespace instead of the one the uploader writes to, e.g.
    /// the legacy `chatbot-training-data`.
    pub namespace: Option<String>,
}

impl Default for DiagnoseSettings {
    fn default() -> Self { Self { top_k: 100, display_limit: 20, namespace: None } }
}

/// One `[[indexes]]` entry as written in config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexEntry {
    pub dimension: usize,
    pub index_name: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub host: Option<String>,
}

fn default_region() -> String { DEFAULT_REGION.to_string() }
fn default_namespace() -> String { DEFAULT_NAMESPACE.to_string() }

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.query.top_k == 0 {
            return Err(Error::InvalidConfig("query.top_k must be at least 1".to_string()));
        }
        if self.diagnose.top_k == 0 {
            return Err(Error::InvalidConfig("diagnose.top_k must be at least 1".to_string()));
        }
        self.index_table().map(|_| ())
    }

    /// The dimension-keyed index table. An empty `indexes` list means the
    /// built-in table.
    pub fn index_table(&self) -> Result<IndexTable> {
        if self.indexes.is_empty() {
            return Ok(IndexTable::default());
        }
        let entries = self
            .indexes
            .iter()
            .map(|e| {
                let dim = Dimension::try_from(e.dimension)?;
                let target = IndexTarget {
                    index_name: e.index_name.clone(),
                    region: e.region.clone(),
                    namespace: e.namespace.clone(),
                    host: e.host.clone(),
                };
                Ok((dim, target))
            })
            .collect::<Result<Vec<_>>>()?;
        IndexTable::new(entries)
    }

    /// The table the diagnostics scan, honouring `diagnose.namespace`.
    pub fn diagnose_table(&self) -> Result<IndexTable> {
        let table = self.index_table()?;
        Ok(match &self.diagnose.namespace {
            Some(ns) => table.with_namespace(ns),
            None => table,
        })
    }
}

/// The two API keys. Loaded once at startup and handed to the clients.
#[derive(Clone)]
pub struct Credentials {
    pub gemini_api_key: String,
    pub pinecone_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("gemini_api_key", &"<redacted>")
            .field("pinecone_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn from_env() -> Result<Self> { Self::from_lookup(|k| env::var(k).ok()) }

    /// Resolve both keys through `lookup`. Empty values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = require(&lookup, GEMINI_API_KEY)?;
        let pinecone_api_key = require(&lookup, PINECONE_API_KEY)?;
        Ok(Self { gemini_api_key, pinecone_api_key })
    }
}

/// Fetch one required variable through `lookup`.
pub fn require<F>(lookup: F, name: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).filter(|v| !v.trim().is_empty()).ok_or(Error::MissingEnv(name))
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

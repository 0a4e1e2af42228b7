use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0} not set")]
    MissingEnv(&'static str),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported dimension: {0} (expected 384, 512 or 1024)")]
    UnsupportedDimension(usize),

    #[error("No index configured for dimension {0}")]
    NoIndex(usize),

    #[error("{context}: {message}")]
    Request { context: &'static str, message: String },

    #[error("{service} returned status {status}: {body}")]
    Status { service: &'static str, status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to parse JSON file {path}: {message}")]
    PairsFile { path: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

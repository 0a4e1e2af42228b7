//! The three jobs the binaries run: upload, query and diagnose. Each is
//! generic over the embedder, the index and the pacing so it can run
//! against the in-memory stand-ins.
pub mod diagnose;
pub mod log;
pub mod pacing;
pub mod query;
pub mod upload;

pub use pacing::{CountingLimiter, FixedDelay, NoDelay};
pub use upload::{upload_all, UploadReport};

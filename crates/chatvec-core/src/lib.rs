pub mod config;
pub mod error;
pub mod pairs;
pub mod traits;
pub mod types;

pub use error::{Error, Result};

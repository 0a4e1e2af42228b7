//! Startup shared by the binaries: tracing, `.env`, config and API keys.
use anyhow::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chatvec_core::config::{Config, Credentials, Settings};
use chatvec_core::pairs::{LoadedPairs, PairSource};

/// Log to stderr so stdout stays the report. `RUST_LOG` overrides the
/// default `warn` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// A missing `.env` is fine; keys may already be in the environment.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => debug!("no .env file, using process environment"),
        Err(e) => eprintln!("⚠️ Could not read .env: {e}"),
    }
}

pub fn load_settings() -> Result<Settings> {
    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {e}");
        e
    })?;
    config.settings().context("invalid configuration")
}

/// Unwrap a startup value or print the error and exit with status 1.
pub fn or_exit<T>(result: chatvec_core::Result<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}

/// `.env`, config and both API keys. Exits before any client exists when a
/// key is missing.
pub fn bootstrap() -> Result<(Settings, Credentials)> {
    init_tracing();
    load_dotenv();
    let settings = load_settings()?;
    let credentials = or_exit(Credentials::from_env());
    Ok((settings, credentials))
}

pub fn describe_source(loaded: &LoadedPairs) -> String {
    match &loaded.source {
        PairSource::File(path) => format!("📂 Loaded {} pairs from {}", loaded.pairs.len(), path.display()),
        PairSource::Builtin => format!("📂 Using {} built-in pairs", loaded.pairs.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatvec_core::pairs::load_pairs;
    use std::path::Path;

    #[test]
    fn describes_builtin_fallback() {
        let loaded = load_pairs(Some(Path::new("/nonexistent/pairs.json"))).unwrap();
        assert_eq!(describe_source(&loaded), format!("📂 Using {} built-in pairs", loaded.pairs.len()));
    }
}

use std::env;

use chatvec_cli::{init_tracing, load_dotenv, load_settings, or_exit};
use chatvec_core::config::{require, GEMINI_API_KEY};
use chatvec_core::types::TaskType;
use chatvec_embed::GeminiEmbedder;

const DEFAULT_TEXT: &str = "Book my ride for tomorrow";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    load_dotenv();
    let settings = load_settings()?;
    let api_key = or_exit(require(|k| env::var(k).ok(), GEMINI_API_KEY));

    let text = env::args().nth(1).unwrap_or_else(|| DEFAULT_TEXT.to_string());
    let embedder = GeminiEmbedder::new(&settings.embedding, &api_key, settings.http.timeout())?;
    let (status, body) = embedder.probe_raw(&text, TaskType::RetrievalDocument, None).await?;

    println!("🔁 Gemini Response (HTTP {status}):\n{body}");
    Ok(())
}

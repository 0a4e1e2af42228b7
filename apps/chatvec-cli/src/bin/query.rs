use std::env;

use chatvec_cli::bootstrap;
use chatvec_core::types::Dimension;
use chatvec_embed::get_default_embedder;
use chatvec_pipeline::query::{run_interactive, run_test_queries};
use chatvec_vector::PineconeClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (settings, credentials) = bootstrap()?;
    let table = settings.index_table()?;
    let dimensions: Vec<Dimension> = table.dimensions().collect();

    let embedder = get_default_embedder(&settings, &credentials)?;
    let index = PineconeClient::new(table, &credentials.pinecone_api_key, settings.http.timeout())?;
    let top_k = settings.query.top_k;

    if env::args().nth(1).as_deref() == Some("test") {
        run_test_queries(&embedder, &index, &dimensions, top_k).await;
    } else {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        run_interactive(&embedder, &index, &dimensions, top_k, stdin).await?;
    }
    Ok(())
}

use chatvec_cli::bootstrap;
use chatvec_pipeline::diagnose::diagnose_index;
use chatvec_vector::PineconeClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (settings, credentials) = bootstrap()?;
    let table = settings.diagnose_table()?;
    let index = PineconeClient::new(table, &credentials.pinecone_api_key, settings.http.timeout())?;

    println!("🧠 Debugging Pinecone Vector Data for Issues\n============================================");
    let mut issues = 0usize;
    for (dimension, target) in index.table().iter() {
        match diagnose_index(&index, dimension, target, settings.diagnose.top_k, settings.diagnose.display_limit).await {
            Ok(findings) => issues += findings.len(),
            Err(e) => println!("❌ Error with {dimension}D index: {e:#}"),
        }
    }
    println!("\n✅ Diagnosis finished ({issues} issue(s) flagged)");
    Ok(())
}

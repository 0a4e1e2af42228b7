use chrono::Local;

use chatvec_cli::{bootstrap, describe_source};
use chatvec_core::pairs::load_pairs;
use chatvec_core::types::Dimension;
use chatvec_embed::get_default_embedder;
use chatvec_pipeline::log::save_processing_log;
use chatvec_pipeline::{upload_all, FixedDelay};
use chatvec_vector::PineconeClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let (settings, credentials) = bootstrap()?;
    let table = settings.index_table()?;
    let dimensions: Vec<Dimension> = table.dimensions().collect();

    println!("🚀 Starting Chatbot Vector Database Setup...\n===========================================");
    for (dimension, target) in table.iter() {
        println!("   {dimension}D → {} (namespace: {})", target.index_name, target.namespace);
    }

    let logged = load_pairs(settings.data.log_pairs_path().as_deref())?;
    println!("{}", describe_source(&logged));
    match save_processing_log(&settings.data.log_dir_path(), &logged.pairs, &dimensions, Local::now()) {
        Ok(path) => println!("📝 Processing log saved to: {}", path.display()),
        Err(e) => eprintln!("⚠️ Failed to create log file: {e:#}"),
    }

    let loaded = load_pairs(settings.data.pairs_path().as_deref())?;
    println!("{}", describe_source(&loaded));

    let embedder = get_default_embedder(&settings, &credentials)?;
    let index = PineconeClient::new(table, &credentials.pinecone_api_key, settings.http.timeout())?;
    let limiter = FixedDelay::from_settings(&settings.pacing);

    let report = upload_all(&embedder, &index, &limiter, &loaded.pairs, dimensions.iter().copied()).await;

    println!("\n🎉 Vector database setup complete!");
    println!("📊 Uploaded {} vectors across {} indexes", report.total_uploaded(), report.dimensions.len());
    if !report.all_succeeded() {
        for d in report.dimensions.iter().filter(|d| d.failed > 0 || d.error.is_some()) {
            println!("   ⚠️ {}D: {} embedding failure(s){}", d.dimension, d.failed, d.error.as_deref().map(|e| format!(", upload error: {e}")).unwrap_or_default());
        }
    }
    println!("💡 Run `chatvec-query test` to try the sample queries");
    Ok(())
}

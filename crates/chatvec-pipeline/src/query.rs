use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use chatvec_core::traits::{Embedder, VectorIndex};
use chatvec_core::types::{Dimension, QueryMatch, TaskType};

/// Canned queries for `chatvec-query test`.
pub const TEST_QUERIES: [&str; 5] = [
    "I want to book a ride for tomorrow morning",
    "Cancel my pickup for today",
    "What time is my ride tomorrow?",
    "Show me available shifts",
    "Book transport for next week",
];

/// Embed `text` for querying and fetch the nearest stored pairs.
pub async fn search_similar<E, V>(embedder: &E, index: &V, text: &str, dimension: Dimension, top_k: usize) -> Result<Vec<QueryMatch>>
where
    E: Embedder,
    V: VectorIndex,
{
    let vector = embedder
        .embed(text, dimension, TaskType::RetrievalQuery)
        .await
        .context("failed to get embedding")?;
    let matches = index.query(dimension, &vector, top_k).await?;
    Ok(matches)
}

#[derive(Debug)]
pub struct DimensionResults {
    pub dimension: Dimension,
    pub outcome: Result<Vec<QueryMatch>>,
}

/// Run the same query against every dimension. One failing dimension does
/// not stop the others.
pub async fn search_all<E, V, I>(embedder: &E, index: &V, text: &str, dimensions: I, top_k: usize) -> Vec<DimensionResults>
where
    E: Embedder,
    V: VectorIndex,
    I: IntoIterator<Item = Dimension>,
{
    let mut out = Vec::new();
    for dimension in dimensions {
        let outcome = search_similar(embedder, index, text, dimension, top_k).await;
        out.push(DimensionResults { dimension, outcome });
    }
    out
}

pub fn render_results(text: &str, results: &[DimensionResults]) -> String {
    let mut s = String::new();
    let rule = "=".repeat(60);
    let _ = writeln!(s, "{rule}");
    let _ = writeln!(s, "🔍 Query: {text}");
    let _ = writeln!(s, "{rule}");
    for r in results {
        let _ = writeln!(s, "\n📊 Dimension {} Results:", r.dimension);
        let _ = writeln!(s, "{}", "-".repeat(30));
        match &r.outcome {
            Err(e) => { let _ = writeln!(s, "❌ Error: {e:#}"); }
            Ok(matches) if matches.is_empty() => { let _ = writeln!(s, "No matches found"); }
            Ok(matches) => {
                for (i, m) in matches.iter().enumerate() {
                    let _ = writeln!(s, "{}. Score: {:.3}", i + 1, m.score);
                    let _ = writeln!(s, "   Similar Input: {}", m.metadata.input);
                    let _ = writeln!(s, "   Response: {}", m.metadata.output);
                    let _ = writeln!(s);
                }
            }
        }
    }
    s
}

pub async fn answer<E, V, I>(embedder: &E, index: &V, text: &str, dimensions: I, top_k: usize)
where
    E: Embedder,
    V: VectorIndex,
    I: IntoIterator<Item = Dimension>,
{
    let results = search_all(embedder, index, text, dimensions, top_k).await;
    print!("{}", render_results(text, &results));
}

pub async fn run_test_queries<E, V>(embedder: &E, index: &V, dimensions: &[Dimension], top_k: usize)
where
    E: Embedder,
    V: VectorIndex,
{
    println!("🧪 Testing Vector Search Functionality...");
    for text in TEST_QUERIES {
        answer(embedder, index, text, dimensions.iter().copied(), top_k).await;
        println!("\n{}\n", "=".repeat(80));
    }
}

/// Read queries line by line until `quit`, `exit` or end of input. Returns
/// how many queries were answered.
pub async fn run_interactive<E, V, R>(embedder: &E, index: &V, dimensions: &[Dimension], top_k: usize, input: R) -> Result<usize>
where
    E: Embedder,
    V: VectorIndex,
    R: AsyncBufRead + Unpin,
{
    println!("🤖 Chatbot Vector Search - Interactive Mode");
    println!("Type your queries (or 'quit' to exit):");

    let mut lines = input.lines();
    let mut answered = 0usize;
    loop {
        print!("\n> ");
        std::io::stdout().flush().context("failed to flush stdout")?;
        let Some(line) = lines.next_line().await.context("failed to read input")? else { break };
        let text = line.trim();
        if text.is_empty() { continue; }
        if text.eq_ignore_ascii_case("quit") || text.eq_ignore_ascii_case("exit") { break; }
        answer(embedder, index, text, dimensions.iter().copied(), top_k).await;
        answered += 1;
    }
    println!("👋 Goodbye!");
    Ok(answered)
}

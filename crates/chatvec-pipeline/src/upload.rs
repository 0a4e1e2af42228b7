//! Embed every pair at every configured dimension and upsert the results.
//!
//! Failures stay local: a pair that cannot be embedded is skipped, a batch
//! that cannot be uploaded is reported, and the next dimension still runs.
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use chatvec_core::traits::{Embedder, RateLimiter, VectorIndex};
use chatvec_core::types::{Dimension, Pair, TaskType, VectorRecord};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionReport {
    pub dimension: Dimension,
    pub embedded: usize,
    pub failed: usize,
    /// Count reported by the index, `None` when nothing was sent or the call failed.
    pub uploaded: Option<usize>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub dimensions: Vec<DimensionReport>,
}

impl UploadReport {
    pub fn total_uploaded(&self) -> usize { self.dimensions.iter().filter_map(|d| d.uploaded).sum() }

    pub fn all_succeeded(&self) -> bool { self.dimensions.iter().all(|d| d.failed == 0 && d.error.is_none()) }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} pairs ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

/// What one embedding pass over the pairs produced.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedBatch {
    pub records: Vec<VectorRecord>,
    pub failed: usize,
    /// Pair counts at which a progress line was printed.
    pub checkpoints: Vec<usize>,
}

/// Embed each pair's input at `dimension`. Record ids follow the pair's
/// position in `pairs`. Progress is reported every 10th pair, and only when
/// that pair embedded.
pub async fn embed_pairs<E, R>(embedder: &E, limiter: &R, pairs: &[Pair], dimension: Dimension) -> EmbeddedBatch
where
    E: Embedder,
    R: RateLimiter,
{
    let pb = progress_bar(pairs.len());
    let mut batch = EmbeddedBatch { records: Vec::with_capacity(pairs.len()), ..EmbeddedBatch::default() };
    for (i, pair) in pairs.iter().enumerate() {
        pb.set_message(format!("dim {dimension}"));
        match embedder.embed(&pair.input, dimension, TaskType::RetrievalDocument).await {
            Ok(values) => {
                batch.records.push(VectorRecord::from_pair(i, pair, dimension, values, Utc::now().timestamp()));
                limiter.after_item().await;
                pb.inc(1);
                if (i + 1) % 10 == 0 {
                    pb.println(format!("   📝 Processed {}/{} pairs for dim {dimension}", i + 1, pairs.len()));
                    batch.checkpoints.push(i + 1);
                }
            }
            Err(e) => {
                batch.failed += 1;
                warn!(pair = i, %dimension, error = %e, "embedding failed");
                pb.println(format!("❌ Error getting embedding for pair {i}: {e}"));
                pb.inc(1);
            }
        }
    }
    pb.finish_and_clear();
    batch
}

pub async fn upload_all<E, V, R, I>(embedder: &E, index: &V, limiter: &R, pairs: &[Pair], dimensions: I) -> UploadReport
where
    E: Embedder,
    V: VectorIndex,
    R: RateLimiter,
    I: IntoIterator<Item = Dimension>,
{
    let dimensions: Vec<Dimension> = dimensions.into_iter().collect();
    println!("📊 Processing {} input-output pairs for {} different dimensions...", pairs.len(), dimensions.len());

    let mut report = UploadReport::default();
    for dimension in dimensions {
        println!("\n🔄 Processing dimension {dimension}...");
        let EmbeddedBatch { records, failed, .. } = embed_pairs(embedder, limiter, pairs, dimension).await;
        let mut entry = DimensionReport { dimension, embedded: records.len(), failed, uploaded: None, error: None };

        if !records.is_empty() {
            match index.upsert(dimension, &records).await {
                Ok(n) => {
                    println!("✅ Successfully uploaded {} vectors for dimension {dimension}", records.len());
                    entry.uploaded = Some(n);
                }
                Err(e) => {
                    println!("❌ Failed to upload dim {dimension}: {e}");
                    entry.error = Some(e.to_string());
                }
            }
        }
        report.dimensions.push(entry);

        limiter.after_batch().await;
    }
    report
}

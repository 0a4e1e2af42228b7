//! Dump what an index holds and flag metadata that looks wrong.
//!
//! A zero vector scores every record the same, so a wide top-k query with it
//! is a cheap way to list stored rows.
//!
//! The scan reads the namespace the uploader writes to. Older data lives in
//! `chatbot-training-data`; set `diagnose.namespace` to scan that instead.
use std::fmt::Write as _;

use anyhow::Result;

use chatvec_core::traits::VectorIndex;
use chatvec_core::types::{Dimension, IndexTarget, MatchMetadata, QueryMatch};

/// What a prompt/response pair looks like after being pasted into the
/// input field by mistake.
pub const CORRUPTED_INPUT: &str = "Similar Input: System Response:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defect {
    /// input or output is empty
    MissingField,
    /// input and output are identical
    InputEqualsOutput,
    /// input is the known concatenation artefact
    Corrupted,
}

impl Defect {
    pub fn message(self) -> &'static str {
        match self {
            Defect::MissingField => "⚠️ WARNING: Missing input/output in metadata",
            Defect::InputEqualsOutput => "⚠️ Suspicious: Input and Output are same",
            Defect::Corrupted => "❌ Corrupted: Looks like concatenated string",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub row: usize,
    pub id: String,
    pub defect: Defect,
}

pub fn inspect(meta: &MatchMetadata) -> Vec<Defect> {
    let mut defects = Vec::new();
    if meta.input.is_empty() || meta.output.is_empty() { defects.push(Defect::MissingField); }
    if meta.input == meta.output { defects.push(Defect::InputEqualsOutput); }
    if meta.input == CORRUPTED_INPUT { defects.push(Defect::Corrupted); }
    defects
}

pub fn scan(matches: &[QueryMatch]) -> Vec<Finding> {
    matches
        .iter()
        .enumerate()
        .flat_map(|(row, m)| inspect(&m.metadata).into_iter().map(move |defect| Finding { row, id: m.id.clone(), defect }))
        .collect()
}

/// Listing of the first `display_limit` rows with their warnings.
pub fn render_scan(matches: &[QueryMatch], display_limit: usize) -> String {
    let mut s = String::new();
    if matches.is_empty() {
        let _ = writeln!(s, "⚠️ No vectors found.");
        return s;
    }
    for (i, m) in matches.iter().take(display_limit).enumerate() {
        let _ = writeln!(s, "{:2}. Score: {:.3} | Input: {:?}", i + 1, m.score, m.metadata.input);
        for defect in inspect(&m.metadata) {
            let _ = writeln!(s, "   {}", defect.message());
        }
    }
    if matches.len() > display_limit {
        let _ = writeln!(s, "   ...only showing first {display_limit} of {} vectors", matches.len());
    }
    s
}

/// Scan the index for `dimension` and print the listing. Returns every
/// finding, including rows past the display limit.
pub async fn diagnose_index<V: VectorIndex>(index: &V, dimension: Dimension, target: &IndexTarget, top_k: usize, display_limit: usize) -> Result<Vec<Finding>> {
    println!("\n🔍 Checking index: {} ({dimension}D)", target.index_name);
    println!("{}", "-".repeat(58));

    let zero = vec![0.0_f32; dimension.size()];
    let matches = index.query(dimension, &zero, top_k).await?;
    print!("{}", render_scan(&matches, display_limit));

    let findings = scan(&matches);
    if !findings.is_empty() {
        println!("⚠️ {} issue(s) across {} vectors", findings.len(), matches.len());
    }
    Ok(findings)
}

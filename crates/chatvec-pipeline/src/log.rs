use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use chatvec_core::types::{Dimension, Pair};

/// Write `processing_log_<unix>.txt` under `dir`, creating the directory if
/// needed. Returns the file path.
pub fn save_processing_log(dir: &Path, pairs: &[Pair], dimensions: &[Dimension], now: DateTime<Local>) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(format!("processing_log_{}.txt", now.timestamp()));
    let file = fs::File::create(&path).with_context(|| format!("failed to create log file {}", path.display()))?;
    let mut w = BufWriter::new(file);

    let dims: Vec<String> = dimensions.iter().map(ToString::to_string).collect();
    writeln!(w, "Processing Log - {}", now.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(w, "Total pairs processed: {}", pairs.len())?;
    writeln!(w, "Dimensions: {}\n", dims.join(", "))?;
    for (i, pair) in pairs.iter().enumerate() {
        writeln!(w, "Pair {}:", i + 1)?;
        writeln!(w, "Input: {}", pair.input)?;
        writeln!(w, "Output: {}\n", pair.output)?;
    }
    w.flush()?;
    Ok(path)
}

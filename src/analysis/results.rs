// Results files: the JSON array of PaperInfo written by `analyze` and read
// by `aggregate`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::paper::PaperInfo;

/// Write papers as a pretty-printed JSON array, creating parent directories.
pub fn write_results(path: &Path, papers: &[PaperInfo]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(papers)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write results to {}", path.display()))?;
    info!(papers = papers.len(), path = %path.display(), "Wrote analysis results");
    Ok(())
}

/// Read a results file.
pub fn read_results(path: &Path) -> Result<Vec<PaperInfo>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read results file {}", path.display()))?;
    let papers: Vec<PaperInfo> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of paper metadata", path.display()))?;
    info!(papers = papers.len(), path = %path.display(), "Loaded analysis results");
    Ok(papers)
}

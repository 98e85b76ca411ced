// Aggregation: technology labels from analyzed papers -> clusters -> report.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::analysis::paper::{technology_labels, PaperInfo};
use crate::analysis::results::read_results;
use crate::clustering::{
    count_labels, ClusterError, ClusterSet, LabeledFrequency, PartialRatio, SynonymClusterer,
};
use crate::output::csv::write_report;
use crate::output::report::{build_report, ReportRow};

/// Everything the aggregation step produces, kept for display.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Cleaned label counts, highest first
    pub labels: Vec<LabeledFrequency>,
    pub clusters: ClusterSet,
    /// Report rows at or above the cutoff
    pub rows: Vec<ReportRow>,
}

/// Count, cluster and filter the technology labels of `papers`.
pub fn summarize(
    papers: &[PaperInfo],
    threshold: f64,
    min_frequency: u64,
) -> Result<Summary, ClusterError> {
    let labels = count_labels(technology_labels(papers));
    let clusterer = SynonymClusterer::new(PartialRatio::default(), threshold)?;
    let clusters = clusterer.cluster(&labels)?;
    let rows = build_report(&clusters, min_frequency);

    info!(
        papers = papers.len(),
        distinct_labels = labels.len(),
        clusters = clusters.len(),
        reported = rows.len(),
        "Aggregated technology labels"
    );

    Ok(Summary {
        labels,
        clusters,
        rows,
    })
}

/// Read a results file, summarize it and write the CSV report into `out_dir`.
pub fn run(
    results_path: &Path,
    threshold: f64,
    min_frequency: u64,
    out_dir: &Path,
) -> Result<(Summary, PathBuf)> {
    let papers = read_results(results_path)?;
    let summary = summarize(&papers, threshold, min_frequency)
        .with_context(|| format!("Failed to cluster labels from {}", results_path.display()))?;
    let report_path = write_report(&summary.rows, out_dir, min_frequency)?;
    Ok((summary, report_path))
}

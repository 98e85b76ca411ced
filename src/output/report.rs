// Cluster report rows: aggregate, filter by cutoff, sort by representative.

use serde::Serialize;

use crate::clustering::ClusterSet;

/// Default cutoff for `minimum_aggregate_frequency`.
pub const DEFAULT_MIN_FREQUENCY: u64 = 5;

/// One line of the technology report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Sum of member counts
    pub frequency: u64,
    /// The cluster representative
    pub technology_name: String,
    /// Member labels in match order, representative first
    pub matched_synonyms: Vec<String>,
}

/// Build report rows from clusters.
///
/// Clusters whose aggregate frequency is below `min_frequency` are dropped
/// (a cluster exactly at the cutoff is kept). Rows are sorted by
/// representative in byte order.
pub fn build_report(clusters: &ClusterSet, min_frequency: u64) -> Vec<ReportRow> {
    let mut rows: Vec<ReportRow> = clusters
        .iter()
        .map(|c| ReportRow {
            frequency: c.aggregate_frequency(),
            technology_name: c.representative.clone(),
            matched_synonyms: c.member_labels(),
        })
        .filter(|row| row.frequency >= min_frequency)
        .collect();
    rows.sort_by(|a, b| a.technology_name.cmp(&b.technology_name));
    rows
}

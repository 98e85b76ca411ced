// Greedy partition-by-leader synonym clustering.
//
// Each round takes the first remaining entry as the leader, scores it against
// every remaining entry (itself included), and moves everything at or above
// the threshold into the leader's cluster. Matched entries leave the remaining
// list for good, so each round shrinks it by at least the leader and the loop
// ends after at most one round per entry.
//
// The result depends on input order: the leader is always the first remaining
// entry. Callers pass labels most-frequent first (see `count_labels`) so the
// most common spelling becomes the representative.

use tracing::{debug, info};

use super::error::ClusterError;
use super::similarity::{PartialRatio, SimilarityScorer, MAX_SCORE};
use super::types::{ClusterSet, LabeledFrequency};

/// Default minimum score for two labels to count as synonyms.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 90.0;

/// Synonym clusterer with a pluggable similarity policy.
#[derive(Debug, Clone)]
pub struct SynonymClusterer<S = PartialRatio> {
    scorer: S,
    threshold: f64,
}

impl Default for SynonymClusterer<PartialRatio> {
    fn default() -> Self {
        Self {
            scorer: PartialRatio::default(),
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl<S: SimilarityScorer> SynonymClusterer<S> {
    /// Build a clusterer. The threshold must lie on the 0-100 scale.
    pub fn new(scorer: S, threshold: f64) -> Result<Self, ClusterError> {
        if !(0.0..=MAX_SCORE).contains(&threshold) {
            return Err(ClusterError::InvalidThreshold(threshold));
        }
        Ok(Self { scorer, threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Partition `entries` into synonym clusters.
    ///
    /// Rejects empty labels and zero counts before any round runs. Panics if
    /// the scorer fails to match a leader against itself, since no progress
    /// is possible with such a scorer.
    pub fn cluster(&self, entries: &[LabeledFrequency]) -> Result<ClusterSet, ClusterError> {
        validate(entries)?;

        let mut clusters = ClusterSet::new();
        let mut remaining: Vec<&LabeledFrequency> = entries.iter().collect();
        let mut rounds = 0usize;

        while let Some(&leader) = remaining.first() {
            rounds += 1;

            let self_score = self.scorer.score(&leader.label, &leader.label);
            assert!(
                self_score >= self.threshold,
                "similarity scorer is not reflexive: {:?} scored {} against itself \
                 (threshold {})",
                leader.label,
                self_score,
                self.threshold
            );

            let (matched, rest): (Vec<&LabeledFrequency>, Vec<&LabeledFrequency>) = remaining
                .into_iter()
                .partition(|entry| self.scorer.score(&leader.label, &entry.label) >= self.threshold);

            // The leader is matched[0]: it was first in `remaining` and
            // partition keeps relative order.
            assert!(
                matched.first().is_some_and(|m| std::ptr::eq(*m, leader)),
                "leader {:?} was not matched against itself",
                leader.label
            );

            debug!(
                round = rounds,
                leader = %leader.label,
                matched = matched.len(),
                remaining = rest.len(),
                "Clustered synonyms"
            );

            let cluster = clusters.open(leader.label.clone());
            cluster.members.extend(matched.into_iter().cloned());

            remaining = rest;
        }

        info!(
            entries = entries.len(),
            clusters = clusters.len(),
            rounds,
            threshold = self.threshold,
            "Synonym clustering complete"
        );

        Ok(clusters)
    }
}

/// Cluster with the default partial-ratio scorer at the given threshold.
pub fn cluster(entries: &[LabeledFrequency], threshold: f64) -> Result<ClusterSet, ClusterError> {
    SynonymClusterer::new(PartialRatio::default(), threshold)?.cluster(entries)
}

fn validate(entries: &[LabeledFrequency]) -> Result<(), ClusterError> {
    for (index, entry) in entries.iter().enumerate() {
        if entry.label.trim().is_empty() {
            return Err(ClusterError::EmptyLabel { index });
        }
        if entry.count == 0 {
            return Err(ClusterError::ZeroCount {
                index,
                label: entry.label.clone(),
            });
        }
    }
    Ok(())
}

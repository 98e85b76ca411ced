// Data model for synonym clustering.
//
// A ClusterSet is the engine's output: clusters keyed by representative
// label, iterated in the order their leaders were chosen.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A label and how many times it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabeledFrequency {
    pub label: String,
    pub count: u32,
}

impl LabeledFrequency {
    pub fn new(label: impl Into<String>, count: u32) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

impl<S: Into<String>> From<(S, u32)> for LabeledFrequency {
    fn from((label, count): (S, u32)) -> Self {
        Self::new(label, count)
    }
}

/// A group of labels judged to be synonyms of the representative.
///
/// `members[0]` is always the representative's own entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub representative: String,
    pub members: Vec<LabeledFrequency>,
}

impl Cluster {
    /// Sum of member counts.
    pub fn aggregate_frequency(&self) -> u64 {
        self.members.iter().map(|m| u64::from(m.count)).sum()
    }

    /// Member labels in the order they were matched.
    pub fn member_labels(&self) -> Vec<String> {
        self.members.iter().map(|m| m.label.clone()).collect()
    }
}

/// Clusters keyed by representative, in leader order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClusterSet {
    clusters: Vec<Cluster>,
    index: HashMap<String, usize>,
}

impl ClusterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty cluster for `representative` and return it for filling.
    ///
    /// Panics if the representative already has a cluster: a label that has
    /// led a round must never lead again.
    pub(crate) fn open(&mut self, representative: String) -> &mut Cluster {
        assert!(
            !self.index.contains_key(&representative),
            "representative {representative:?} led more than one round"
        );
        let slot = self.clusters.len();
        self.index.insert(representative.clone(), slot);
        self.clusters.push(Cluster {
            representative,
            members: Vec::new(),
        });
        &mut self.clusters[slot]
    }

    pub fn get(&self, representative: &str) -> Option<&Cluster> {
        self.index.get(representative).map(|&i| &self.clusters[i])
    }

    pub fn contains(&self, representative: &str) -> bool {
        self.index.contains_key(representative)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cluster> {
        self.clusters.iter()
    }

    pub fn representatives(&self) -> impl Iterator<Item = &str> {
        self.clusters.iter().map(|c| c.representative.as_str())
    }

    /// Total number of members across all clusters.
    pub fn member_count(&self) -> usize {
        self.clusters.iter().map(|c| c.members.len()).sum()
    }
}

impl IntoIterator for ClusterSet {
    type Item = Cluster;
    type IntoIter = std::vec::IntoIter<Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.into_iter()
    }
}

impl<'a> IntoIterator for &'a ClusterSet {
    type Item = &'a Cluster;
    type IntoIter = std::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_frequency_sums_members() {
        let cluster = Cluster {
            representative: "REST".to_string(),
            members: vec![
                LabeledFrequency::new("REST", 12),
                LabeledFrequency::new("RESTful", 4),
            ],
        };
        assert_eq!(cluster.aggregate_frequency(), 16);
        assert_eq!(cluster.member_labels(), vec!["REST", "RESTful"]);
    }

    #[test]
    fn test_aggregate_frequency_does_not_overflow_u32() {
        let cluster = Cluster {
            representative: "a".to_string(),
            members: vec![
                LabeledFrequency::new("a", u32::MAX),
                LabeledFrequency::new("b", u32::MAX),
            ],
        };
        assert_eq!(cluster.aggregate_frequency(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn test_cluster_set_keeps_leader_order() {
        let mut set = ClusterSet::new();
        set.open("zeta".to_string());
        set.open("alpha".to_string());
        let reps: Vec<&str> = set.representatives().collect();
        assert_eq!(reps, vec!["zeta", "alpha"]);
        assert!(set.contains("alpha"));
        assert!(set.get("beta").is_none());
    }

    #[test]
    #[should_panic(expected = "led more than one round")]
    fn test_cluster_set_rejects_repeat_representative() {
        let mut set = ClusterSet::new();
        set.open("MQTT".to_string());
        set.open("MQTT".to_string());
    }
}

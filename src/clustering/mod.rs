// Synonym clustering: label cleanup, frequency counting, fuzzy similarity,
// and the greedy partition-by-leader engine.

pub mod engine;
pub mod error;
pub mod frequency;
pub mod similarity;
pub mod types;

pub use engine::{cluster, SynonymClusterer, DEFAULT_SIMILARITY_THRESHOLD};
pub use error::ClusterError;
pub use frequency::{count_labels, normalize_label};
pub use similarity::{PartialRatio, SimilarityScorer, MAX_SCORE};
pub use types::{Cluster, ClusterSet, LabeledFrequency};

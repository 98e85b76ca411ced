// Input validation errors for the clustering engine.
//
// These are raised before the first round runs. A broken similarity scorer
// is not represented here: that is a contract violation and panics instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterError {
    #[error("Entry {index} has an empty label")]
    EmptyLabel { index: usize },

    #[error("Entry {index} ({label:?}) has a zero count")]
    ZeroCount { index: usize, label: String },

    #[error("Similarity threshold {0} is outside the 0-100 scale")]
    InvalidThreshold(f64),
}

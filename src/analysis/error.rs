// Errors from a single abstract analysis.
//
// A failed call is always one of these, never a string that could be
// mistaken for model output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Language model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Language model returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Language model returned no message content")]
    EmptyResponse,

    #[error("Language model output is not valid paper metadata: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Entry {0} has no abstract")]
    MissingAbstract(String),
}

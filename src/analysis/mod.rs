// Paper analysis: extracting structured metadata from abstracts with a
// language model, and persisting the results.

pub mod error;
pub mod openai;
pub mod paper;
pub mod rate_limiter;
pub mod results;
pub mod traits;

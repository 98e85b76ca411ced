// PaperInfo: the structured metadata extracted from one abstract.

use serde::{Deserialize, Serialize};

/// Metadata the language model extracts from a paper abstract.
///
/// Field names match the results files consumed by the aggregation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperInfo {
    pub evaluation_example: String,
    pub use_case: String,
    pub application_domain: String,
    /// Acronyms of the technologies used in the paper
    pub technology_used: Vec<String>,
}

/// Every raw technology label across a set of papers, in paper order.
pub fn technology_labels(papers: &[PaperInfo]) -> impl Iterator<Item = &str> {
    papers
        .iter()
        .flat_map(|p| p.technology_used.iter().map(String::as_str))
}

/// System prompt describing the JSON object the model must return.
pub const SYSTEM_PROMPT: &str = "\
You classify research papers from their abstracts. Respond with a single JSON \
object and nothing else, using exactly these keys:
  \"evaluation_example\": string, how the approach was evaluated
  \"use_case\": string, the use case addressed
  \"application_domain\": string, the application domain
  \"technology_used\": array of strings, the acronyms of the technologies used \
in the paper. DO NOT WRITE OR EXPLAIN THE MEANING OF THE ACRONYMS!";

/// User message for one abstract.
pub fn user_prompt(abstract_text: &str) -> String {
    format!("Analyze the following abstract, try to be short and precise {abstract_text}")
}

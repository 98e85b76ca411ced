// Pipeline stages that tie the library together.
//
// analyze:   BibTeX entries -> language model -> PaperInfo per paper
// aggregate: PaperInfo -> label counts -> synonym clusters -> report rows

pub mod aggregate;
pub mod analyze;

pub use aggregate::{summarize, Summary};
pub use analyze::{analyze_entries, PaperOutcome};

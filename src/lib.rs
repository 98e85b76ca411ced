// litsynth: literature-review synthesis
//
// Reads a BibTeX bibliography, asks a language model for structured metadata
// per abstract, and clusters the technology labels it reports into synonym
// groups for a frequency report.

pub mod analysis;
pub mod bibtex;
pub mod clustering;
pub mod config;
pub mod output;
pub mod pipeline;

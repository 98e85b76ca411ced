// BibTeX input: reading bibliography exports into plain-text entries.
//
// Only what the analysis pipeline needs: entry type, citation key, and
// field values converted from LaTeX markup to plain Unicode text.

pub mod latex;
pub mod parser;

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

pub use parser::parse;

/// A single bibliography entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BibEntry {
    /// Lowercased entry type, e.g. "article" or "inproceedings"
    pub entry_type: String,
    pub key: String,
    /// Field values keyed by lowercased field name, already converted to plain text
    pub fields: BTreeMap<String, String>,
}

impl BibEntry {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    pub fn abstract_text(&self) -> Option<&str> {
        self.field("abstract")
    }
}

/// Read and parse a BibTeX file.
pub fn read_file(path: &Path) -> Result<Vec<BibEntry>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read BibTeX file {}", path.display()))?;
    let entries = parse(&text);
    info!(
        entries = entries.len(),
        path = %path.display(),
        "Loaded BibTeX entries"
    );
    Ok(entries)
}

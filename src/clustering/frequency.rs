// Label cleanup and frequency counting.
//
// Raw technology labels from the language model are cleaned uniformly,
// counted, and ordered most-frequent first. That ordering is what makes the
// most common spelling of a technology become its cluster representative.

use std::collections::HashMap;

use tracing::debug;

use super::types::LabeledFrequency;

/// Clean a raw label: hyphens become spaces, surrounding whitespace is trimmed.
pub fn normalize_label(raw: &str) -> String {
    raw.replace('-', " ").trim().to_string()
}

/// Count cleaned labels and order them by descending count.
///
/// Ties keep first-seen order. Labels that are empty after cleanup are
/// dropped, since the engine rejects empty labels.
pub fn count_labels<I, S>(labels: I) -> Vec<LabeledFrequency>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut counted: Vec<LabeledFrequency> = Vec::new();
    let mut dropped = 0usize;

    for raw in labels {
        let label = normalize_label(raw.as_ref());
        if label.is_empty() {
            dropped += 1;
            continue;
        }
        match slots.get(&label) {
            Some(&i) => counted[i].count += 1,
            None => {
                slots.insert(label.clone(), counted.len());
                counted.push(LabeledFrequency::new(label, 1));
            }
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped labels that were empty after cleanup");
    }

    // sort_by is stable, so equal counts stay in first-seen order
    counted.sort_by(|a, b| b.count.cmp(&a.count));
    counted
}

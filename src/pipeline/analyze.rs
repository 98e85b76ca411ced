// Abstract analysis: send every entry's abstract through a PaperAnalyzer.
//
// Calls run with bounded concurrency; the analyzer's own rate limiter does
// the pacing. Outcomes come back in entry order, one per entry, so a failed
// paper is reported by key and never turns into content.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::analysis::error::AnalysisError;
use crate::analysis::paper::PaperInfo;
use crate::analysis::traits::PaperAnalyzer;
use crate::bibtex::BibEntry;

/// Result of analyzing one bibliography entry.
#[derive(Debug)]
pub enum PaperOutcome {
    Analyzed { key: String, info: PaperInfo },
    Failed { key: String, reason: AnalysisError },
}

impl PaperOutcome {
    pub fn key(&self) -> &str {
        match self {
            Self::Analyzed { key, .. } | Self::Failed { key, .. } => key,
        }
    }

    pub fn info(&self) -> Option<&PaperInfo> {
        match self {
            Self::Analyzed { info, .. } => Some(info),
            Self::Failed { .. } => None,
        }
    }

    pub fn into_info(self) -> Option<PaperInfo> {
        match self {
            Self::Analyzed { info, .. } => Some(info),
            Self::Failed { .. } => None,
        }
    }
}

/// Analyze every entry, at most `concurrency` requests in flight.
///
/// Entries without an abstract fail with `MissingAbstract` and never reach
/// the analyzer.
pub async fn analyze_entries(
    analyzer: &dyn PaperAnalyzer,
    entries: &[BibEntry],
    concurrency: usize,
) -> Vec<PaperOutcome> {
    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Analyzing [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let outcomes: Vec<PaperOutcome> = stream::iter(entries.iter().map(|entry| {
        let pb = &pb;
        async move {
            let outcome = analyze_entry(analyzer, entry).await;
            pb.inc(1);
            outcome
        }
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, PaperOutcome::Failed { .. }))
        .count();
    info!(
        entries = entries.len(),
        analyzed = entries.len() - failed,
        failed,
        "Abstract analysis complete"
    );

    outcomes
}

async fn analyze_entry(analyzer: &dyn PaperAnalyzer, entry: &BibEntry) -> PaperOutcome {
    let key = entry.key.clone();
    let Some(abstract_text) = entry.abstract_text() else {
        warn!(key = %key, "Entry has no abstract, skipping");
        return PaperOutcome::Failed {
            reason: AnalysisError::MissingAbstract(key.clone()),
            key,
        };
    };

    match analyzer.analyze(abstract_text).await {
        Ok(info) => PaperOutcome::Analyzed { key, info },
        Err(reason) => {
            warn!(key = %key, error = %reason, "Failed to analyze abstract, skipping");
            PaperOutcome::Failed { key, reason }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct EchoAnalyzer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PaperAnalyzer for EchoAnalyzer {
        async fn analyze(&self, abstract_text: &str) -> Result<PaperInfo, AnalysisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if abstract_text.contains("garbled") {
                return Err(AnalysisError::EmptyResponse);
            }
            Ok(PaperInfo {
                evaluation_example: String::new(),
                use_case: abstract_text.to_string(),
                application_domain: String::new(),
                technology_used: vec![],
            })
        }
    }

    fn entry(key: &str, abstract_text: Option<&str>) -> BibEntry {
        let mut fields = BTreeMap::new();
        if let Some(text) = abstract_text {
            fields.insert("abstract".to_string(), text.to_string());
        }
        BibEntry {
            entry_type: "article".to_string(),
            key: key.to_string(),
            fields,
        }
    }

    #[tokio::test]
    async fn test_outcomes_follow_entry_order() {
        let analyzer = EchoAnalyzer {
            calls: AtomicUsize::new(0),
        };
        let entries = vec![
            entry("a", Some("first")),
            entry("b", None),
            entry("c", Some("garbled output")),
            entry("d", Some("fourth")),
        ];

        let outcomes = analyze_entries(&analyzer, &entries, 3).await;

        let keys: Vec<&str> = outcomes.iter().map(|o| o.key()).collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
        assert_eq!(outcomes[0].info().unwrap().use_case, "first");
        assert!(matches!(
            &outcomes[1],
            PaperOutcome::Failed { reason: AnalysisError::MissingAbstract(k), .. } if k == "b"
        ));
        assert!(matches!(
            &outcomes[2],
            PaperOutcome::Failed { reason: AnalysisError::EmptyResponse, .. }
        ));
        assert_eq!(outcomes[3].info().unwrap().use_case, "fourth");
        // The entry without an abstract never reaches the analyzer
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_progresses() {
        let analyzer = EchoAnalyzer {
            calls: AtomicUsize::new(0),
        };
        let outcomes = analyze_entries(&analyzer, &[entry("a", Some("x"))], 0).await;
        assert_eq!(outcomes.len(), 1);
    }
}

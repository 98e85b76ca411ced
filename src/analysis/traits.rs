// Paper analyzer trait: the swap point for the language-model backend.
//
// The pipeline only depends on this trait, so tests can drive it with a
// canned analyzer and a different provider only needs a new impl.

use async_trait::async_trait;

use super::error::AnalysisError;
use super::paper::PaperInfo;

/// Extracts structured metadata from an abstract.
#[async_trait]
pub trait PaperAnalyzer: Send + Sync {
    async fn analyze(&self, abstract_text: &str) -> Result<PaperInfo, AnalysisError>;
}

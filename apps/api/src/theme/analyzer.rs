//! External palette analysis behind a capability trait.
//!
//! The engine is fully functional without this. Analysis is an optional
//! refinement: failures of any kind degrade to local harmonization, and
//! accepted candidates are still validated and corrected before adoption.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::theme::categorize::ColorPools;
use crate::theme::color::Color;
use crate::theme::prompts::build_palette_prompt;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// No candidate was produced at all (network failure, rate limits,
    /// timeout). The pipeline falls back to local harmonization.
    #[error("external analysis unavailable: {0}")]
    Unavailable(String),

    /// The analyzer answered, but the candidate failed validation.
    #[error("external analysis produced an invalid candidate: {0}")]
    Invalid(String),
}

/// Pool snapshot handed to an analyzer.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub text_colors: Vec<Color>,
    pub background_colors: Vec<Color>,
    pub accent_colors: Vec<Color>,
    pub document_hint: String,
}

impl AnalysisRequest {
    pub fn new(pools: &ColorPools, document_hint: &str) -> Self {
        Self {
            text_colors: pools.text.clone(),
            background_colors: pools.background.clone(),
            accent_colors: pools.accent.clone(),
            document_hint: document_hint.to_string(),
        }
    }
}

/// Capability seam for palette analysis. The pipeline takes this as an
/// optional trait object, so tests swap in mocks and deployments without an
/// API key run fully local.
#[async_trait]
pub trait PaletteAnalyzer: Send + Sync {
    /// Returns a raw candidate palette as JSON. Validation happens at the
    /// adoption step, not here.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalyzerError>;
}

/// Production analyzer: one LLM round trip with a hard timeout on top of
/// the client's own retry policy.
pub struct LlmPaletteAnalyzer {
    client: LlmClient,
    timeout: Duration,
}

impl LlmPaletteAnalyzer {
    pub fn new(client: LlmClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl PaletteAnalyzer for LlmPaletteAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalyzerError> {
        let prompt = build_palette_prompt(request);
        debug!(
            "requesting palette analysis for {:?} ({} candidate colors)",
            request.document_hint,
            request.text_colors.len()
                + request.background_colors.len()
                + request.accent_colors.len()
        );

        let call = self.client.call_json::<Value>(&prompt, JSON_ONLY_SYSTEM);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(candidate)) => Ok(candidate),
            Ok(Err(e)) => Err(AnalyzerError::Unavailable(e.to_string())),
            Err(_) => Err(AnalyzerError::Unavailable(format!(
                "timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_snapshots_pools_by_category() {
        let pools = ColorPools::from_scanned(vec![
            Color::parse("#000000").unwrap(),
            Color::parse("#dc3545").unwrap(),
            Color::parse("#ffffff").unwrap(),
        ]);
        let request = AnalysisRequest::new(&pools, "flyer");
        assert_eq!(request.text_colors, pools.text);
        assert_eq!(request.background_colors, pools.background);
        assert_eq!(request.accent_colors, pools.accent);
        assert_eq!(request.document_hint, "flyer");
    }

    #[test]
    fn test_error_messages_name_the_failure() {
        let unavailable = AnalyzerError::Unavailable("timed out after 8000ms".into());
        assert!(unavailable.to_string().contains("unavailable"));
        let invalid = AnalyzerError::Invalid("missing role \"info\"".into());
        assert!(invalid.to_string().contains("invalid candidate"));
    }
}

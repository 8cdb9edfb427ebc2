//! Analysis Provider — pluggable source of the free-text CV analysis.
//!
//! `AppState` holds an `Arc<dyn AnalysisProvider>`. Production uses
//! `GeminiAnalysisProvider`; tests swap in canned providers.

use async_trait::async_trait;
use tracing::warn;

use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::gemini_client::GeminiClient;

/// Substituted when the model returns no candidate text.
pub const NO_ANALYSIS_CONTENT: &str = "No analysis content available.";

#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Returns the model's free-text analysis of `cv_text` against `job_description`.
    async fn analyze(&self, cv_text: &str, job_description: &str) -> Result<String, AppError>;
}

pub struct GeminiAnalysisProvider(pub GeminiClient);

#[async_trait]
impl AnalysisProvider for GeminiAnalysisProvider {
    async fn analyze(&self, cv_text: &str, job_description: &str) -> Result<String, AppError> {
        let prompt = build_analysis_prompt(cv_text, job_description);
        let response = self.0.generate(&prompt).await?;

        match response.text() {
            Some(text) => Ok(text.to_string()),
            None => {
                warn!("Gemini returned no candidate text");
                Ok(NO_ANALYSIS_CONTENT.to_string())
            }
        }
    }
}

//! CV analysis pipeline.
//!
//! Flow: extract PDF text → provider (Gemini) → parse free text → response.
//! Stateless; every call is independent.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::parser::{parse_analysis, AnalysisRecord};
use crate::analysis::provider::AnalysisProvider;
use crate::errors::AppError;
use crate::extraction::extract_text_blocking;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisRecord,
    pub cv_text: String,
    pub job_description: String,
}

pub async fn analyze_cv(
    pdf: Bytes,
    job_description: String,
    provider: &dyn AnalysisProvider,
) -> Result<AnalyzeResponse, AppError> {
    let pdf_len = pdf.len();
    let cv_text = extract_text_blocking(pdf).await?;
    info!(
        "Extracted {} chars of CV text from {} byte PDF",
        cv_text.len(),
        pdf_len
    );

    let analysis_text = provider.analyze(&cv_text, &job_description).await?;
    let analysis = parse_analysis(&analysis_text);
    debug!(
        "Parsed analysis: overall_match={}, missing_keywords={}, improvements={}, alternative_roles={}",
        analysis.overall_match,
        analysis.missing_keywords.len(),
        analysis.improvements.len(),
        analysis.alternative_roles.len()
    );

    Ok(AnalyzeResponse {
        analysis,
        cv_text,
        job_description,
    })
}

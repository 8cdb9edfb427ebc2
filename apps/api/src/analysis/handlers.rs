//! Axum route handlers for CV analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use tracing::{debug, info};

use crate::analysis::analyzer::{analyze_cv, AnalyzeResponse};
use crate::errors::AppError;
use crate::state::AppState;

const CV_FIELD: &str = "cv";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// POST /analyze_cv
///
/// Multipart form: `cv` (PDF file) and `job_description` (text).
/// Returns the parsed analysis together with the extracted CV text and the echoed JD.
pub async fn handle_analyze_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut cv: Option<Bytes> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(CV_FIELD) => cv = Some(field.bytes().await?),
            Some(JOB_DESCRIPTION_FIELD) => job_description = Some(field.text().await?),
            other => debug!("Ignoring unexpected multipart field {:?}", other),
        }
    }

    let cv = cv.ok_or_else(|| AppError::Validation(format!("Missing '{CV_FIELD}' file field")))?;
    let job_description = job_description.ok_or_else(|| {
        AppError::Validation(format!("Missing '{JOB_DESCRIPTION_FIELD}' field"))
    })?;

    info!(
        "Analyzing CV ({} bytes) against job description ({} chars)",
        cv.len(),
        job_description.len()
    );

    let response = analyze_cv(cv, job_description, state.provider.as_ref()).await?;
    Ok(Json(response))
}

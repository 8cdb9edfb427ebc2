//! Text Extractor — pulls plain text out of an uploaded PDF résumé.
//!
//! Page parsing is delegated to `pdf-extract`. Pages are joined in document order
//! with a newline and the result is trimmed. Failures are not recovered here.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF could not be parsed: {0}")]
    Pdf(String),

    /// The blocking extraction task died, usually a panic inside the PDF library.
    #[error("PDF extraction aborted: {0}")]
    Aborted(String),
}

/// Extracts the text of every page, joined with `\n`, trimmed.
pub fn extract_text(pdf: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    debug!("Extracted {} page(s) from {} byte PDF", pages.len(), pdf.len());

    Ok(join_pages(&pages))
}

/// Runs `extract_text` on the blocking pool so large documents don't stall the
/// async workers. A panic in the PDF library is reported as `Aborted`.
pub async fn extract_text_blocking(pdf: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&pdf))
        .await
        .map_err(|e| ExtractionError::Aborted(e.to_string()))?
}

fn join_pages(pages: &[String]) -> String {
    pages.join("\n").trim().to_string()
}

// CV analysis: PDF text + job description → Gemini → parsed AnalysisRecord.
// All model calls go through gemini_client via the AnalysisProvider seam.

pub mod analyzer;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod provider;

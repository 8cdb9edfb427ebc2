use anyhow::{Context, Result};

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// Application configuration loaded from environment variables.
/// Fails at startup if a numeric variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Not validated locally. A bad or missing key shows up as an upstream error.
    pub gemini_api_key: String,
    pub gemini_api_url: String,
    pub gemini_timeout_secs: u64,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", 120)
                .context("GEMINI_TIMEOUT_SECS must be a whole number of seconds")?,
            port: parse_env("PORT", 5000).context("PORT must be a valid port number")?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for environment variable '{key}'")),
        Err(_) => Ok(default),
    }
}

/// Gemini Client — the single point of entry for calls to the Gemini
/// `generateContent` endpoint.
///
/// One POST per call. No retries: a failed call is reported to the caller as-is.
/// The API key travels as the `key` query parameter and is never logged.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum GeminiError {
    /// Transport failure, timeout, or an undecodable success body.
    /// Never carries the request URL, which contains the API key.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Non-success status. `details` is the upstream body, as JSON when it parses.
    #[error("API error (status {status}): {details}")]
    Api { status: u16, details: Value },
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::Http(err.without_url())
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn single_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, if the model produced one.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_url: String, api_key: String, timeout: Duration) -> Result<Self, GeminiError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            api_key,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Sends `prompt` as the sole message content and returns the decoded response.
    pub async fn generate(&self, prompt: &str) -> Result<GenerateContentResponse, GeminiError> {
        let request_body = GenerateContentRequest::single_prompt(prompt);

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {}: {}", status, body);
            let details = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
            return Err(GeminiError::Api {
                status: status.as_u16(),
                details,
            });
        }

        let gemini_response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(gemini_response)
    }
}


#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::{extract::Query, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    use super::*;

    fn client_for(base_url: &str, timeout: Duration) -> GeminiClient {
        GeminiClient::new(
            format!("{base_url}/generate"),
            "test-key".to_string(),
            timeout,
        )
        .unwrap()
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GenerateContentRequest::single_prompt("hello")).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "hello"}]}]}));
    }

    #[test]
    fn test_response_text_first_candidate_first_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}], "role": "model"}},
                {"content": {"parts": [{"text": "other"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }))
        .unwrap();
        assert_eq!(response.text(), Some("first"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 10);
    }

    #[test]
    fn test_response_text_absent_or_empty_candidates() {
        let absent: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.text(), None);

        let empty: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(empty.text(), None);

        let null: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": null})).unwrap();
        assert_eq!(null.text(), None);
    }

    #[test]
    fn test_response_text_candidate_without_content() {
        // Safety-blocked candidates come back with a finishReason and no content.
        let blocked: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert_eq!(blocked.text(), None);
    }

    #[tokio::test]
    async fn test_generate_sends_key_and_prompt() {
        let router = Router::new().route(
            "/generate",
            post(
                |Query(query): Query<HashMap<String, String>>, Json(body): Json<Value>| async move {
                    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or("");
                    if query.get("key").map(String::as_str) != Some("test-key") {
                        return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad key"})));
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "candidates": [{"content": {"parts": [{"text": format!("echo: {prompt}")}]}}]
                        })),
                    )
                },
            ),
        );
        let base_url = stub::spawn(router).await;
        let client = client_for(&base_url, Duration::from_secs(5));

        let response = client.generate("rate this CV").await.unwrap();
        assert_eq!(response.text(), Some("echo: rate this CV"));
    }

    #[tokio::test]
    async fn test_generate_non_success_carries_status_and_json_details() {
        let router = Router::new().route(
            "/generate",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": {"code": 400, "message": "API key not valid."}})),
                )
            }),
        );
        let base_url = stub::spawn(router).await;
        let client = client_for(&base_url, Duration::from_secs(5));

        match client.generate("prompt").await {
            Err(GeminiError::Api { status, details }) => {
                assert_eq!(status, 400);
                assert_eq!(details["error"]["message"], "API key not valid.");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_non_json_error_body_kept_as_string() {
        let router = Router::new().route(
            "/generate",
            post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "overloaded") }),
        );
        let base_url = stub::spawn(router).await;
        let client = client_for(&base_url, Duration::from_secs(5));

        match client.generate("prompt").await {
            Err(GeminiError::Api { status, details }) => {
                assert_eq!(status, 503);
                assert_eq!(details, Value::String("overloaded".to_string()));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let router = Router::new().route(
            "/generate",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({}))
            }),
        );
        let base_url = stub::spawn(router).await;
        let client = client_for(&base_url, Duration::from_millis(100));

        match client.generate("prompt").await {
            Err(GeminiError::Http(e)) => assert!(e.is_timeout()),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_error_does_not_expose_api_key() {
        // Nothing listens on port 1.
        let client = GeminiClient::new(
            "http://127.0.0.1:1/generate".to_string(),
            "SECRET-KEY-123".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();

        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, GeminiError::Http(_)));
        assert!(!err.to_string().contains("SECRET-KEY-123"));
        assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
    }
}

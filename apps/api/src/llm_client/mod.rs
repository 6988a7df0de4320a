/// LLM Client — the single point of entry for text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// The pipeline depends only on the `TextGenerator` trait, so tests substitute a stub.
///
/// Failures are never retried: a non-2xx response is returned as `LlmError::Api`
/// with the raw response body, and the caller surfaces it verbatim.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Default API root for the Gemini `generateContent` endpoint.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default model used for resume generation.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// The upstream text-generation collaborator: prompt in, generated text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

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

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Connection settings, supplied explicitly from `Config`.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub timeout: Duration,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(settings: &GeminiSettings) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                settings.api_base.trim_end_matches('/'),
                settings.model
            ),
            api_key: settings.api_key.clone(),
        })
    }

    #[cfg(test)]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Makes a single call and returns the full response object.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "Gemini call succeeded"
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, Json, Router};
    use serde_json::{json, Value};

    /// Serves `app` on an ephemeral local port and returns its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1beta")
    }

    fn settings(api_base: String) -> GeminiSettings {
        GeminiSettings {
            api_key: "test-key".to_string(),
            api_base,
            model: "gemini-test".to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint_format() {
        let client = GeminiClient::new(&settings(format!("{DEFAULT_API_BASE}/"))).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let body = json!({
            "candidates": [{"content": {"parts": [{"text": "NAME\nJane Doe"}], "role": "model"}}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 30}
        });
        let parsed: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.text(), Some("NAME\nJane Doe"));
        assert_eq!(parsed.usage_metadata.unwrap().candidates_token_count, 30);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(parsed.text().is_none());
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_key() {
        // Echoes back the prompt and API key so the request shape is observable.
        let app = Router::new().fallback(
            |uri: axum::http::Uri, Json(body): Json<Value>| async move {
                let prompt = body["contents"][0]["parts"][0]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                let key = uri.query().unwrap_or_default().to_string();
                Json(json!({
                    "candidates": [{"content": {"parts": [{"text": format!("{key}|{prompt}")}]}}]
                }))
            },
        );
        let base = spawn_upstream(app).await;
        let client = GeminiClient::new(&settings(base)).unwrap();

        let text = client.generate("Summary: Jane").await.unwrap();
        assert_eq!(text, "key=test-key|Summary: Jane");
    }

    #[tokio::test]
    async fn test_non_success_status_returns_raw_body() {
        let app = Router::new()
            .fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "internal error") });
        let base = spawn_upstream(app).await;
        let client = GeminiClient::new(&settings(base)).unwrap();

        match client.generate("prompt").await {
            Err(LlmError::Api { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "internal error");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_empty_content() {
        let app = Router::new().fallback(|| async { Json(json!({"candidates": []})) });
        let base = spawn_upstream(app).await;
        let client = GeminiClient::new(&settings(base)).unwrap();

        assert!(matches!(
            client.generate("prompt").await,
            Err(LlmError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_http_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = GeminiClient::new(&settings(format!("http://{addr}"))).unwrap();
        assert!(matches!(
            client.generate("prompt").await,
            Err(LlmError::Http(_))
        ));
    }
}

//! Hosted Gemini backend.
//!
//! Talks to the Google generative-language `generateContent` endpoint.
//! Any deployment exposing the same surface (regional endpoints, proxies)
//! works by overriding the base URL.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::*;

/// Default hosted API base.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini `generateContent` backend.
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    request_timeout: Option<std::time::Duration>,
}

impl GeminiBackend {
    /// Create a backend against a custom base URL.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, AssistantError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| AssistantError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            request_timeout: None,
        })
    }

    /// Create a backend for the hosted API.
    pub fn hosted(model: &str, api_key: impl Into<String>) -> Result<Self, AssistantError> {
        Self::new(DEFAULT_BASE_URL, model, Some(api_key.into()))
    }

    /// Set a per-request timeout.
    pub fn with_request_timeout(mut self, timeout_ms: u64) -> Self {
        self.request_timeout = Some(std::time::Duration::from_millis(timeout_ms));
        self
    }

    /// Build the generateContent URL.
    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Attach the API key header and timeout when configured.
    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let request = match &self.api_key {
            Some(key) => request.header("x-goog-api-key", key),
            None => request,
        };
        match self.request_timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }
}

/// generateContent request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// generateContent response body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[async_trait]
impl AssistantBackend for GeminiBackend {
    fn id(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/models/{}", self.base_url, self.model);
        self.with_key(self.client.get(&url))
            .send()
            .await
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AssistantError> {
        let generation_config = if request.max_tokens.is_some() || request.temperature.is_some() {
            Some(GenerationConfig {
                max_output_tokens: request.max_tokens,
                temperature: request.temperature,
            })
        } else {
            None
        };

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt,
                }],
            }],
            generation_config,
        };

        debug!(model = %self.model, "Issuing generateContent request");

        let response = self
            .with_key(self.client.post(self.generate_url()))
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(AssistantError::RateLimited { retry_after_ms: None });
            }

            return Err(AssistantError::RequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::ParseError(e.to_string()))?;

        // No candidates is a valid empty response; the caller substitutes
        // its placeholder.
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let usage = parsed
            .usage_metadata
            .map(|u| Usage {
                prompt_tokens: u.prompt_token_count,
                completion_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(GenerateResponse { text, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosted_creation() {
        let backend = GeminiBackend::hosted("gemini-3-flash-preview", "test-key").unwrap();
        assert_eq!(backend.id(), "gemini-3-flash-preview");
        assert_eq!(
            backend.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn test_custom_base_url() {
        let backend = GeminiBackend::new("http://localhost:9090/v1beta", "gemini-test", None).unwrap();
        assert_eq!(
            backend.generate_url(),
            "http://localhost:9090/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_response_parsing_concatenates_parts() {
        let json = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "Grace is " }, { "text": "unmerited favor." } ] } }
            ],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 7 }
        }"#;

        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "Grace is unmerited favor.");
        assert_eq!(parsed.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_empty_candidates_parse() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}

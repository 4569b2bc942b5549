//! Core trait for assistant backends.
//!
//! This module defines the `AssistantBackend` trait - the primary
//! abstraction over generative-language services.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Error types for assistant operations.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Backend is not available
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// Request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Rate limited by the backend
    #[error("Rate limited, retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Parsing error
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Core trait for assistant backends.
///
/// The conversation engine issues exactly one `generate` call per sent
/// message; failure handling, display delay, and citations live above
/// this seam.
#[async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Get the backend identifier (e.g., model name).
    fn id(&self) -> &str;

    /// Check if the backend is currently reachable.
    async fn is_available(&self) -> bool;

    /// Generate a response for a single composed prompt.
    ///
    /// An empty `text` in the response is valid; the caller substitutes a
    /// placeholder.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AssistantError>;
}

/// A single-prompt generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct GenerateRequest {
    /// The composed prompt (persona + context + user text)
    pub prompt: String,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
    /// Temperature (0.0-2.0)
    pub temperature: Option<f32>,
}

impl GenerateRequest {
    /// Create a request from a composed prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set max tokens.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Set temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp.clamp(0.0, 2.0));
        self
    }
}

/// Response from a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct GenerateResponse {
    /// Generated text (may be empty)
    pub text: String,
    /// Token usage
    pub usage: Usage,
}

/// Token usage information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct Usage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens in the response
    pub completion_tokens: u32,
}

impl Usage {
    /// Get total tokens.
    pub fn total(&self) -> u32 {
        self.prompt_tokens + self.completion_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerateRequest::new("What is grace?")
            .with_max_tokens(512)
            .with_temperature(0.7);

        assert_eq!(request.prompt, "What is grace?");
        assert_eq!(request.max_tokens, Some(512));
        assert_eq!(request.temperature, Some(0.7));
    }

    #[test]
    fn test_temperature_clamped() {
        let request = GenerateRequest::new("hi").with_temperature(5.0);
        assert_eq!(request.temperature, Some(2.0));
    }

    #[test]
    fn test_usage_total() {
        let usage = Usage {
            prompt_tokens: 40,
            completion_tokens: 120,
        };
        assert_eq!(usage.total(), 160);
    }
}

//! Mock assistant backend for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use super::traits::*;

/// Mock backend for testing.
///
/// Configurable response text, availability, forced failures, and
/// artificial latency for exercising overlap behavior.
pub struct MockBackend {
    model_id: String,
    available: AtomicBool,
    response_text: String,
    fail_with: Option<String>,
    latency: Option<Duration>,
    call_count: AtomicU32,
}

impl MockBackend {
    /// Create a new mock backend.
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            available: AtomicBool::new(true),
            response_text: "Mock response".to_string(),
            fail_with: None,
            latency: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Set the response text.
    pub fn with_response(mut self, text: impl Into<String>) -> Self {
        self.response_text = text.into();
        self
    }

    /// Set availability.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Make every generate call fail with the given reason.
    pub fn with_error(mut self, reason: impl Into<String>) -> Self {
        self.fail_with = Some(reason.into());
        self
    }

    /// Add artificial latency before responding.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Get the number of times generate was called.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new("mock-model")
    }
}

#[async_trait]
impl AssistantBackend for MockBackend {
    fn id(&self) -> &str {
        &self.model_id
    }

    async fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, AssistantError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if !self.available.load(Ordering::SeqCst) {
            return Err(AssistantError::Unavailable("Mock backend disabled".to_string()));
        }

        if let Some(reason) = &self.fail_with {
            return Err(AssistantError::RequestFailed(reason.clone()));
        }

        // Estimate token counts
        let prompt_tokens = request.prompt.len() as u32 / 4;
        let completion_tokens = self.response_text.len() as u32 / 4;

        Ok(GenerateResponse {
            text: self.response_text.clone(),
            usage: Usage {
                prompt_tokens,
                completion_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_backend() {
        let backend = MockBackend::new("test-model").with_response("Peace be with you.");

        assert!(backend.is_available().await);
        assert_eq!(backend.call_count(), 0);

        let response = backend
            .generate(GenerateRequest::new("Hello"))
            .await
            .unwrap();

        assert_eq!(response.text, "Peace be with you.");
        assert_eq!(backend.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_unavailable() {
        let backend = MockBackend::default().with_available(false);

        assert!(!backend.is_available().await);

        let result = backend.generate(GenerateRequest::new("Hello")).await;
        assert!(matches!(result, Err(AssistantError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_mock_forced_error() {
        let backend = MockBackend::default().with_error("boom");

        let result = backend.generate(GenerateRequest::new("Hello")).await;
        assert!(matches!(result, Err(AssistantError::RequestFailed(r)) if r == "boom"));
        assert_eq!(backend.call_count(), 1);
    }
}

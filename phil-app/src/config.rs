//! Configuration for the Phil application shell.

use serde::{Deserialize, Serialize};

use phil_assistant::backend::{AssistantError, GeminiBackend};
use phil_catalog::prompt::DEFAULT_PERSONA;

/// Configuration for a Phil session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Assistant backend configuration
    pub assistant: AssistantConfig,
    /// Conversation engine configuration
    pub conversation: ConversationConfig,
    /// Layout configuration
    pub layout: LayoutConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            assistant: AssistantConfig::default(),
            conversation: ConversationConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load config from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Assistant backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Base URL of the hosted API
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// API key (usually injected from the environment)
    pub api_key: Option<String>,
    /// Per-request timeout (ms)
    pub request_timeout_ms: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            request_timeout_ms: 30_000,
        }
    }
}

impl AssistantConfig {
    /// Build a Gemini backend from this configuration.
    pub fn build_backend(&self) -> Result<GeminiBackend, AssistantError> {
        Ok(
            GeminiBackend::new(&self.base_url, &self.model, self.api_key.clone())?
                .with_request_timeout(self.request_timeout_ms),
        )
    }
}

/// Conversation engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Cosmetic delay before an assistant reply appears (ms)
    pub display_delay_ms: u64,
    /// Persona line prepended to every prompt
    pub persona: String,
    /// Reply shown when the backend returns empty text
    pub fallback_reply: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            display_delay_ms: 1_000,
            persona: DEFAULT_PERSONA.to_string(),
            fallback_reply: "I'm reflecting on that.".to_string(),
        }
    }
}

/// Layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Viewport width below which the overlay layout is used (px)
    pub narrow_threshold_px: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            narrow_threshold_px: crate::layout::NARROW_THRESHOLD_PX,
        }
    }
}

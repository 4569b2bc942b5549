//! Prompt composition for the assistant backend.
//!
//! Every outbound request carries a single composed text prompt: the Phil
//! persona line, the active conversation context, and the user's message.

use serde::{Deserialize, Serialize};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// The default Phil persona line.
pub const DEFAULT_PERSONA: &str = "You are Phil, a friendly and wise theological assistant.";

/// The context scoping the next outbound request.
///
/// A group takes precedence over a church; with neither selected the
/// conversation falls back to general context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContextDescriptor {
    /// No church or group selected
    General,
    /// A church is the active context
    Church { name: String },
    /// A small group is the active context
    Group { name: String },
}

impl ContextDescriptor {
    /// Render the descriptor the way it appears inside the prompt.
    pub fn describe(&self) -> String {
        match self {
            Self::General => "general theological context".to_string(),
            Self::Church { name } => format!("Church: {}", name),
            Self::Group { name } => format!("Small Group: {}", name),
        }
    }
}

impl Default for ContextDescriptor {
    fn default() -> Self {
        Self::General
    }
}

/// Assembles the composed prompt for a single assistant request.
pub struct PromptComposer;

impl PromptComposer {
    /// Build the full prompt from persona, context, and user text.
    pub fn compose(persona: &str, context: &ContextDescriptor, user_text: &str) -> String {
        format!(
            "{} Context: {}. User: {}. Provide a thoughtful, faith-based response. \
             Ground it in scripture. Tonality: peaceful, encouraging.",
            persona,
            context.describe(),
            user_text
        )
    }
}

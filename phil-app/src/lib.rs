//! Application shell and session state for Phil.
//!
//! Phil is a chat-style front end for a faith-community assistant: users
//! follow churches and join small groups, then converse with an assistant
//! whose responses are scoped to the selected church or group.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 PhilApp                     │
//! │  (owns all session state, receives intents) │
//! └──────┬──────────┬──────────┬────────────────┘
//!        │          │          │
//!        ▼          ▼          ▼
//! ┌───────────┐ ┌──────────┐ ┌──────────────────┐
//! │ Selection │ │ Layout / │ │ Conversation     │
//! │ Store     │ │ Discover │ │ Engine ──► LLM   │
//! └───────────┘ └──────────┘ └──────────────────┘
//! ```
//!
//! State flows top-down: child views receive read-only derived data and
//! emit intents through `PhilApp` methods. Nothing here persists; the
//! whole session lives in process memory.

pub mod app;
pub mod config;
pub mod conversation;
pub mod discover;
pub mod layout;
pub mod onboarding;
pub mod selection;

// Re-export main types
pub use app::PhilApp;
pub use config::{AppConfig, AssistantConfig, ConversationConfig, LayoutConfig};
pub use conversation::{
    ConversationEngine, FailureNotice, Message, MessageRole, SendError, SendTicket,
};
pub use discover::{DiscoverTab, DiscoverView, JoinAction};
pub use layout::{LayoutState, ViewMode, NARROW_THRESHOLD_PX};
pub use onboarding::{GroupFilter, OnboardingError, OnboardingFlow, OnboardingOutcome, OnboardingStep};
pub use selection::SelectionStore;

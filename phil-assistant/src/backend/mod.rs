//! Backend abstraction layer.
//!
//! Provides a trait-based interface over generative-language services:
//! - Hosted Gemini (`generateContent`)
//! - Mock backend for testing

pub mod gemini;
pub mod mock;
pub mod traits;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;
pub use traits::{AssistantBackend, AssistantError, GenerateRequest, GenerateResponse, Usage};

//! Assistant backends for Phil.
//!
//! The conversation engine treats the hosted generative-language service
//! as an opaque capability: a composed text prompt in, response text (or
//! a failure) out. This crate provides:
//!
//! - [`AssistantBackend`]: the trait abstracting over inference services
//! - [`GeminiBackend`]: the hosted Google generative-language API
//! - [`MockBackend`]: configurable backend for tests

pub mod backend;

// Re-export main types for convenience
pub use backend::gemini::GeminiBackend;
pub use backend::mock::MockBackend;
pub use backend::traits::{
    AssistantBackend, AssistantError, GenerateRequest, GenerateResponse, Usage,
};

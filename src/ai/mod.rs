//! AI service integration for text and multimodal generation
//!
//! Provides the interface to Gemini's generateContent endpoint used by
//! both the chat and the text+image front-ends.

pub mod gemini;
pub mod mime;
pub mod mock;

pub use gemini::GeminiGenerateClient;
pub use mock::MockGenerationClient;

use crate::models::GenerationRequest;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Dispatch one generation request and return the rendered answer
    /// text. A response without usable candidates renders as an empty
    /// string rather than an error.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

//! Data models and structures
//!
//! Defines the core data structures for chat sessions, generation
//! requests, and environment configuration.

use crate::attachment::ImageAttachment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// One entry in a chat session transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// Append-only, in-memory conversation history for one session.
///
/// Messages are never removed or reordered, so a reply can only ever
/// appear after the submission it answers.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }
}

/// One outbound generation call: a prompt plus zero or more inline images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub attachments: Vec<ImageAttachment>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(
        prompt: impl Into<String>,
        attachments: Vec<ImageAttachment>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            attachments,
        }
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// The prompt must be non-empty after trimming. Checked before any
    /// network activity so an empty submission never becomes a request.
    pub fn validate(&self) -> crate::Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(crate::Error::Validation(
                "Prompt must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub chat_model: String,
    pub vision_model: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .map_err(|_| crate::Error::Config("GEMINI_API_KEY not set".to_string()))?,
            chat_model: std::env::var("GEMINI_CHAT_MODEL")
                .unwrap_or_else(|_| "gemini-pro".to_string()),
            vision_model: std::env::var("GEMINI_VISION_MODEL")
                .unwrap_or_else(|_| "gemini-pro-vision".to_string()),
        })
    }
}

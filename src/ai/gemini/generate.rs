use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, InlineData, Part};
use crate::ai::GenerationService;
use crate::models::GenerationRequest;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// Gemini `generateContent` client for text and text+image prompts.
///
/// The same client serves both modes; the caller picks the model (a text
/// model for chat, a vision model for image prompts).
pub struct GeminiGenerateClient {
    http: GeminiHttpClient,
}

impl GeminiGenerateClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, REQUEST_TIMEOUT, client),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    /// One content entry per request: the prompt text first, then the
    /// attachments in submission order.
    fn build_request(request: &GenerationRequest) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(1 + request.attachments.len());
        parts.push(Part::Text {
            text: request.prompt.clone(),
        });
        for attachment in &request.attachments {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: attachment.mime_type.clone(),
                    data: attachment.data.clone(),
                },
            });
        }

        GenerateContentRequest {
            contents: vec![Content { role: None, parts }],
        }
    }
}

#[async_trait]
impl GenerationService for GeminiGenerateClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        request.validate()?;

        tracing::debug!(
            "Dispatching generateContent to model {} ({} attachment(s))",
            self.http.model(),
            request.attachments.len()
        );

        let response: GenerateContentResponse = self
            .http
            .generate_content(&Self::build_request(request))
            .await?;

        Ok(response.primary_text().unwrap_or_default())
    }
}

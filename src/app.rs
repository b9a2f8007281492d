//! Session orchestration for the chat and text+image modes.
//!
//! `App` owns all per-session state: the transcript and the two mode
//! clients. Nothing is global, and submissions take `&mut self`, so a
//! second request cannot start while one is outstanding.

use crate::ai::{GeminiGenerateClient, GenerationService};
use crate::attachment::ImageAttachment;
use crate::models::{ChatMessage, Config, GenerationRequest, Transcript};
use crate::{Error, Result};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{error, info};

const CHAT_BANNER: &str = "Gemini chat. Type a prompt and press Enter; /quit or Ctrl-D exits.\n\n";
const THINKING_MARKER: &str = "...\n";

/// One interactive session: two mode clients plus the transcript.
pub struct App {
    chat: Box<dyn GenerationService>,
    vision: Box<dyn GenerationService>,
    transcript: Transcript,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub chat: Box<dyn GenerationService>,
    pub vision: Box<dyn GenerationService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: AppServices) -> Self {
        Self {
            chat: services.chat,
            vision: services.vision,
            transcript: Transcript::new(),
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;

        info!("Chat model: {}", config.chat_model);
        info!("Vision model: {}", config.vision_model);

        // Reuse one HTTP connection pool across both mode clients.
        let http_client = reqwest::Client::new();

        let chat = Box::new(GeminiGenerateClient::new_with_client(
            config.gemini_api_key.clone(),
            config.chat_model,
            http_client.clone(),
        )) as Box<dyn GenerationService>;

        let vision = Box::new(GeminiGenerateClient::new_with_client(
            config.gemini_api_key,
            config.vision_model,
            http_client,
        )) as Box<dyn GenerationService>;

        Ok(Self::with_services(AppServices { chat, vision }))
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Submit one chat prompt.
    ///
    /// Empty input is rejected before any network activity. The user
    /// message is appended before dispatch and stays in the transcript on
    /// failure; the reply is appended only once its own request resolves.
    pub async fn submit_chat(&mut self, input: &str) -> Result<String> {
        let request = GenerationRequest::text(input.trim());
        request.validate()?;

        self.transcript.push(ChatMessage::user(request.prompt.clone()));

        let reply = self.chat.generate(&request).await?;
        self.transcript.push(ChatMessage::system(reply.clone()));

        Ok(reply)
    }

    /// Submit one text+image prompt. Requires a non-empty prompt and at
    /// least one attachment; does not touch the chat transcript.
    pub async fn submit_ask(
        &self,
        prompt: &str,
        attachments: Vec<ImageAttachment>,
    ) -> Result<String> {
        if attachments.is_empty() {
            return Err(Error::Validation(
                "At least one image attachment is required".to_string(),
            ));
        }

        let request = GenerationRequest::with_attachments(prompt.trim(), attachments);
        request.validate()?;

        self.vision.generate(&request).await
    }

    /// Interactive chat loop over any async line source.
    ///
    /// Blank lines are skipped without a submission; a failed request is
    /// reported and the loop keeps accepting input.
    pub async fn run_chat<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        writer.write_all(CHAT_BANNER.as_bytes()).await?;

        let mut lines = reader.lines();
        loop {
            writer.write_all(b"you> ").await?;
            writer.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if input == "/quit" {
                break;
            }

            writer.write_all(THINKING_MARKER.as_bytes()).await?;
            writer.flush().await?;

            match self.submit_chat(input).await {
                Ok(reply) => {
                    writer
                        .write_all(format!("gemini> {}\n\n", reply).as_bytes())
                        .await?;
                }
                Err(e) => {
                    error!("Chat request failed: {}", e);
                    writer
                        .write_all(format!("request failed: {}\n\n", e).as_bytes())
                        .await?;
                }
            }
        }

        writer.flush().await?;
        Ok(())
    }

    /// One-shot text+image mode: encode the named files, submit, print
    /// the answer.
    pub async fn run_ask<W>(
        &self,
        prompt: &str,
        image_paths: &[PathBuf],
        mut writer: W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let attachments = ImageAttachment::load_all(image_paths).await?;
        info!("Encoded {} image attachment(s)", attachments.len());

        let answer = self.submit_ask(prompt, attachments).await?;

        writer.write_all(answer.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}

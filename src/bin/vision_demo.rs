//! Minimal one-shot text+image demo.
//!
//! The plain counterpart to the `ask` subcommand: positional prompt and
//! image paths, one request, the answer on stdout.

use anyhow::Result as AnyResult;
use clap::Parser;
use gemini_console::ai::{GeminiGenerateClient, GenerationService};
use gemini_console::attachment::ImageAttachment;
use gemini_console::models::{Config, GenerationRequest};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "vision-demo")]
#[command(about = "Send one prompt plus images to Gemini and print the answer")]
struct CliArgs {
    /// Prompt text.
    prompt: String,

    /// PNG or JPEG files to attach.
    #[arg(value_name = "IMAGE", required = true)]
    images: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let config = Config::from_env()?;

    let client = GeminiGenerateClient::new(config.gemini_api_key, config.vision_model);
    let attachments = ImageAttachment::load_all(&args.images).await?;

    let request = GenerationRequest::with_attachments(args.prompt, attachments);
    let answer = client.generate(&request).await?;

    println!("{}", answer);
    Ok(())
}

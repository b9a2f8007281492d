use anyhow::Result;
use clap::{Parser, Subcommand};
use gemini_console::app::App;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-console")]
#[command(about = "Chat with Gemini from the terminal, with or without images")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive text-only chat session.
    Chat,
    /// Send one prompt with image attachments and print the answer.
    Ask {
        /// Prompt text to send alongside the images.
        #[arg(short, long)]
        prompt: String,

        /// PNG or JPEG file to attach; repeat for multiple images.
        #[arg(short, long = "image", value_name = "PATH", required = true)]
        images: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_console=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Command::Chat => {
            info!("Starting interactive chat session");
            app.run_chat(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await
        }
        Command::Ask { prompt, images } => {
            app.run_ask(&prompt, &images, tokio::io::stdout()).await
        }
    };

    match result {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("Session failed: {}", e);
            std::process::exit(1);
        }
    }
}

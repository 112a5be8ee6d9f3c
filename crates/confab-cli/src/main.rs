//! Confab — your personal local AI chatbot.
//!
//! Usage:
//!     confab              # interactive chat session (default)
//!     confab chat         # same, explicitly
//!     confab config       # write API credentials to a .env file
//!     confab serve        # start the minimal web front-end
//!
//! Environment variables (a `.env` file in the working directory is loaded
//! first):
//!     API_KEY        API key for the chat endpoint (required)
//!     API_BASE_URL   endpoint base, e.g. https://api.openai.com/v1 (required)
//!     MODEL_NAME     model to use (default: gpt-3.5-turbo)
//!     SYSTEM_PROMPT  optional system message seeding every session

mod chat;
mod console;
mod server;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "confab")]
#[command(about = "Confab — your personal local AI chatbot")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat,
    /// Configure API credentials (writes a .env file)
    Config,
    /// Serve the web front-end
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long, env = "CONFAB_PORT", default_value_t = 5000)]
        port: u16,
        /// Do not open a browser tab after startup
        #[arg(long)]
        no_browser: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat::run().await,
        Commands::Config => settings::configure(),
        Commands::Serve { port, no_browser } => server::run(port, !no_browser).await,
    }
}

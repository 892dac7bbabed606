//! chatpdf - Terminal chat client for a PDF question-answering service
//!
#![doc = "Main entry point for the chatpdf client."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatpdf::cli::{Cli, Commands};
use chatpdf::commands;
use chatpdf::config::Config;
use chatpdf::registry::SessionRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // If the user supplied a state file path on the CLI, mirror it into
    // CHATPDF_STATE_FILE so the registry's file store can pick it up.
    // This keeps callers unchanged while allowing `FileStore::new()` to
    // honor an override.
    if let Some(state_file) = &cli.state_file {
        std::env::set_var("CHATPDF_STATE_FILE", state_file);
        tracing::info!("Using state file override from CLI: {}", state_file);
    }

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // The registry is shared by every command that touches local state.
    let registry = SessionRegistry::open()?;

    // Execute command
    match cli.command {
        Commands::Chat { session } => {
            tracing::info!("Starting interactive chat mode");
            if let Some(s) = &session {
                tracing::debug!("Resuming chat: {}", s);
            }

            commands::chat::run_chat(config, registry, session).await?;
            Ok(())
        }
        Commands::Ask { question, session } => {
            tracing::info!("Asking one-shot question");
            commands::ask::run_ask(config, registry, question, session).await?;
            Ok(())
        }
        Commands::Upload { files } => {
            tracing::info!("Uploading {} file(s)", files.len());
            commands::upload::run_upload(config, files).await?;
            Ok(())
        }
        Commands::Chats { command } => {
            commands::chats::handle_chats(registry, command)?;
            Ok(())
        }
        Commands::ClearMemory { session } => {
            tracing::info!("Clearing server-side session memory");
            commands::memory::run_clear_memory(config, registry, session).await?;
            Ok(())
        }
        Commands::ClearVectorstore { yes } => {
            tracing::info!("Clearing vector store");
            commands::memory::run_clear_vectorstore(config, yes).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "chatpdf=debug" } else { "chatpdf=info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

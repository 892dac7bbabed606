//! Command-line interface definition for chatpdf
//!
//! This module defines the CLI structure using clap's derive API,
//! providing commands for interactive chat, one-shot questions, PDF
//! uploads, chat list management, and server-side cleanup.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chatpdf - Terminal chat client for a PDF question-answering service
///
/// Ask questions about ingested PDFs, manage chat sessions, and upload
/// new documents to the backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpdf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the backend server URL from config
    #[arg(long, env = "CHATPDF_SERVER_URL")]
    pub server: Option<String>,

    /// Override the local state file path
    #[arg(long)]
    pub state_file: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for chatpdf
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start interactive chat mode
    Chat {
        /// Resume a specific chat session (full id or 8-char prefix)
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Ask a single question and print the answer
    Ask {
        /// The question to send
        question: String,

        /// Ask within a specific chat session instead of the current one
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Upload one or more PDF files for ingestion
    Upload {
        /// Paths of the PDF files to upload
        files: Vec<PathBuf>,
    },

    /// Manage the local chat list
    Chats {
        /// Chat list subcommand
        #[command(subcommand)]
        command: ChatsCommand,
    },

    /// Clear the server-side memory for the current session
    ClearMemory {
        /// Clear a specific session instead of the current one
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Delete every ingested PDF chunk from the vector store
    ///
    /// This is irreversible and global, so a confirmation prompt is shown
    /// unless `--yes` is passed.
    ClearVectorstore {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Chat list subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ChatsCommand {
    /// List known chats, marking the active one
    List,

    /// Start a new chat and make it current
    New,

    /// Switch to a stored chat (full id or 8-char prefix)
    Switch {
        /// Chat id to switch to
        id: String,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            server: None,
            state_file: None,
            verbose: false,
            command: Commands::Chat { session: None },
        }
    }
}

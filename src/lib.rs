//! chatpdf - Terminal chat client for a PDF question-answering service
//!
//! This library provides the building blocks of the chatpdf client:
//! the HTTP dispatcher for the backend's `/v1` API, the local session
//! and chat registry, the terminal renderer, and the upload handler.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: HTTP dispatcher and wire types for the backend endpoints
//! - `registry`: session id and chat list persistence behind a store seam
//! - `render`: terminal rendering (bubbles, typing indicator, chat list)
//! - `upload`: multipart PDF upload batching and outcome classification
//! - `commands`: CLI command handlers, including the interactive REPL
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use chatpdf::{ApiClient, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let client = ApiClient::new(&config.server)?;
//!     let answer = client.ask("What is chunking?", "some-session").await?;
//!     println!("{}", answer.answer);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod registry;
pub mod render;
pub mod upload;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use error::{ChatPdfError, Result};
pub use registry::{ChatRecord, SessionRegistry};
pub use render::{Renderer, Role};
pub use upload::UploadOutcome;

//! Server-side memory and vector store cleanup handlers

use crate::api::ApiClient;
use crate::commands::{dispatch_clear_memory, dispatch_clear_vectorstore};
use crate::config::Config;
use crate::error::Result;
use crate::registry::SessionRegistry;
use crate::render::Renderer;

/// Clear the server-side memory for a session
///
/// Touches neither the chat list nor the local transcript; only the
/// backend's conversational memory is dropped.
pub async fn run_clear_memory(
    config: Config,
    mut registry: SessionRegistry,
    session: Option<String>,
) -> Result<()> {
    let client = ApiClient::new(&config.server)?;
    let renderer = Renderer::new();

    let session_id = match session {
        Some(requested) => registry.resolve_id(&requested).unwrap_or(requested),
        None => registry.session_id()?,
    };

    dispatch_clear_memory(&client, &renderer, &session_id).await
}

/// Clear the vector store, prompting for confirmation unless `yes`
pub async fn run_clear_vectorstore(config: Config, yes: bool) -> Result<()> {
    let client = ApiClient::new(&config.server)?;
    let renderer = Renderer::new();

    dispatch_clear_vectorstore(&client, &renderer, move || {
        if yes {
            return Ok(true);
        }
        crate::commands::confirm(
            "Are you sure you want to clear all ingested PDFs? This action cannot be undone.",
        )
    })
    .await
}

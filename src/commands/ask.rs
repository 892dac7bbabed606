//! One-shot question handler

use crate::api::ApiClient;
use crate::commands::dispatch_ask;
use crate::config::Config;
use crate::error::Result;
use crate::registry::SessionRegistry;
use crate::render::Renderer;

/// Ask a single question and print the answer
///
/// Uses the current session unless `session` names a stored chat (full
/// id or unique prefix), so follow-up questions from the shell keep
/// their conversational memory.
pub async fn run_ask(
    config: Config,
    mut registry: SessionRegistry,
    question: String,
    session: Option<String>,
) -> Result<()> {
    let client = ApiClient::new(&config.server)?;
    let renderer = Renderer::new();

    if let Some(requested) = session {
        let id = registry
            .resolve_id(&requested)
            .unwrap_or_else(|| requested.clone());
        registry.set_session_id(&id)?;
    }

    dispatch_ask(&client, &renderer, &mut registry, &question).await
}

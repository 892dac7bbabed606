/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes the top-level command modules:

- `chat`   — Interactive chat mode
- `ask`    — One-shot question
- `upload` — One-shot PDF upload
- `chats`  — Local chat list management
- `memory` — Server-side memory and vector store cleanup

These handlers are intentionally small and use the library components:
the API client, the renderer, and the session registry. The ask and
history flows shared between the REPL and the one-shot commands live
here.
*/

use crate::api::{ApiClient, ApiError};
use crate::error::Result;
use crate::registry::SessionRegistry;
use crate::render::{Renderer, Role};
use colored::Colorize;
use std::io::Write;

pub mod ask;
pub mod chat;
pub mod chats;
pub mod memory;
pub mod special_commands;
pub mod upload;

/// Ask one question within the current session and render the outcome
///
/// The flow mirrors a chat UI: the question is echoed optimistically,
/// a typing indicator is shown while the request is in flight and
/// removed unconditionally once it resolves, and the chat registry only
/// gains a title after a successful answer.
pub async fn dispatch_ask(
    client: &ApiClient,
    renderer: &Renderer,
    registry: &mut SessionRegistry,
    question: &str,
) -> Result<()> {
    let session_id = registry.session_id()?;
    // Re-persist the id even when it already existed, so a state file
    // deleted mid-session is recreated before the first answer lands.
    registry.set_session_id(&session_id)?;

    renderer.message(Role::User, question, None);
    let mut typing = renderer.typing();

    match client.ask(question, &session_id).await {
        Ok(response) => {
            typing.clear();
            renderer.message(
                Role::Assistant,
                response.answer_text(),
                response.meta_line().as_deref(),
            );

            match registry.find_chat(&session_id).map(|c| c.title.clone()) {
                Some(existing) => {
                    // Re-assert the existing title; this refreshes the
                    // record's timestamp without renaming it.
                    registry.upsert_chat_title(&session_id, &existing)?;
                }
                None => {
                    let title = SessionRegistry::title_for_question(question);
                    registry.upsert_chat_title(&session_id, &title)?;
                    println!("{}", format!("Saved chat: {}", title).dimmed());
                }
            }
        }
        Err(ApiError::Status { status, body }) => {
            typing.clear();
            renderer.message(
                Role::Assistant,
                &format!("Error {}: {}", status, body),
                None,
            );
        }
        Err(err) => {
            typing.clear();
            renderer.message(Role::Assistant, &format!("Request failed: {}", err), None);
        }
    }

    Ok(())
}

/// Replay the server-side history for a session
///
/// History is advisory: any failure leaves the transcript untouched and
/// is recorded only at debug level.
pub async fn replay_history(client: &ApiClient, renderer: &Renderer, session_id: &str) {
    match client.history(session_id).await {
        Ok(response) => {
            for turn in response.history {
                renderer.message(Role::User, &turn.question, None);
                renderer.message(Role::Assistant, &turn.answer, turn.meta_line().as_deref());
            }
        }
        Err(err) => {
            tracing::debug!("History unavailable for {}: {}", session_id, err);
        }
    }
}

/// Clear the server-side memory for a session and render the outcome
pub async fn dispatch_clear_memory(
    client: &ApiClient,
    renderer: &Renderer,
    session_id: &str,
) -> Result<()> {
    match client.clear_memory(session_id).await {
        Ok(()) => {
            renderer.message(Role::Assistant, "Memory cleared for this session.", None);
        }
        Err(ApiError::Status { status, body }) => {
            renderer.message(
                Role::Assistant,
                &format!("Clear failed: {} {}", status, body),
                None,
            );
        }
        Err(err) => {
            renderer.message(Role::Assistant, &format!("Request failed: {}", err), None);
        }
    }

    Ok(())
}

/// Clear the vector store after explicit confirmation
///
/// The deletion is global and irreversible server-side, so nothing is
/// sent until `confirmation` answers yes — interactively via
/// [`confirm`], or trivially when the user already passed `--yes`. A
/// declined confirmation issues zero requests.
pub async fn dispatch_clear_vectorstore<F>(
    client: &ApiClient,
    renderer: &Renderer,
    confirmation: F,
) -> Result<()>
where
    F: FnOnce() -> Result<bool>,
{
    if !confirmation()? {
        println!("{}", "Aborted.".yellow());
        return Ok(());
    }

    match client.clear_vectorstore().await {
        Ok(response) => {
            renderer.message(Role::Assistant, &response.confirmation(), None);
        }
        Err(ApiError::Status { status, body }) => {
            renderer.message(
                Role::Assistant,
                &format!("Clear failed: {} {}", status, body),
                None,
            );
        }
        Err(err) => {
            renderer.message(Role::Assistant, &format!("Request failed: {}", err), None);
        }
    }

    Ok(())
}

/// Ask the user a yes/no question on stdin; default is no
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    let answer = answer.trim();

    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

/// Display the welcome banner for interactive chat
pub fn print_welcome_banner(server: &str) {
    println!();
    println!("{}", "chatpdf".bold());
    println!("Connected to {}", server.cyan());
    println!("Type a question, or {} for commands.", "/help".cyan());
    println!();
}

//! Interactive chat mode handler
//!
//! Runs a readline-based loop that submits user input as questions and
//! dispatches `/`-prefixed special commands. Entering the loop renders
//! the chat list and replays the current session's history, the same
//! view a returning user gets in a chat UI.

use crate::commands::special_commands::{parse_special_command, print_help, SpecialCommand};
use crate::commands::{
    dispatch_ask, dispatch_clear_memory, dispatch_clear_vectorstore, print_welcome_banner,
    replay_history,
};
use crate::config::Config;
use crate::error::Result;
use crate::registry::SessionRegistry;
use crate::render::Renderer;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Start interactive chat mode
///
/// # Arguments
///
/// * `config` - Global configuration (consumed)
/// * `registry` - Session registry (consumed; owns the state file)
/// * `session` - Optional chat to resume (full id or unique prefix)
pub async fn run_chat(
    config: Config,
    mut registry: SessionRegistry,
    session: Option<String>,
) -> Result<()> {
    let client = crate::api::ApiClient::new(&config.server)?;
    let renderer = Renderer::new();

    if let Some(requested) = session {
        // Prefixes resolve against stored chats; an unknown id is taken
        // as-is, matching the registry's no-validation contract.
        let id = registry
            .resolve_id(&requested)
            .unwrap_or_else(|| requested.clone());
        registry.set_session_id(&id)?;
    }

    let session_id = registry.session_id()?;
    print_welcome_banner(client.base());
    renderer.chat_list(registry.chats(), &session_id);

    if config.ui.history_on_start {
        replay_history(&client, &renderer, &session_id).await;
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let session_id = registry.session_id()?;
        let short: String = session_id.chars().take(8).collect();
        let prompt = format!("[{}] >> ", short.cyan());

        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_special_command(trimmed) {
                    Ok(SpecialCommand::Help) => {
                        print_help();
                        continue;
                    }
                    Ok(SpecialCommand::NewChat) => {
                        let id = registry.new_chat()?;
                        let short: String = id.chars().take(8).collect();
                        renderer.divider(&format!("new chat {}", short));
                        continue;
                    }
                    Ok(SpecialCommand::ListChats) => {
                        renderer.chat_list(registry.chats(), &session_id);
                        continue;
                    }
                    Ok(SpecialCommand::SwitchChat(target)) => {
                        switch_chat(&client, &renderer, &mut registry, &config, &target).await?;
                        continue;
                    }
                    Ok(SpecialCommand::ClearMemory) => {
                        dispatch_clear_memory(&client, &renderer, &session_id).await?;
                        continue;
                    }
                    Ok(SpecialCommand::ClearVectorstore) => {
                        dispatch_clear_vectorstore(&client, &renderer, || {
                            crate::commands::confirm(
                                "Are you sure you want to clear all ingested PDFs? \
                                 This action cannot be undone.",
                            )
                        })
                        .await?;
                        continue;
                    }
                    Ok(SpecialCommand::Upload(paths)) => {
                        crate::upload::upload_files(&client, &renderer, &paths).await?;
                        continue;
                    }
                    Ok(SpecialCommand::Exit) => break,
                    Ok(SpecialCommand::None) => {
                        // Regular question for the backend
                    }
                    Err(err) => {
                        println!("{}", err.to_string().red());
                        continue;
                    }
                }

                rl.add_history_entry(trimmed)?;
                dispatch_ask(&client, &renderer, &mut registry, trimmed).await?;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Switch the active session to a stored chat and replay its history
async fn switch_chat(
    client: &crate::api::ApiClient,
    renderer: &Renderer,
    registry: &mut SessionRegistry,
    config: &Config,
    target: &str,
) -> Result<()> {
    let Some(id) = registry.resolve_id(target) else {
        println!("{}", format!("No chat matches '{}'", target).yellow());
        return Ok(());
    };

    registry.set_session_id(&id)?;
    renderer.chat_list(registry.chats(), &id);

    let short: String = id.chars().take(8).collect();
    renderer.divider(&format!("switched to chat {}", short));

    if config.ui.history_on_start {
        replay_history(client, renderer, &id).await;
    }

    Ok(())
}

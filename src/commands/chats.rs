//! Local chat list management

use crate::cli::ChatsCommand;
use crate::error::Result;
use crate::registry::SessionRegistry;
use crate::render::Renderer;
use colored::Colorize;

/// Handle `chats` subcommands
pub fn handle_chats(mut registry: SessionRegistry, command: ChatsCommand) -> Result<()> {
    let renderer = Renderer::new();

    match command {
        ChatsCommand::List => {
            let active = registry.session_id()?;
            println!("\nChats:");
            renderer.chat_list(registry.chats(), &active);
            println!(
                "Use {} to resume a chat.",
                "chatpdf chat --session <ID>".cyan()
            );
            println!();
        }
        ChatsCommand::New => {
            let id = registry.new_chat()?;
            let short: String = id.chars().take(8).collect();
            println!("{}", format!("Started new chat {}", short).green());
        }
        ChatsCommand::Switch { id } => {
            let Some(resolved) = registry.resolve_id(&id) else {
                println!("{}", format!("No chat matches '{}'", id).yellow());
                return Ok(());
            };
            registry.set_session_id(&resolved)?;
            let short: String = resolved.chars().take(8).collect();
            println!("{}", format!("Switched to chat {}", short).green());
            renderer.chat_list(registry.chats(), &resolved);
        }
    }

    Ok(())
}

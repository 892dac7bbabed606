//! Special commands parser for interactive chat mode
//!
//! This module parses the `/`-prefixed commands available during an
//! interactive session. Special commands manage local state (new chat,
//! switch chat, chat list) or dispatch maintenance requests (clear
//! memory, clear vectorstore, upload) instead of being sent as
//! questions.
//!
//! Commands are case-insensitive.

use colored::Colorize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// Special commands that can be executed during interactive chat
///
/// Anything that parses to [`SpecialCommand::None`] is a question for
/// the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Display help information
    Help,

    /// Start a new chat: fresh session id, empty transcript
    NewChat,

    /// Render the chat list with the active chat marked
    ListChats,

    /// Switch to a stored chat (full id or unique prefix) and replay its
    /// history
    SwitchChat(String),

    /// Clear the server-side memory for the current session
    ClearMemory,

    /// Delete every ingested chunk from the vector store
    ///
    /// Irreversible and global; the handler asks for confirmation before
    /// sending anything.
    ClearVectorstore,

    /// Upload PDF files for ingestion
    Upload(Vec<PathBuf>),

    /// Exit the interactive session
    Exit,

    /// Not a special command
    None,
}

/// Parse a user input string into a special command
///
/// # Arguments
///
/// * `input` - The user input string to parse
///
/// # Returns
///
/// Returns Ok(SpecialCommand) for valid commands or SpecialCommand::None
/// for non-commands.
///
/// # Errors
///
/// Returns CommandError::UnknownCommand if input starts with "/" but is
/// not a valid command, and CommandError::MissingArgument if a command
/// requires an argument but none was provided.
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    if !input.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let mut parts = input.split_whitespace();
    let command = parts.next().unwrap_or("").to_lowercase();
    let args: Vec<&str> = parts.collect();

    match command.as_str() {
        "/help" | "/h" | "/?" => Ok(SpecialCommand::Help),
        "/new" => Ok(SpecialCommand::NewChat),
        "/chats" | "/list" => Ok(SpecialCommand::ListChats),
        "/switch" => match args.first() {
            Some(id) => Ok(SpecialCommand::SwitchChat(id.to_string())),
            None => Err(CommandError::MissingArgument {
                command: "/switch".to_string(),
                usage: "/switch <chat-id>".to_string(),
            }),
        },
        "/clear-memory" | "/clear" => Ok(SpecialCommand::ClearMemory),
        "/clear-vectorstore" => Ok(SpecialCommand::ClearVectorstore),
        "/upload" => {
            if args.is_empty() {
                Err(CommandError::MissingArgument {
                    command: "/upload".to_string(),
                    usage: "/upload <file.pdf> [more.pdf ...]".to_string(),
                })
            } else {
                Ok(SpecialCommand::Upload(
                    args.iter().map(PathBuf::from).collect(),
                ))
            }
        }
        "/quit" | "/exit" | "/q" => Ok(SpecialCommand::Exit),
        other => Err(CommandError::UnknownCommand(other.to_string())),
    }
}

/// Print help for the interactive session
pub fn print_help() {
    println!();
    println!("{}", "Commands:".bold());
    println!("  {}            Show this help", "/help".cyan());
    println!("  {}             Start a new chat", "/new".cyan());
    println!("  {}           List chats (● marks the active one)", "/chats".cyan());
    println!("  {}      Switch to a chat by id or prefix", "/switch <id>".cyan());
    println!("  {}    Clear server-side memory for this chat", "/clear-memory".cyan());
    println!(
        "  {} Delete every ingested PDF chunk (asks first)",
        "/clear-vectorstore".cyan()
    );
    println!("  {}  Upload PDFs for ingestion", "/upload <files>".cyan());
    println!("  {}            Exit", "/quit".cyan());
    println!();
    println!("Anything else is sent to the backend as a question.");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_non_command_is_none() {
        assert_eq!(
            parse_special_command("what is chunking?").unwrap(),
            SpecialCommand::None
        );
    }

    #[test]
    fn test_parse_help_aliases() {
        assert_eq!(parse_special_command("/help").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/h").unwrap(), SpecialCommand::Help);
        assert_eq!(parse_special_command("/?").unwrap(), SpecialCommand::Help);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(parse_special_command("/NEW").unwrap(), SpecialCommand::NewChat);
        assert_eq!(
            parse_special_command("/Chats").unwrap(),
            SpecialCommand::ListChats
        );
    }

    #[test]
    fn test_parse_switch_with_argument() {
        assert_eq!(
            parse_special_command("/switch abcd1234").unwrap(),
            SpecialCommand::SwitchChat("abcd1234".to_string())
        );
    }

    #[test]
    fn test_parse_switch_without_argument_is_error() {
        let err = parse_special_command("/switch").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { .. }));
    }

    #[test]
    fn test_parse_clear_aliases() {
        assert_eq!(
            parse_special_command("/clear").unwrap(),
            SpecialCommand::ClearMemory
        );
        assert_eq!(
            parse_special_command("/clear-memory").unwrap(),
            SpecialCommand::ClearMemory
        );
        assert_eq!(
            parse_special_command("/clear-vectorstore").unwrap(),
            SpecialCommand::ClearVectorstore
        );
    }

    #[test]
    fn test_parse_upload_collects_paths() {
        assert_eq!(
            parse_special_command("/upload a.pdf b.pdf").unwrap(),
            SpecialCommand::Upload(vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")])
        );
    }

    #[test]
    fn test_parse_upload_without_paths_is_error() {
        let err = parse_special_command("/upload").unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { .. }));
    }

    #[test]
    fn test_parse_exit_aliases() {
        assert_eq!(parse_special_command("/quit").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("/exit").unwrap(), SpecialCommand::Exit);
        assert_eq!(parse_special_command("/q").unwrap(), SpecialCommand::Exit);
    }

    #[test]
    fn test_parse_unknown_command_is_error() {
        let err = parse_special_command("/bogus").unwrap_err();
        assert_eq!(err, CommandError::UnknownCommand("/bogus".to_string()));
    }

    #[test]
    fn test_unknown_command_error_mentions_help() {
        let err = parse_special_command("/bogus").unwrap_err();
        assert!(err.to_string().contains("/help"));
    }
}

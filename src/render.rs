//! Terminal rendering of the conversation
//!
//! This module owns everything the user sees: message bubbles, meta
//! lines, the typing indicator, the chat list table, and upload status
//! lines. Outcome-to-color mapping lives here and nowhere else.
//!
//! All user- and server-supplied text passes through [`sanitize`] before
//! printing, so remote content cannot inject terminal control sequences.

use crate::registry::ChatRecord;
use crate::upload::UploadOutcome;
use colored::Colorize;
use prettytable::{format, Table};
use std::io::Write;

/// Who authored a message bubble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The local user
    User,
    /// The assistant (backend answers, confirmations, and errors)
    Assistant,
}

impl Role {
    /// Avatar label shown next to the bubble
    pub fn avatar(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "AI",
        }
    }

    fn colored_avatar(&self) -> String {
        // Pad before coloring: escape codes would count toward the width.
        let padded = format!("{:<4}", self.avatar());
        match self {
            Self::User => padded.green().bold().to_string(),
            Self::Assistant => padded.cyan().bold().to_string(),
        }
    }
}

/// Strip terminal control from untrusted text
///
/// Removes ANSI escape sequences and C0 control characters other than
/// newline and tab. Printable text, including `<`, `>`, `&`, and `"`,
/// passes through unchanged: a `<script>` tag stays literal text on a
/// terminal, the only injection surface here is control bytes.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            // CSI sequences run to an ASCII letter; other escapes are a
            // single following character.
            if chars.peek() == Some(&'[') {
                chars.next();
                for follow in chars.by_ref() {
                    if follow.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                chars.next();
            }
            continue;
        }
        if c.is_control() && c != '\n' && c != '\t' {
            continue;
        }
        out.push(c);
    }

    out
}

/// Handle for the "Generating answer" placeholder line
///
/// Returned by [`Renderer::typing`]; the caller clears it once a
/// response or an error is available. Dropping an uncleared indicator
/// clears it too, so no failure path can leave it on screen.
pub struct TypingIndicator {
    cleared: bool,
}

impl TypingIndicator {
    fn start() -> Self {
        print!("{}", "AI is generating an answer...".dimmed());
        let _ = std::io::stdout().flush();
        Self { cleared: false }
    }

    /// Remove the placeholder line
    pub fn clear(&mut self) {
        if self.cleared {
            return;
        }
        print!("\r\x1b[2K");
        let _ = std::io::stdout().flush();
        self.cleared = true;
    }
}

impl Drop for TypingIndicator {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Terminal conversation renderer
#[derive(Default)]
pub struct Renderer;

impl Renderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self
    }

    /// Print one message bubble
    ///
    /// The first line carries the avatar; continuation lines and the
    /// optional meta line are indented under it.
    pub fn message(&self, role: Role, text: &str, meta: Option<&str>) {
        let text = sanitize(text);
        let mut lines = text.lines();

        let first = lines.next().unwrap_or("");
        println!("{} {}", role.colored_avatar(), first);
        for line in lines {
            println!("     {}", line);
        }

        if let Some(meta) = meta {
            println!("     {}", sanitize(meta).dimmed());
        }
        println!();
    }

    /// Print the typing-indicator placeholder and return its handle
    pub fn typing(&self) -> TypingIndicator {
        TypingIndicator::start()
    }

    /// Print a transient status line (upload progress and outcomes)
    pub fn status(&self, line: &str) {
        println!("{}", line);
    }

    /// Print a dimmed divider, used when entering or switching chats
    pub fn divider(&self, label: &str) {
        println!("{}", format!("── {} ──", sanitize(label)).dimmed());
        println!();
    }

    /// Render the chat list, marking the active session
    pub fn chat_list(&self, chats: &[ChatRecord], active_id: &str) {
        if chats.is_empty() {
            println!("{}", "No chats yet.".yellow());
            return;
        }

        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

        table.add_row(prettytable::row![
            "".bold(),
            "ID".bold(),
            "Title".bold(),
            "Last Updated".bold()
        ]);

        for chat in chats {
            let marker = if chat.id == active_id { "●" } else { "" };
            let id_short = chat.id.chars().take(8).collect::<String>();
            let title = sanitize(&chat.title);
            let title = if title.chars().count() > 40 {
                format!("{}...", title.chars().take(37).collect::<String>())
            } else {
                title
            };
            let updated = chat.updated_at.format("%Y-%m-%d %H:%M").to_string();

            table.add_row(prettytable::row![
                marker.green(),
                id_short.cyan(),
                title,
                updated
            ]);
        }

        table.printstd();
        println!();
    }

    /// Map an upload outcome to its glyph and color, and print it
    pub fn upload_status(&self, outcome: &UploadOutcome) {
        let text = upload_status_text(outcome);
        let line = match outcome {
            UploadOutcome::Success { .. } => text.green(),
            UploadOutcome::Partial { .. } => text.yellow(),
            UploadOutcome::Failure => text.red(),
        };
        println!("{}", line);
    }
}

/// Status text for an upload outcome, glyph included
///
/// Kept free of color so tests can assert on the exact wording.
pub fn upload_status_text(outcome: &UploadOutcome) -> String {
    match outcome {
        UploadOutcome::Success { files, chunks } => {
            format!("✓ {} file(s), {} chunks", files, chunks)
        }
        UploadOutcome::Partial { successful, total } => {
            format!("⚠ {}/{} succeeded", successful, total)
        }
        UploadOutcome::Failure => "✗ All uploads failed".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_markup_literal() {
        assert_eq!(
            sanitize("<script>alert('x')</script>"),
            "<script>alert('x')</script>"
        );
        assert_eq!(sanitize("a & b \" c"), "a & b \" c");
    }

    #[test]
    fn test_sanitize_strips_ansi_sequences() {
        assert_eq!(sanitize("\u{1b}[31mred\u{1b}[0m"), "red");
    }

    #[test]
    fn test_sanitize_strips_bare_escape() {
        assert_eq!(sanitize("\u{1b}cminimal"), "minimal");
    }

    #[test]
    fn test_sanitize_strips_control_chars_keeps_whitespace() {
        assert_eq!(sanitize("a\u{7}b\rc"), "abc");
        assert_eq!(sanitize("line1\nline2\ttabbed"), "line1\nline2\ttabbed");
    }

    #[test]
    fn test_role_avatars() {
        assert_eq!(Role::User.avatar(), "You");
        assert_eq!(Role::Assistant.avatar(), "AI");
    }

    #[test]
    fn test_upload_status_text_success() {
        let outcome = UploadOutcome::Success {
            files: 2,
            chunks: 31,
        };
        assert_eq!(upload_status_text(&outcome), "✓ 2 file(s), 31 chunks");
    }

    #[test]
    fn test_upload_status_text_partial() {
        let outcome = UploadOutcome::Partial {
            successful: 2,
            total: 3,
        };
        assert_eq!(upload_status_text(&outcome), "⚠ 2/3 succeeded");
    }

    #[test]
    fn test_upload_status_text_failure() {
        assert_eq!(upload_status_text(&UploadOutcome::Failure), "✗ All uploads failed");
    }

    #[test]
    fn test_typing_indicator_clear_is_idempotent() {
        let mut indicator = TypingIndicator { cleared: true };
        indicator.clear();
        indicator.clear();
        assert!(indicator.cleared);
    }
}

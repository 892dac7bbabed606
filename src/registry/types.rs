use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version of the persisted client state schema
///
/// Bump this when the shape of [`ClientState`] changes; loaders treat any
/// other version as empty state so old binaries never misread new files.
pub const SCHEMA_VERSION: u32 = 1;

/// Client-side metadata for one conversation thread
///
/// Independent of server storage: the backend keeps the actual history and
/// memory keyed by session id, the client keeps only what the chat list
/// needs to display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Session identifier shared with the backend
    pub id: String,
    /// User-friendly title (first question, or "New chat")
    pub title: String,
    /// When the chat last changed
    pub updated_at: DateTime<Utc>,
}

/// Persisted client state: the current session plus the known chat list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientState {
    /// Schema version of this file
    pub schema_version: u32,
    /// The currently active session id, if one was ever created
    #[serde(default)]
    pub session_id: Option<String>,
    /// Known chats, most recently created first
    #[serde(default)]
    pub chats: Vec<ChatRecord>,
}

impl Default for ClientState {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            session_id: None,
            chats: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_current_schema_version() {
        let state = ClientState::default();
        assert_eq!(state.schema_version, SCHEMA_VERSION);
        assert!(state.session_id.is_none());
        assert!(state.chats.is_empty());
    }

    #[test]
    fn test_state_roundtrip() {
        let state = ClientState {
            schema_version: SCHEMA_VERSION,
            session_id: Some("abc".to_string()),
            chats: vec![ChatRecord {
                id: "abc".to_string(),
                title: "First question".to_string(),
                updated_at: Utc::now(),
            }],
        };
        let json = serde_json::to_string(&state).expect("serialize failed");
        let parsed: ClientState = serde_json::from_str(&json).expect("deserialize failed");
        assert_eq!(parsed.session_id.as_deref(), Some("abc"));
        assert_eq!(parsed.chats.len(), 1);
        assert_eq!(parsed.chats[0].title, "First question");
    }

    #[test]
    fn test_state_missing_optional_fields_parses() {
        let parsed: ClientState =
            serde_json::from_str(r#"{"schema_version": 1}"#).expect("minimal state should parse");
        assert!(parsed.session_id.is_none());
        assert!(parsed.chats.is_empty());
    }
}

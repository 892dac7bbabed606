//! Session and chat registry
//!
//! The registry owns the client's local state: which session is current
//! and which chats are known. It is the only component that touches the
//! state file, and it never surfaces a load failure to callers — corrupt
//! or unreadable state degrades to an empty registry, matching the
//! behavior of a browser client whose storage was wiped.

use crate::error::{ChatPdfError, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

pub mod types;
pub use types::{ChatRecord, ClientState, SCHEMA_VERSION};

/// Title given to chats that have not had a question answered yet
pub const DEFAULT_TITLE: &str = "New chat";

/// Maximum number of characters of a question used as a chat title
const TITLE_MAX_CHARS: usize = 60;

/// Persistence seam for the registry
///
/// Production uses [`FileStore`]; tests use [`MemoryStore`]. The store
/// moves raw text only — parsing and fail-soft handling live in the
/// registry so every backend gets the same corruption semantics.
pub trait StateStore: Send {
    /// Read the raw persisted state, or `None` if absent or unreadable
    fn load(&self) -> Option<String>;

    /// Persist the raw state
    fn save(&self, raw: &str) -> Result<()>;
}

/// File-backed state store
///
/// Lives in the platform data directory by default. The path can be
/// overridden with the `CHATPDF_STATE_FILE` environment variable, which
/// makes it easy to point the binary at a test file or alternate state
/// without changing the user's application data dir.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at the default platform location
    ///
    /// # Errors
    ///
    /// Returns error if the platform data directory cannot be determined
    pub fn new() -> Result<Self> {
        if let Ok(override_path) = std::env::var("CHATPDF_STATE_FILE") {
            return Ok(Self::new_with_path(override_path));
        }

        let proj_dirs = ProjectDirs::from("com", "chatpdf", "chatpdf")
            .ok_or_else(|| ChatPdfError::Storage("Could not determine data directory".into()))?;

        Ok(Self::new_with_path(proj_dirs.data_dir().join("state.json")))
    }

    /// Create a store that uses the specified state file path
    ///
    /// # Examples
    ///
    /// ```
    /// use chatpdf::registry::FileStore;
    ///
    /// let store = FileStore::new_with_path("/tmp/chatpdf_state.json");
    /// ```
    pub fn new_with_path<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl StateStore for FileStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Some(raw),
            Err(err) => {
                tracing::debug!("No readable state at {}: {}", self.path.display(), err);
                None
            }
        }
    }

    fn save(&self, raw: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ChatPdfError::Storage(format!("Failed to create state dir: {}", e)))?;
        }

        // Write-then-rename so a crash mid-write never corrupts the state.
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, raw)
            .map_err(|e| ChatPdfError::Storage(format!("Failed to write state: {}", e)))?;
        std::fs::rename(&tmp_path, &self.path)
            .map_err(|e| ChatPdfError::Storage(format!("Failed to replace state: {}", e)))?;

        Ok(())
    }
}

/// In-memory state store for tests
#[derive(Default)]
pub struct MemoryStore {
    cell: Mutex<Option<String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with raw content (possibly invalid)
    pub fn with_content(raw: &str) -> Self {
        Self {
            cell: Mutex::new(Some(raw.to_string())),
        }
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.cell.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, raw: &str) -> Result<()> {
        let mut guard = self
            .cell
            .lock()
            .map_err(|_| ChatPdfError::Storage("memory store poisoned".into()))?;
        *guard = Some(raw.to_string());
        Ok(())
    }
}

/// Session and chat registry over a state store
pub struct SessionRegistry {
    store: Box<dyn StateStore>,
    state: ClientState,
}

impl SessionRegistry {
    /// Create a registry, loading whatever state the store holds
    ///
    /// Loading is fail-soft: missing, unparseable, or wrong-version
    /// content all yield an empty registry.
    pub fn new(store: Box<dyn StateStore>) -> Self {
        let state = match store.load() {
            Some(raw) => match serde_json::from_str::<ClientState>(&raw) {
                Ok(state) if state.schema_version == SCHEMA_VERSION => state,
                Ok(state) => {
                    tracing::warn!(
                        "Ignoring state with unknown schema_version {}",
                        state.schema_version
                    );
                    ClientState::default()
                }
                Err(err) => {
                    tracing::warn!("Ignoring unparseable state: {}", err);
                    ClientState::default()
                }
            },
            None => ClientState::default(),
        };

        Self { store, state }
    }

    /// Create a registry backed by the default file store
    pub fn open() -> Result<Self> {
        Ok(Self::new(Box::new(FileStore::new()?)))
    }

    /// The current session id, generating and persisting one if absent
    ///
    /// Idempotent: repeated calls with no intervening writes return the
    /// same value.
    pub fn session_id(&mut self) -> Result<String> {
        if let Some(id) = &self.state.session_id {
            return Ok(id.clone());
        }

        let id = Uuid::new_v4().to_string();
        tracing::debug!("Generated new session id {}", id);
        self.state.session_id = Some(id.clone());
        self.persist()?;
        Ok(id)
    }

    /// Overwrite the current session id
    ///
    /// No validation of shape; switching to a stored chat passes its
    /// record id through unchanged.
    pub fn set_session_id(&mut self, id: &str) -> Result<()> {
        self.state.session_id = Some(id.to_string());
        self.persist()
    }

    /// The known chats, most recently created first
    pub fn chats(&self) -> &[ChatRecord] {
        &self.state.chats
    }

    /// Look up a chat record by exact id
    pub fn find_chat(&self, id: &str) -> Option<&ChatRecord> {
        self.state.chats.iter().find(|c| c.id == id)
    }

    /// Resolve a full id or unique prefix to a stored chat id
    pub fn resolve_id(&self, prefix: &str) -> Option<String> {
        if let Some(chat) = self.find_chat(prefix) {
            return Some(chat.id.clone());
        }
        let mut matches = self.state.chats.iter().filter(|c| c.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(chat), None) => Some(chat.id.clone()),
            _ => None,
        }
    }

    /// Insert or update a chat record
    ///
    /// Unknown ids are prepended; known ids are updated in place with the
    /// new title and a refreshed timestamp, keeping their list position.
    /// An empty title falls back to "New chat".
    pub fn upsert_chat_title(&mut self, id: &str, title: &str) -> Result<()> {
        let title = if title.is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.to_string()
        };
        let now = chrono::Utc::now();

        if let Some(existing) = self.state.chats.iter_mut().find(|c| c.id == id) {
            existing.title = title;
            existing.updated_at = now;
        } else {
            self.state.chats.insert(
                0,
                ChatRecord {
                    id: id.to_string(),
                    title,
                    updated_at: now,
                },
            );
        }

        self.persist()
    }

    /// Start a new chat: fresh session id, persisted as current, with a
    /// placeholder record at the front of the list
    pub fn new_chat(&mut self) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.state.session_id = Some(id.clone());
        self.upsert_chat_title(&id, DEFAULT_TITLE)?;
        Ok(id)
    }

    /// Derive a chat title from a question: its first 60 characters
    pub fn title_for_question(question: &str) -> String {
        question.chars().take(TITLE_MAX_CHARS).collect()
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.state)
            .map_err(|e| ChatPdfError::Storage(format!("Failed to serialize state: {}", e)))?;
        self.store.save(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_registry() -> SessionRegistry {
        SessionRegistry::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_session_id_is_idempotent() {
        let mut registry = memory_registry();
        let first = registry.session_id().expect("first call failed");
        let second = registry.session_id().expect("second call failed");
        assert_eq!(first, second);
    }

    #[test]
    fn test_session_id_is_uuid_shaped() {
        let mut registry = memory_registry();
        let id = registry.session_id().expect("session id failed");
        let parsed = Uuid::parse_str(&id).expect("session id should be a UUID");
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn test_set_session_id_overwrites() {
        let mut registry = memory_registry();
        registry.set_session_id("chosen-id").expect("set failed");
        assert_eq!(registry.session_id().expect("get failed"), "chosen-id");
    }

    #[test]
    fn test_upsert_unknown_id_prepends() {
        let mut registry = memory_registry();
        registry.upsert_chat_title("a", "First").expect("upsert a");
        registry.upsert_chat_title("b", "Second").expect("upsert b");
        let ids: Vec<&str> = registry.chats().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_upsert_known_id_updates_in_place() {
        let mut registry = memory_registry();
        registry.upsert_chat_title("a", "First").expect("upsert a");
        registry.upsert_chat_title("b", "Second").expect("upsert b");
        let before = registry.find_chat("a").expect("chat a").updated_at;

        registry.upsert_chat_title("a", "Renamed").expect("rename a");

        let chats = registry.chats();
        assert_eq!(chats.len(), 2);
        // Position unchanged: "a" is still last.
        assert_eq!(chats[1].id, "a");
        assert_eq!(chats[1].title, "Renamed");
        assert!(chats[1].updated_at >= before);
    }

    #[test]
    fn test_upsert_same_id_twice_keeps_one_record() {
        let mut registry = memory_registry();
        registry.upsert_chat_title("a", "One").expect("first upsert");
        registry.upsert_chat_title("a", "Two").expect("second upsert");
        assert_eq!(registry.chats().len(), 1);
        assert_eq!(registry.chats()[0].title, "Two");
    }

    #[test]
    fn test_upsert_empty_title_falls_back_to_default() {
        let mut registry = memory_registry();
        registry.upsert_chat_title("a", "").expect("upsert failed");
        assert_eq!(registry.chats()[0].title, DEFAULT_TITLE);
    }

    #[test]
    fn test_corrupt_state_yields_empty_registry() {
        let store = MemoryStore::with_content("not json");
        let registry = SessionRegistry::new(Box::new(store));
        assert!(registry.chats().is_empty());
    }

    #[test]
    fn test_unknown_schema_version_yields_empty_registry() {
        let store = MemoryStore::with_content(
            r#"{"schema_version": 99, "session_id": "x", "chats": []}"#,
        );
        let registry = SessionRegistry::new(Box::new(store));
        assert!(registry.chats().is_empty());
    }

    #[test]
    fn test_state_survives_reload() {
        let state = ClientState {
            schema_version: SCHEMA_VERSION,
            session_id: Some("persisted".to_string()),
            chats: vec![ChatRecord {
                id: "persisted".to_string(),
                title: "Kept title".to_string(),
                updated_at: chrono::Utc::now(),
            }],
        };
        let raw = serde_json::to_string(&state).expect("serialize");

        let mut reloaded = SessionRegistry::new(Box::new(MemoryStore::with_content(&raw)));
        assert_eq!(reloaded.session_id().expect("get failed"), "persisted");
        assert_eq!(reloaded.chats()[0].title, "Kept title");
    }

    #[test]
    fn test_new_chat_sets_current_and_prepends_record() {
        let mut registry = memory_registry();
        registry.upsert_chat_title("old", "Old chat").expect("seed");
        let id = registry.new_chat().expect("new chat failed");

        assert_eq!(registry.session_id().expect("get failed"), id);
        assert_eq!(registry.chats()[0].id, id);
        assert_eq!(registry.chats()[0].title, DEFAULT_TITLE);
        assert_eq!(registry.chats().len(), 2);
    }

    #[test]
    fn test_resolve_id_by_prefix() {
        let mut registry = memory_registry();
        registry
            .upsert_chat_title("abcdef12-3456-7890-abcd-ef1234567890", "A")
            .expect("seed a");
        registry
            .upsert_chat_title("ffff0000-1111-2222-3333-444455556666", "B")
            .expect("seed b");

        assert_eq!(
            registry.resolve_id("abcdef12").as_deref(),
            Some("abcdef12-3456-7890-abcd-ef1234567890")
        );
        assert!(registry.resolve_id("nope").is_none());
    }

    #[test]
    fn test_resolve_id_ambiguous_prefix_is_none() {
        let mut registry = memory_registry();
        registry.upsert_chat_title("aa11", "A").expect("seed a");
        registry.upsert_chat_title("aa22", "B").expect("seed b");
        assert!(registry.resolve_id("aa").is_none());
    }

    #[test]
    fn test_title_for_question_truncates_to_60_chars() {
        let long = "x".repeat(100);
        assert_eq!(SessionRegistry::title_for_question(&long).chars().count(), 60);

        let short = "why do embeddings drift?";
        assert_eq!(SessionRegistry::title_for_question(short), short);
    }

    #[test]
    fn test_title_for_question_respects_char_boundaries() {
        let question = "é".repeat(70);
        let title = SessionRegistry::title_for_question(&question);
        assert_eq!(title.chars().count(), 60);
    }
}

//! Wire types for the question-answering backend
//!
//! Shapes match the backend's `/v1` endpoints. Optional response fields
//! default to empty so older or partial servers still parse.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/ask`
#[derive(Debug, Clone, Serialize)]
pub struct AskRequest {
    pub question: String,
    pub session_id: String,
}

/// Response body for `POST /v1/ask`
#[derive(Debug, Clone, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    /// Planner steps, passed through opaquely for display
    #[serde(default)]
    pub plan: Vec<serde_json::Value>,
}

impl AskResponse {
    /// The answer text, with the placeholder used for empty answers
    pub fn answer_text(&self) -> &str {
        if self.answer.is_empty() {
            "(no answer)"
        } else {
            &self.answer
        }
    }

    /// Meta line combining sources and plan, when either is non-empty
    ///
    /// Format: `sources: a, b | plan: [...]`, each part present only when
    /// its field is non-empty.
    pub fn meta_line(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(sources) = sources_meta(&self.sources) {
            parts.push(sources);
        }
        if !self.plan.is_empty() {
            if let Ok(json) = serde_json::to_string(&self.plan) {
                parts.push(format!("plan: {}", json));
            }
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" | "))
        }
    }
}

/// One question/answer exchange from `GET /v1/history`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryTurn {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

impl HistoryTurn {
    /// Meta line for the answer, when sources are non-empty
    pub fn meta_line(&self) -> Option<String> {
        sources_meta(&self.sources)
    }
}

/// Response body for `GET /v1/history`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

/// Request body for `POST /v1/clear_memory`
#[derive(Debug, Clone, Serialize)]
pub struct ClearMemoryRequest {
    pub session_id: String,
}

/// Response body for `POST /v1/clear_vectorstore`
#[derive(Debug, Clone, Deserialize)]
pub struct ClearVectorstoreResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted_chunks: Option<u64>,
}

impl ClearVectorstoreResponse {
    /// The confirmation to render: the server's message, or a fallback
    /// composed from the deleted-chunk count
    pub fn confirmation(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!(
                "Successfully cleared {} chunks from vector store.",
                self.deleted_chunks.unwrap_or(0)
            ),
        }
    }
}

/// Per-file ingestion status in an upload response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// Per-file result in `POST /v1/upload`'s response
#[derive(Debug, Clone, Deserialize)]
pub struct UploadFileResult {
    pub filename: String,
    pub status: UploadStatus,
    #[serde(default)]
    pub chunks_ingested: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Aggregate counts in `POST /v1/upload`'s response
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSummary {
    pub total_files: usize,
    pub successful: usize,
    pub failed: usize,
    #[serde(default)]
    pub total_chunks_ingested: u64,
}

/// Response body for `POST /v1/upload`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub summary: UploadSummary,
    #[serde(default)]
    pub results: Vec<UploadFileResult>,
}

fn sources_meta(sources: &[String]) -> Option<String> {
    if sources.is_empty() {
        None
    } else {
        Some(format!("sources: {}", sources.join(", ")))
    }
}

//! HTTP dispatcher for the question-answering backend
//!
//! This module owns the HTTP client and the five `/v1` endpoints the
//! chat client consumes. Callers get typed responses or an [`ApiError`]
//! that distinguishes an HTTP error status (body text preserved for
//! display) from a transport failure (request never completed or the
//! response body could not be decoded).

use crate::config::ServerConfig;
use crate::error::{ChatPdfError, Result};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

pub mod types;
pub use types::{
    AskRequest, AskResponse, ClearMemoryRequest, ClearVectorstoreResponse, HistoryResponse,
    HistoryTurn, UploadFileResult, UploadResponse, UploadStatus, UploadSummary,
};

/// Errors from a dispatched request
///
/// The two variants mirror the client's error taxonomy: a completed
/// request with a non-OK status keeps the body text verbatim for the
/// renderer; everything else (connect failures, timeouts, undecodable
/// bodies) is a transport failure described by the underlying error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-OK status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text, surfaced verbatim to the user
        body: String,
    },

    /// The request never completed, or the response could not be decoded
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

/// One file queued for upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// File name sent in the multipart part (no directory components)
    pub filename: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

/// HTTP client for the backend's `/v1` API
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    /// Create a client for the configured server
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("chatpdf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ChatPdfError::Http)?;

        let base = config.base_url.as_str().trim_end_matches('/').to_string();

        tracing::debug!("Initialized API client for {}", base);

        Ok(Self { client, base })
    }

    /// The server base URL this client talks to (no trailing slash)
    pub fn base(&self) -> &str {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Ask a question within a session
    pub async fn ask(
        &self,
        question: &str,
        session_id: &str,
    ) -> std::result::Result<AskResponse, ApiError> {
        let request = AskRequest {
            question: question.to_string(),
            session_id: session_id.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint("/v1/ask"))
            .json(&request)
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Fetch the server-side history for a session
    pub async fn history(
        &self,
        session_id: &str,
    ) -> std::result::Result<HistoryResponse, ApiError> {
        let response = self
            .client
            .get(self.endpoint("/v1/history"))
            .query(&[("session_id", session_id)])
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Clear the server-side memory for a session
    ///
    /// The response body is ignored; success is implied by the status.
    pub async fn clear_memory(&self, session_id: &str) -> std::result::Result<(), ApiError> {
        let request = ClearMemoryRequest {
            session_id: session_id.to_string(),
        };

        let response = self
            .client
            .post(self.endpoint("/v1/clear_memory"))
            .json(&request)
            .send()
            .await?;
        check_status(response).await?;

        Ok(())
    }

    /// Delete every ingested chunk from the vector store
    ///
    /// Global and irreversible server-side; callers are responsible for
    /// confirming with the user before dispatching.
    pub async fn clear_vectorstore(
        &self,
    ) -> std::result::Result<ClearVectorstoreResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/v1/clear_vectorstore"))
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }

    /// Upload files for ingestion as one multipart request
    ///
    /// Every file goes under the repeated `files` field, matching the
    /// backend's `files: List[UploadFile]` parameter.
    pub async fn upload(
        &self,
        files: Vec<UploadFile>,
    ) -> std::result::Result<UploadResponse, ApiError> {
        let mut form = reqwest::multipart::Form::new();
        for file in files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.filename)
                .mime_str("application/pdf")?;
            form = form.part("files", part);
        }

        let response = self
            .client
            .post(self.endpoint("/v1/upload"))
            .multipart(form)
            .send()
            .await?;
        let response = check_status(response).await?;

        Ok(response.json().await?)
    }
}

/// Convert a non-OK response into [`ApiError::Status`], keeping the body
async fn check_status(
    response: reqwest::Response,
) -> std::result::Result<reqwest::Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use url::Url;

    fn client_for(base: &str) -> ApiClient {
        let config = ServerConfig {
            base_url: Url::parse(base).expect("test url"),
            timeout_seconds: 5,
        };
        ApiClient::new(&config).expect("client should build")
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = client_for("http://localhost:8000");
        assert_eq!(client.endpoint("/v1/ask"), "http://localhost:8000/v1/ask");

        // Url normalizes a bare authority to a trailing slash; it must not
        // produce "//v1/ask".
        let client = client_for("http://localhost:8000/");
        assert_eq!(client.endpoint("/v1/ask"), "http://localhost:8000/v1/ask");
    }

    #[test]
    fn test_status_error_display_keeps_body() {
        let error = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP 500: boom");
    }

    #[test]
    fn test_api_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}

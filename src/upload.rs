//! PDF upload handler
//!
//! Batches selected files into one multipart request and reports a
//! per-file outcome summary. The outcome is a tagged variant so the
//! renderer can map it to glyph and color in a single place.

use crate::api::{ApiClient, UploadFile, UploadResponse, UploadStatus, UploadSummary};
use crate::error::Result;
use crate::render::{Renderer, Role};
use anyhow::anyhow;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Aggregate result of one upload batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Every selected file was ingested
    Success {
        /// Number of files ingested
        files: usize,
        /// Total chunks ingested across all files
        chunks: u64,
    },
    /// Some files were ingested, some failed
    Partial {
        /// Number of files ingested
        successful: usize,
        /// Number of files in the batch
        total: usize,
    },
    /// No file was ingested
    Failure,
}

impl UploadOutcome {
    /// Classify a server summary against the number of files selected
    pub fn classify(selected: usize, summary: &UploadSummary) -> Self {
        if summary.successful == selected {
            Self::Success {
                files: summary.successful,
                chunks: summary.total_chunks_ingested,
            }
        } else if summary.successful > 0 {
            Self::Partial {
                successful: summary.successful,
                total: summary.total_files,
            }
        } else {
            Self::Failure
        }
    }
}

/// In-progress status line, singular or plural by count
pub fn progress_text(count: usize) -> String {
    if count == 1 {
        "Uploading...".to_string()
    } else {
        format!("Uploading {} files...", count)
    }
}

/// Chat messages enumerating per-file results
///
/// One message lists the successful files with their chunk counts, a
/// separate message lists the failed files with their errors; either is
/// omitted when its count is zero.
pub fn detail_messages(response: &UploadResponse) -> Vec<String> {
    let mut messages = Vec::new();

    if response.summary.successful > 0 {
        let lines = response
            .results
            .iter()
            .filter(|r| r.status == UploadStatus::Success)
            .map(|r| format!("• {}: {} chunks", r.filename, r.chunks_ingested.unwrap_or(0)))
            .collect::<Vec<_>>()
            .join("\n");
        messages.push(format!(
            "Successfully uploaded {} PDF(s):\n{}",
            response.summary.successful, lines
        ));
    }

    if response.summary.failed > 0 {
        let lines = response
            .results
            .iter()
            .filter(|r| r.status == UploadStatus::Error)
            .map(|r| {
                format!(
                    "• {}: {}",
                    r.filename,
                    r.message.as_deref().unwrap_or("unknown error")
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        messages.push(format!(
            "Failed to upload {} file(s):\n{}",
            response.summary.failed, lines
        ));
    }

    messages
}

/// Upload the selected files and render the outcome
///
/// An empty selection is rejected silently, with no request. Every
/// failure path ends in a rendered message; this function only returns
/// an error when rendering itself is impossible.
pub async fn upload_files(
    client: &ApiClient,
    renderer: &Renderer,
    paths: &[PathBuf],
) -> Result<()> {
    if paths.is_empty() {
        tracing::debug!("Empty upload selection, nothing to do");
        return Ok(());
    }

    renderer.status(&progress_text(paths.len()).blue().to_string());

    match run_upload(client, paths).await {
        Ok((outcome, messages)) => {
            renderer.upload_status(&outcome);
            for message in messages {
                renderer.message(Role::Assistant, &message, None);
            }
        }
        Err(err) => {
            renderer.status(&"✗ Upload failed".red().to_string());
            renderer.message(Role::Assistant, &format!("Upload failed: {}", err), None);
        }
    }

    Ok(())
}

async fn run_upload(
    client: &ApiClient,
    paths: &[PathBuf],
) -> Result<(UploadOutcome, Vec<String>)> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(read_upload_file(path).await?);
    }

    let response = client.upload(files).await.map_err(|err| match err {
        // A non-OK response surfaces its body text as the error, the way
        // the rest of the failure path reports descriptions.
        crate::api::ApiError::Status { body, .. } => anyhow!(body),
        crate::api::ApiError::Transport(inner) => anyhow!(inner.to_string()),
    })?;

    let outcome = UploadOutcome::classify(paths.len(), &response.summary);
    let messages = detail_messages(&response);
    Ok((outcome, messages))
}

async fn read_upload_file(path: &Path) -> Result<UploadFile> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| anyhow!("{}: not a file path", path.display()))?;

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|err| anyhow!("{}: {}", path.display(), err))?;

    Ok(UploadFile { filename, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::UploadFileResult;

    fn summary(total: usize, successful: usize, failed: usize, chunks: u64) -> UploadSummary {
        UploadSummary {
            total_files: total,
            successful,
            failed,
            total_chunks_ingested: chunks,
        }
    }

    #[test]
    fn test_classify_all_successful() {
        let outcome = UploadOutcome::classify(2, &summary(2, 2, 0, 31));
        assert_eq!(
            outcome,
            UploadOutcome::Success {
                files: 2,
                chunks: 31
            }
        );
    }

    #[test]
    fn test_classify_partial() {
        let outcome = UploadOutcome::classify(3, &summary(3, 2, 1, 20));
        assert_eq!(
            outcome,
            UploadOutcome::Partial {
                successful: 2,
                total: 3
            }
        );
    }

    #[test]
    fn test_classify_all_failed() {
        let outcome = UploadOutcome::classify(3, &summary(3, 0, 3, 0));
        assert_eq!(outcome, UploadOutcome::Failure);
    }

    #[test]
    fn test_progress_text_singular_plural() {
        assert_eq!(progress_text(1), "Uploading...");
        assert_eq!(progress_text(3), "Uploading 3 files...");
    }

    fn mixed_response() -> UploadResponse {
        UploadResponse {
            summary: summary(3, 2, 1, 25),
            results: vec![
                UploadFileResult {
                    filename: "a.pdf".to_string(),
                    status: UploadStatus::Success,
                    chunks_ingested: Some(10),
                    message: None,
                },
                UploadFileResult {
                    filename: "b.pdf".to_string(),
                    status: UploadStatus::Success,
                    chunks_ingested: Some(15),
                    message: None,
                },
                UploadFileResult {
                    filename: "c.txt".to_string(),
                    status: UploadStatus::Error,
                    chunks_ingested: None,
                    message: Some("Only PDF files are allowed".to_string()),
                },
            ],
        }
    }

    #[test]
    fn test_detail_messages_mixed_batch_has_exactly_two() {
        let messages = detail_messages(&mixed_response());
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages[0],
            "Successfully uploaded 2 PDF(s):\n• a.pdf: 10 chunks\n• b.pdf: 15 chunks"
        );
        assert_eq!(
            messages[1],
            "Failed to upload 1 file(s):\n• c.txt: Only PDF files are allowed"
        );
    }

    #[test]
    fn test_detail_messages_all_successful_has_one() {
        let response = UploadResponse {
            summary: summary(1, 1, 0, 10),
            results: vec![UploadFileResult {
                filename: "a.pdf".to_string(),
                status: UploadStatus::Success,
                chunks_ingested: Some(10),
                message: None,
            }],
        };
        let messages = detail_messages(&response);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Successfully uploaded 1 PDF(s):"));
    }

    #[test]
    fn test_detail_messages_all_failed_has_one() {
        let response = UploadResponse {
            summary: summary(1, 0, 1, 0),
            results: vec![UploadFileResult {
                filename: "a.pdf".to_string(),
                status: UploadStatus::Error,
                chunks_ingested: None,
                message: Some("corrupt file".to_string()),
            }],
        };
        let messages = detail_messages(&response);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0], "Failed to upload 1 file(s):\n• a.pdf: corrupt file");
    }
}

//! Error types for chatpdf
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for chatpdf operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, local state persistence, and file handling.
/// HTTP dispatch has its own error taxonomy in [`crate::api::ApiError`]
/// because the command layer needs to tell status errors apart from
/// transport failures when rendering them.
#[derive(Error, Debug)]
pub enum ChatPdfError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Local state persistence errors (state file read/write)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for chatpdf operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

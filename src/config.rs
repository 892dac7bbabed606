//! Configuration management for chatpdf
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ChatPdfError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Main configuration structure for chatpdf
///
/// This structure holds everything the client needs: where the
/// question-answering backend lives and how the interactive UI behaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Interactive UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Backend server configuration
///
/// The backend exposes the `/v1/ask`, `/v1/history`, `/v1/clear_memory`,
/// `/v1/clear_vectorstore`, and `/v1/upload` endpoints this client consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the backend server
    #[serde(default = "default_base_url")]
    pub base_url: Url,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> Url {
    // Infallible: the literal is a valid URL.
    Url::parse("http://localhost:8000").unwrap_or_else(|_| unreachable!())
}

fn default_timeout() -> u64 {
    120
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Interactive UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Replay server-side history when entering or switching a chat
    #[serde(default = "default_history_on_start")]
    pub history_on_start: bool,
}

fn default_history_on_start() -> bool {
    true
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            history_on_start: default_history_on_start(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Returns
    ///
    /// Returns the loaded and merged configuration
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed, or
    /// if an override contains an invalid value
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars()?;
        config.apply_cli_overrides(cli)?;

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ChatPdfError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ChatPdfError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) -> Result<()> {
        if let Ok(base_url) = std::env::var("CHATPDF_SERVER_URL") {
            self.server.base_url = Url::parse(&base_url).map_err(|e| {
                ChatPdfError::Config(format!("Invalid CHATPDF_SERVER_URL: {}", e))
            })?;
        }

        if let Ok(timeout) = std::env::var("CHATPDF_TIMEOUT_SECONDS") {
            self.server.timeout_seconds = timeout.parse().map_err(|e| {
                ChatPdfError::Config(format!("Invalid CHATPDF_TIMEOUT_SECONDS: {}", e))
            })?;
        }

        Ok(())
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) -> Result<()> {
        if let Some(server) = &cli.server {
            self.server.base_url = Url::parse(server)
                .map_err(|e| ChatPdfError::Config(format!("Invalid --server URL: {}", e)))?;
        }

        Ok(())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        let scheme = self.server.base_url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(ChatPdfError::Config(format!(
                "Server URL scheme must be http or https, got: {}",
                scheme
            ))
            .into());
        }

        if self.server.timeout_seconds == 0 {
            return Err(
                ChatPdfError::Config("timeout_seconds must be greater than 0".to_string()).into(),
            );
        }

        if self.server.timeout_seconds > 600 {
            return Err(ChatPdfError::Config(
                "timeout_seconds must be less than or equal to 600".to_string(),
            )
            .into());
        }

        Ok(())
    }
}

//! One-shot PDF upload handler

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::render::Renderer;
use std::path::PathBuf;

/// Upload the given files for ingestion
///
/// An empty selection exits silently without a request, matching the
/// upload handler's contract.
pub async fn run_upload(config: Config, files: Vec<PathBuf>) -> Result<()> {
    let client = ApiClient::new(&config.server)?;
    let renderer = Renderer::new();

    crate::upload::upload_files(&client, &renderer, &files).await
}

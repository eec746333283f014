//! Multipart upload command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use vibes_http::{FilePayload, ProgressFn};

use crate::output;

#[derive(Args, Debug)]
pub struct UploadArgs {
    /// Upload endpoint path (e.g., /uploads)
    pub path: String,

    /// File to send
    pub file: PathBuf,

    /// Content type of the file part
    #[arg(long)]
    pub content_type: Option<String>,
}

pub async fn run(api_url: &str, args: UploadArgs) -> Result<()> {
    let client = super::connect(api_url).await?;

    let mut payload = FilePayload::from_path(&args.file)
        .await
        .context("Failed to read file")?;
    if let Some(content_type) = args.content_type {
        payload = payload.with_content_type(content_type);
    }

    let label = payload.file_name.clone();
    let on_progress: ProgressFn = Arc::new(move |percent| output::progress(&label, percent));

    let response: Value = client
        .upload_file(&args.path, payload, Some(on_progress))
        .await
        .context("Upload failed")?;

    output::json_pretty(&response)
}

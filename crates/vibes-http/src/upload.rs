//! Multipart uploads with progress reporting.

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use reqwest::Body;
use reqwest::multipart::{Form, Part};

use vibes_core::Result;
use vibes_core::error::InvalidInputError;

use crate::request::{FilePayload, ProgressFn};

/// Multipart field name carrying the file.
pub const FILE_FIELD: &str = "file";

/// Bytes handed to the transport per progress event.
const CHUNK_SIZE: usize = 64 * 1024;

/// Upload progress as a percentage, `None` when the total is unknown.
pub fn progress_percent(sent: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some((sent as f64 / total as f64 * 100.0).min(100.0))
}

/// Wrap `on_progress` so it only ever sees increasing percentages.
///
/// A call that is reissued after a token refresh streams the body again;
/// the replayed events are swallowed instead of reported as a restart.
pub(crate) fn forward_only(on_progress: ProgressFn) -> ProgressFn {
    let high = Mutex::new(None::<f64>);
    Arc::new(move |percent: f64| {
        let mut high = high.lock().unwrap_or_else(|e| e.into_inner());
        if high.is_some_and(|h| percent <= h) {
            return;
        }
        *high = Some(percent);
        drop(high);
        on_progress(percent);
    })
}

/// Build the multipart form for `file`.
///
/// The file is streamed in fixed-size chunks; as each chunk is handed to the
/// transport the callback receives the running percentage.
pub(crate) fn progress_form(file: &FilePayload, on_progress: Option<ProgressFn>) -> Result<Form> {
    let total = file.len() as u64;
    let data = file.data.clone();

    let stream = async_stream::stream! {
        let mut sent = 0usize;
        while sent < data.len() {
            let end = (sent + CHUNK_SIZE).min(data.len());
            let chunk: Bytes = data.slice(sent..end);
            sent = end;

            if let Some(callback) = on_progress.as_ref() {
                if let Some(percent) = progress_percent(sent as u64, total) {
                    callback(percent);
                }
            }
            yield Ok::<Bytes, std::io::Error>(chunk);
        }
    };

    let mut part = Part::stream_with_length(Body::wrap_stream(stream), total)
        .file_name(file.file_name.clone());
    if let Some(content_type) = &file.content_type {
        part = part
            .mime_str(content_type)
            .map_err(|e| InvalidInputError::Other {
                message: format!("invalid upload content type '{}': {}", content_type, e),
            })?;
    }

    Ok(Form::new().part(FILE_FIELD, part))
}

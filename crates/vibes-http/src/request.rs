//! Outgoing request descriptors.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use vibes_core::Result;
use vibes_core::error::InvalidInputError;

/// Upload progress callback, called with a percentage in `[0, 100]`.
pub type ProgressFn = Arc<dyn Fn(f64) + Send + Sync>;

/// HTTP methods the client issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_reqwest().as_str())
    }
}

/// A file sent as the `file` field of a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FilePayload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data: data.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read a file from disk, naming the part after the file.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await.map_err(|e| InvalidInputError::Other {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, data))
    }

    /// Total payload size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Body of an outgoing request.
#[derive(Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Structured data, sent as JSON.
    Json(serde_json::Value),
    /// Raw bytes with an optional content type.
    Bytes {
        data: Bytes,
        content_type: Option<String>,
    },
    /// A multipart file upload.
    Multipart {
        file: FilePayload,
        on_progress: Option<ProgressFn>,
    },
}

impl RequestBody {
    /// Serialize structured data into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let value = serde_json::to_value(value).map_err(|e| InvalidInputError::Other {
            message: format!("request body is not serializable: {}", e),
        })?;
        Ok(Self::Json(value))
    }

    /// Whether the body is a raw binary or multipart payload.
    ///
    /// Binary bodies never receive the `application/json` default.
    pub fn is_binary(&self) -> bool {
        matches!(self, RequestBody::Bytes { .. } | RequestBody::Multipart { .. })
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        RequestBody::Json(value)
    }
}

impl From<Option<serde_json::Value>> for RequestBody {
    fn from(value: Option<serde_json::Value>) -> Self {
        value.map_or(RequestBody::Empty, RequestBody::Json)
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestBody::Empty => f.write_str("Empty"),
            RequestBody::Json(_) => f.write_str("Json(..)"),
            RequestBody::Bytes { data, content_type } => f
                .debug_struct("Bytes")
                .field("len", &data.len())
                .field("content_type", content_type)
                .finish(),
            RequestBody::Multipart { file, on_progress } => f
                .debug_struct("Multipart")
                .field("file_name", &file.file_name)
                .field("len", &file.len())
                .field("on_progress", &on_progress.is_some())
                .finish(),
        }
    }
}

/// Per-call overrides.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers; an explicit `Content-Type` here wins over the default.
    pub headers: HeaderMap,
    /// Cancels the call, including any refresh and retry it triggers.
    pub cancel: Option<CancellationToken>,
    /// Overrides the client's default timeout for each dispatch.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| InvalidInputError::Header {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        self.headers.insert(header_name, header_value(name, value)?);
        Ok(self)
    }

    pub fn cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A complete request, kept intact so it can be reissued after a refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL.
    pub path: String,
    pub body: RequestBody,
    pub options: RequestOptions,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: RequestBody::Empty,
            options: RequestOptions::default(),
        }
    }

    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = body.into();
        self
    }

    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

/// Encode a header value, reporting the header name on failure.
pub(crate) fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        InvalidInputError::Header {
            name: name.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn binary_bodies() {
        assert!(!RequestBody::Empty.is_binary());
        assert!(!RequestBody::Json(json!({})).is_binary());
        assert!(
            RequestBody::Bytes {
                data: Bytes::from_static(b"abc"),
                content_type: None
            }
            .is_binary()
        );
        assert!(
            RequestBody::Multipart {
                file: FilePayload::new("a.txt", "abc"),
                on_progress: None
            }
            .is_binary()
        );
    }

    #[test]
    fn json_body_from_struct() {
        #[derive(Serialize)]
        struct Ping {
            count: u32,
        }
        let body = RequestBody::json(&Ping { count: 2 }).unwrap();
        match body {
            RequestBody::Json(value) => assert_eq!(value, json!({"count": 2})),
            other => panic!("unexpected body {:?}", other),
        }
    }

    #[test]
    fn options_reject_invalid_header_value() {
        assert!(RequestOptions::new().header("x-trace", "line\nbreak").is_err());
        assert!(RequestOptions::new().header("bad header", "v").is_err());
        let options = RequestOptions::new().header("x-trace", "abc").unwrap();
        assert_eq!(options.headers.get("x-trace").unwrap(), "abc");
    }

    #[test]
    fn body_debug_hides_contents() {
        let body = RequestBody::Json(json!({"password": "hunter2"}));
        assert!(!format!("{:?}", body).contains("hunter2"));
    }
}

//! Raw HTTP transport.
//!
//! The transport knows nothing about tokens or refresh: it sends exactly the
//! headers it is given and returns the status and body of whatever came back.

use std::time::Duration;

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use tracing::{debug, trace};

use vibes_core::error::InvalidInputError;
use vibes_core::{ApiUrl, Error, Result};

use crate::error::transport_error;
use crate::request::{ApiRequest, RequestBody};
use crate::upload::progress_form;

/// A response as received, before status handling.
#[derive(Debug)]
pub(crate) struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// reqwest-backed transport bound to one base URL.
#[derive(Debug, Clone)]
pub(crate) struct HttpTransport {
    client: reqwest::Client,
    base: ApiUrl,
    default_timeout: Option<Duration>,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client, base: ApiUrl, default_timeout: Option<Duration>) -> Self {
        Self {
            client,
            base,
            default_timeout,
        }
    }

    pub fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Send `request` with `headers`, honouring its cancellation token.
    pub async fn execute(&self, request: &ApiRequest, mut headers: HeaderMap) -> Result<RawResponse> {
        let url = self.base.endpoint(&request.path)?;
        debug!(method = %request.method, %url, "dispatching request");

        if matches!(request.body, RequestBody::Multipart { .. }) {
            // reqwest writes the boundary-carrying content type itself
            headers.remove(CONTENT_TYPE);
        }

        let mut builder = self
            .client
            .request(request.method.as_reqwest(), &url)
            .headers(headers);

        if let Some(timeout) = request.options.timeout.or(self.default_timeout) {
            builder = builder.timeout(timeout);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => {
                let body = serde_json::to_vec(value).map_err(|e| InvalidInputError::Other {
                    message: format!("request body is not serializable: {}", e),
                })?;
                builder.body(body)
            }
            RequestBody::Bytes { data, .. } => builder.body(data.clone()),
            RequestBody::Multipart { file, on_progress } => {
                builder.multipart(progress_form(file, on_progress.clone())?)
            }
        };

        let exchange = async {
            let response = builder.send().await.map_err(transport_error)?;
            let status = response.status();
            let body = response.bytes().await.map_err(transport_error)?;
            trace!(%status, len = body.len(), "response received");
            Ok::<_, Error>(RawResponse { status, body })
        };

        match &request.options.cancel {
            Some(cancel) => {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        debug!(%url, "request cancelled");
                        Err(Error::Cancelled)
                    }
                    result = exchange => result,
                }
            }
            None => exchange.await,
        }
    }
}

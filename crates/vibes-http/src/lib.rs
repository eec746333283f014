//! vibes-http - Authenticated HTTP client for the VibesBNB API.
//!
//! [`ApiClient`] attaches the bearer token and JSON content type to every
//! call and transparently recovers from one expired access token per call by
//! refreshing it and retrying.

mod client;
mod error;
pub mod middleware;
pub mod request;
mod signup;
mod transport;
pub mod upload;

pub use client::{ApiClient, ApiClientBuilder, REFRESH_PATH};
pub use request::{ApiRequest, FilePayload, Method, ProgressFn, RequestBody, RequestOptions};

pub use tokio_util::sync::CancellationToken;

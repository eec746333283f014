//! Subcommand implementations.

pub mod request;
pub mod session;
pub mod signup;
pub mod upload;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use vibes_core::ApiUrl;
use vibes_http::ApiClient;

use crate::session::{CliNavigator, FileCredentialStore};

/// Build a client backed by the on-disk session.
pub(crate) async fn connect(api_url: &str) -> Result<ApiClient> {
    let base = ApiUrl::new(api_url).context("Invalid API URL")?;
    let store = FileCredentialStore::default_location()?;

    let client = ApiClient::builder(base)
        .store(Arc::new(store))
        .navigator(Arc::new(CliNavigator))
        .build()
        .context("Failed to create API client")?;

    let restored = client
        .restore_session()
        .await
        .context("Failed to load session")?;
    debug!(restored, "client ready");

    Ok(client)
}

//! Authenticated API client.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use vibes_core::error::{RefreshFailedError, StatusError, TransportError};
use vibes_core::{
    AccessToken, ApiUrl, CredentialKey, CredentialStore, Error, ErrorKind, MemoryCredentialStore,
    Navigator, NoopNavigator, RefreshToken, Result,
};

use crate::error::transport_error;
use crate::middleware::attach_auth_headers;
use crate::request::{
    ApiRequest, FilePayload, Method, ProgressFn, RequestBody, RequestOptions, header_value,
};
use crate::transport::{HttpTransport, RawResponse};
use crate::upload::forward_only;

/// Path of the token refresh endpoint, relative to the API base URL.
pub const REFRESH_PATH: &str = "/auth/refresh";

/// Response from the refresh endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshResponse {
    access_token: String,
    /// Present when the server rotates refresh tokens.
    #[serde(default)]
    refresh_token: Option<String>,
}

/// HTTP client for the VibesBNB API.
///
/// Every call is stamped with the in-memory bearer token (if one is set) and
/// defaults to a JSON content type. A call rejected with HTTP 401 triggers
/// one refresh through `POST /auth/refresh` using the persisted refresh
/// token; on success the original request is reissued once with the new
/// token and the caller never sees the 401. On refresh failure the persisted
/// credentials are cleared, the [`Navigator`] is told to leave the
/// authenticated area, and [`Error::RefreshFailed`] is returned.
///
/// # Thread Safety
///
/// Clients are cheap to clone (they use internal `Arc`) and safe to share
/// across tasks. Concurrent 401s each run their own refresh; the last token
/// written wins.
///
/// # Example
///
/// ```no_run
/// use vibes_core::{AccessToken, ApiUrl};
/// use vibes_http::{ApiClient, RequestOptions};
///
/// # async fn example() -> Result<(), vibes_core::Error> {
/// let client = ApiClient::new(ApiUrl::new("https://api.vibesbnb.com")?)?;
/// client.set_token(Some(AccessToken::new("access-token")));
///
/// let me: serde_json::Value = client.get("/users/me", RequestOptions::new()).await?;
/// println!("{}", me);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: HttpTransport,
    token: RwLock<Option<AccessToken>>,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

/// Builder for [`ApiClient`].
pub struct ApiClientBuilder {
    base: ApiUrl,
    store: Option<Arc<dyn CredentialStore>>,
    navigator: Option<Arc<dyn Navigator>>,
    timeout: Option<Duration>,
    user_agent: String,
}

impl ApiClientBuilder {
    /// Persisted credential store; defaults to an in-memory store.
    pub fn store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Receiver of the logout signal; defaults to a no-op.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Default per-dispatch timeout, overridable per call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let client = reqwest::Client::builder()
            .user_agent(self.user_agent)
            .build()
            .map_err(transport_error)?;

        Ok(ApiClient {
            inner: Arc::new(ClientInner {
                transport: HttpTransport::new(client, self.base, self.timeout),
                token: RwLock::new(None),
                store: self
                    .store
                    .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
                navigator: self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
            }),
        })
    }
}

impl ApiClient {
    /// Create a client with an in-memory store and no navigator.
    pub fn new(base: ApiUrl) -> Result<Self> {
        Self::builder(base).build()
    }

    /// Create a client for the URL in `VIBES_API_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(ApiUrl::from_env()?)
    }

    pub fn builder(base: ApiUrl) -> ApiClientBuilder {
        ApiClientBuilder {
            base,
            store: None,
            navigator: None,
            timeout: None,
            user_agent: concat!("vibes/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base_url(&self) -> &ApiUrl {
        self.inner.transport.base()
    }

    /// Replace the in-memory bearer token.
    pub fn set_token(&self, token: Option<AccessToken>) {
        let mut slot = self.inner.token.write().unwrap_or_else(|e| e.into_inner());
        *slot = token;
    }

    /// Snapshot of the in-memory bearer token.
    pub fn token(&self) -> Option<AccessToken> {
        let slot = self.inner.token.read().unwrap_or_else(|e| e.into_inner());
        slot.clone()
    }

    /// Load the persisted access token into the in-memory slot.
    ///
    /// Returns whether a token was found.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Result<bool> {
        let token = self.inner.store.get(CredentialKey::AccessToken).await?;
        let found = token.is_some();
        self.set_token(token.map(AccessToken::new));
        debug!(found, "restored session from credential store");
        Ok(found)
    }

    /// Forget the session: clears the store and the in-memory token.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.inner.store.clear().await?;
        self.set_token(None);
        info!("logged out");
        Ok(())
    }

    /// `GET` a path and decode the JSON response.
    pub async fn get<R: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<R> {
        self.request(ApiRequest::new(Method::Get, path).options(options))
            .await
    }

    /// `POST` a body to a path and decode the JSON response.
    pub async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
        options: RequestOptions,
    ) -> Result<R> {
        self.request(ApiRequest::new(Method::Post, path).body(body).options(options))
            .await
    }

    /// `PUT` a body to a path and decode the JSON response.
    pub async fn put<R: DeserializeOwned>(
        &self,
        path: &str,
        body: impl Into<RequestBody>,
        options: RequestOptions,
    ) -> Result<R> {
        self.request(ApiRequest::new(Method::Put, path).body(body).options(options))
            .await
    }

    /// `DELETE` a path and decode the JSON response.
    pub async fn delete<R: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<R> {
        self.request(ApiRequest::new(Method::Delete, path).options(options))
            .await
    }

    /// Upload a file as multipart form data (field `file`).
    ///
    /// `on_progress` receives a percentage in `[0, 100]` as the body is
    /// sent; it is never called for an empty file. Reported values only
    /// increase, including when the upload is reissued after a refresh.
    pub async fn upload_file<R: DeserializeOwned>(
        &self,
        path: &str,
        file: FilePayload,
        on_progress: Option<ProgressFn>,
    ) -> Result<R> {
        let body = RequestBody::Multipart { file, on_progress };
        self.request(ApiRequest::new(Method::Post, path).body(body))
            .await
    }

    /// Issue a request and decode the response body.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request<R: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<R> {
        if let RequestBody::Multipart {
            on_progress: Some(on_progress),
            ..
        } = &mut request.body
        {
            *on_progress = forward_only(on_progress.clone());
        }
        let response = self.send(&request).await?;
        decode(&response)
    }

    /// Dispatch with the current token; on an expired token, refresh once
    /// and retry.
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse> {
        let token = self.token();
        match self.dispatch(request, token.as_ref()).await {
            Err(err) if err.kind() == ErrorKind::AuthExpired => {
                self.retry_on_auth_expiry(request, err).await
            }
            outcome => outcome,
        }
    }

    /// One pass through the header transform and the transport.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: Option<&AccessToken>,
    ) -> Result<RawResponse> {
        let headers = attach_auth_headers(request, token)?;
        let response = self.inner.transport.execute(request, headers).await?;

        if response.status.is_success() {
            Ok(response)
        } else {
            Err(StatusError::from_body(response.status.as_u16(), &response.body).into())
        }
    }

    async fn retry_on_auth_expiry(&self, request: &ApiRequest, expired: Error) -> Result<RawResponse> {
        let refresh_token = self.inner.store.get(CredentialKey::RefreshToken).await?;
        let Some(refresh_token) = refresh_token.map(RefreshToken::new) else {
            debug!("no refresh token stored, giving up on expired access token");
            return Err(expired);
        };

        info!("access token rejected, refreshing");
        let refreshed = match self
            .refresh(&refresh_token, &request.options)
            .await
        {
            Ok(refreshed) => refreshed,
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(err) => return Err(self.end_session(err).await),
        };

        let access_token = AccessToken::new(refreshed.access_token);
        self.inner
            .store
            .set(CredentialKey::AccessToken, access_token.as_str())
            .await?;
        if let Some(rotated) = refreshed.refresh_token.as_deref() {
            self.inner
                .store
                .set(CredentialKey::RefreshToken, rotated)
                .await?;
        }
        self.set_token(Some(access_token.clone()));

        debug!("retrying request with refreshed token");
        self.dispatch(request, Some(&access_token)).await
    }

    /// Call the refresh endpoint, bypassing the in-memory token and the
    /// retry decorator. The caller's cancellation and timeout apply.
    async fn refresh(
        &self,
        refresh_token: &RefreshToken,
        caller: &RequestOptions,
    ) -> Result<RefreshResponse> {
        let mut options = RequestOptions::new();
        options.headers.insert(
            AUTHORIZATION,
            header_value(AUTHORIZATION.as_str(), &refresh_token.bearer())?,
        );
        options.cancel = caller.cancel.clone();
        options.timeout = caller.timeout;

        let request = ApiRequest::new(Method::Post, REFRESH_PATH).options(options);
        let response = self.dispatch(&request, None).await?;
        let refreshed: RefreshResponse = decode(&response)?;

        if refreshed.access_token.is_empty() {
            return Err(TransportError::Decode {
                message: "refresh response carried an empty accessToken".to_string(),
            }
            .into());
        }
        Ok(refreshed)
    }

    /// Tear down the session after a failed refresh.
    async fn end_session(&self, cause: Error) -> Error {
        warn!(error = %cause, "token refresh failed, clearing session");

        if let Err(e) = self.inner.store.clear().await {
            warn!(error = %e, "failed to clear persisted credentials");
        }
        self.set_token(None);
        self.inner.navigator.redirect_unauthenticated();

        RefreshFailedError::new(cause).into()
    }
}

/// Decode a 2xx body; an empty body decodes as JSON `null`.
fn decode<R: DeserializeOwned>(response: &RawResponse) -> Result<R> {
    let body: &[u8] = if response.body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        &response.body
    };

    serde_json::from_slice(body).map_err(|e| {
        TransportError::Decode {
            message: e.to_string(),
        }
        .into()
    })
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", self.base_url())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

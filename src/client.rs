//! Authenticated client facade for the ReaQta-Hive API.
//!
//! `HiveClient` owns the HTTP transport and the latest [`Credential`]
//! snapshot, and funnels every resource method (see the `endpoints`,
//! `alerts`, `policies`, `groups`, and `files` modules) through the
//! signing pipeline in [`crate::auth`].
//!
//! Credential lifecycle:
//! - Lazy acquisition: the first signed call finds no cached token and
//!   triggers an authentication round-trip.
//! - Expiry-aware: a token inside the 1-second safety margin is refreshed
//!   before the request goes out.
//! - Idempotent overwrite: every successful signed call stores the
//!   credential returned by the pipeline, whether or not a refresh
//!   actually happened.
//!
//! The mutex around the credential guards only the snapshot read and
//! write — never a network round-trip. Two concurrent calls that both
//! observe a stale token will both refresh; the last writer wins. The
//! token is the only shared state, so the duplicate refresh is wasteful
//! but harmless.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::auth::{self, Credential};
use crate::error::Result;
use crate::request::RequestSpec;
use crate::response::HiveResponse;

/// Connect timeout for the underlying HTTP client. Covers TCP + TLS
/// handshake only; the overall request timeout is configurable because
/// file downloads may legitimately run for minutes.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for a [`HiveClient`].
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// The id of your external application.
    pub app_id: String,
    /// The secret key of your external application.
    pub app_secret: String,
    /// The URL, including any path prefix, of the Hive API.
    pub base_url: String,
    /// Overall per-request timeout. `None` leaves requests unbounded,
    /// which is appropriate when large file downloads are expected.
    pub timeout: Option<Duration>,
    /// When `true`, TLS certificate verification is disabled. Useful for
    /// appliances with self-signed certificates; never use it against a
    /// host you do not control.
    pub insecure: bool,
}

impl ApiConfig {
    /// Creates a configuration with no request timeout and TLS
    /// verification enabled.
    pub fn new(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            base_url: base_url.into(),
            timeout: None,
            insecure: false,
        }
    }

    /// Sets the overall per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables TLS certificate verification.
    pub fn insecure(mut self) -> Self {
        self.insecure = true;
        self
    }
}

/// Authenticated client for the ReaQta-Hive REST API.
///
/// Cloning is cheap: clones share the transport and the credential
/// snapshot.
///
/// ```no_run
/// use reaqta_hive::{ApiConfig, HiveClient, Query};
///
/// # async fn example() -> reaqta_hive::Result<()> {
/// let client = HiveClient::new(ApiConfig::new(
///     "my-app-id",
///     "my-app-secret",
///     "https://hive.example.com/rqt-api",
/// ))?;
/// let alerts = client.search_alerts(Query::new()).await?;
/// println!("{}", alerts.data());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HiveClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: String,
    credential: Mutex<Credential>,
}

impl HiveClient {
    /// Creates a client with no cached token; the first signed call
    /// authenticates.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let credential = Credential::new(&config.app_id, &config.app_secret);
        Self::with_credential(config, credential)
    }

    /// Creates a client seeded with an existing credential.
    ///
    /// Used by tests to start from a preset token (skipping the
    /// `/1/authenticate` mock) or from a deliberately stale token.
    pub fn with_credential(config: ApiConfig, credential: Credential) -> Result<Self> {
        let mut builder = reqwest::Client::builder().connect_timeout(CONNECT_TIMEOUT);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if config.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder.build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url,
                credential: Mutex::new(credential),
            }),
        })
    }

    /// A snapshot of the current credential state.
    pub async fn credential(&self) -> Credential {
        self.inner.credential.lock().await.clone()
    }

    /// Runs one call through the signing pipeline and persists the updated
    /// credential. The lock is held only to read and to write the
    /// snapshot, never across the round-trip.
    async fn signed_raw(&self, url: &str, spec: &RequestSpec) -> Result<reqwest::Response> {
        let snapshot = self.inner.credential.lock().await.clone();
        let (response, updated) =
            auth::sign_and_execute(&self.inner.http, &self.inner.base_url, url, snapshot, spec)
                .await?;
        *self.inner.credential.lock().await = updated;
        Ok(response)
    }

    /// Executes a signed request and wraps the buffered JSON response.
    ///
    /// This is the escape hatch for API paths without a dedicated resource
    /// method; `url` may be a path relative to the configured base URL or
    /// a fully-qualified URL (as pagination locators are). An empty
    /// response body (e.g. from a 204) wraps as JSON `null`.
    pub async fn signed_request(&self, url: &str, spec: RequestSpec) -> Result<HiveResponse> {
        let response = self.signed_raw(url, &spec).await?;
        let headers = response.headers().clone();
        let bytes = response.bytes().await?;
        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(HiveResponse::new(data, headers, self))
    }

    /// Executes a signed request and returns the response with its body
    /// unread, for the streaming download path.
    pub(crate) async fn signed_request_streaming(
        &self,
        url: &str,
        spec: RequestSpec,
    ) -> Result<reqwest::Response> {
        self.signed_raw(url, &spec.streaming()).await
    }
}

//! JWT lifecycle and request signing for the Hive API.
//!
//! Three layers, composed bottom-up:
//!
//! 1. [`ensure_valid_credential`] — the token manager. Returns the
//!    credential unchanged when its token is still valid (no remote call),
//!    otherwise fetches a fresh JWT from `POST /1/authenticate`.
//! 2. [`execute_authenticated`] — the executor. Attaches
//!    `Authorization: Bearer <token>` to an outbound call, after merging
//!    caller-supplied headers so the bearer header can never be shadowed.
//! 3. [`sign_and_execute`] — the orchestrator. Refreshes *then* executes
//!    (executing first would risk sending an expired token), normalizes
//!    non-success statuses into [`HiveError::Api`], and returns the
//!    response together with the possibly-updated credential so the caller
//!    can persist the new token state.
//!
//! Credentials are immutable values: refreshing produces a new
//! [`Credential`] rather than mutating in place, and the token/expiry pair
//! is always replaced together. The facade in [`crate::client`] holds only
//! the latest snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{HiveError, Result};
use crate::request::RequestSpec;

/// Safety margin subtracted from the token expiry when judging validity.
///
/// A token that expires within the next second is treated as already
/// expired, so it cannot lapse in flight between the local check and its
/// arrival at the API.
const TOKEN_EXPIRY_MARGIN_MS: i64 = 1000;

/// A bearer token and its absolute expiry, always carried as a pair.
///
/// Keeping both fields in one struct makes the pairing structural: there
/// is no way to update the token without its expiry.
#[derive(Clone)]
pub struct BearerToken {
    /// The JWT issued by the authentication endpoint.
    pub token: String,
    /// Absolute instant at which the API will stop accepting the token.
    pub expires_at: DateTime<Utc>,
}

/// Application identity plus the current token snapshot.
///
/// Cloned out of the facade for each signed call; the updated value
/// returned by [`sign_and_execute`] replaces the facade's snapshot.
#[derive(Clone)]
pub struct Credential {
    /// The id of the external application.
    pub app_id: String,
    /// The secret key of the external application.
    pub app_secret: String,
    bearer: Option<BearerToken>,
}

impl Credential {
    /// Creates a credential with no cached token. The first signed call
    /// will trigger an authentication round-trip.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            bearer: None,
        }
    }

    /// Creates a credential with a pre-set token, bypassing the
    /// authentication endpoint. Used by tests to avoid mocking
    /// `/1/authenticate` in every flow test.
    pub fn with_token(
        app_id: impl Into<String>,
        app_secret: impl Into<String>,
        token: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: app_secret.into(),
            bearer: Some(BearerToken {
                token: token.into(),
                expires_at,
            }),
        }
    }

    /// The current token, if one is cached. Makes no validity judgement.
    pub fn token(&self) -> Option<&str> {
        self.bearer.as_ref().map(|b| b.token.as_str())
    }

    /// The expiry of the current token, if one is cached.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.bearer.as_ref().map(|b| b.expires_at)
    }

    /// Returns `true` when the token is absent or expires within the
    /// safety margin of `now`.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        match &self.bearer {
            None => true,
            Some(bearer) => {
                bearer.expires_at - Duration::milliseconds(TOKEN_EXPIRY_MARGIN_MS) < now
            }
        }
    }

    fn with_bearer(&self, bearer: BearerToken) -> Self {
        Self {
            app_id: self.app_id.clone(),
            app_secret: self.app_secret.clone(),
            bearer: Some(bearer),
        }
    }
}

/// Body sent to the authentication endpoint.
#[derive(Serialize)]
struct AuthRequest<'a> {
    id: &'a str,
    secret: &'a str,
}

/// Subset of the authentication response that we need.
///
/// `expiresAt` comes over the wire as seconds since the epoch and is
/// decoded straight into an absolute instant.
#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    #[serde(rename = "expiresAt", with = "chrono::serde::ts_seconds")]
    expires_at: DateTime<Utc>,
}

/// Joins a path onto the configured base URL, passing absolute URLs
/// through untouched (pagination locators come back fully qualified).
pub(crate) fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Maps a non-success response into [`HiveError::Api`], preserving the
/// body. Success responses pass through with the body unread, so the
/// streaming download path stays unbuffered.
pub(crate) async fn into_api_result(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().to_string();
    let text = response.text().await?;
    let data = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Err(HiveError::Api { status, url, data })
}

/// Fetches a fresh JWT from `POST /1/authenticate`.
async fn fetch_token(
    http: &reqwest::Client,
    base_url: &str,
    credential: &Credential,
) -> Result<BearerToken> {
    let url = resolve_url(base_url, "/1/authenticate");
    let body = AuthRequest {
        id: &credential.app_id,
        secret: &credential.app_secret,
    };

    let response = http.post(&url).json(&body).send().await?;
    let response = into_api_result(response).await?;

    let text = response.text().await?;
    let auth: AuthResponse = serde_json::from_str(&text)?;

    debug!(expires_at = %auth.expires_at, "acquired fresh API token");
    Ok(BearerToken {
        token: auth.token,
        expires_at: auth.expires_at,
    })
}

/// Returns a credential that is valid for immediate use.
///
/// The cheap path — token present and outside the expiry margin — resolves
/// without any remote call. Otherwise a single authentication round-trip
/// produces a new token/expiry pair, combined with the original identity
/// fields into a new credential. A failed fetch propagates unchanged; no
/// local recovery is attempted.
pub async fn ensure_valid_credential(
    http: &reqwest::Client,
    base_url: &str,
    credential: Credential,
) -> Result<Credential> {
    if !credential.needs_refresh(Utc::now()) {
        return Ok(credential);
    }
    debug!("token missing or near expiry, re-authenticating");
    let bearer = fetch_token(http, base_url, &credential).await?;
    Ok(credential.with_bearer(bearer))
}

/// Executes one call with the given bearer token attached.
///
/// Caller headers from the spec are merged first; the Authorization header
/// is set afterwards so a colliding caller header cannot override it. The
/// method defaults to GET via [`RequestSpec::default`], and query pairs go
/// out in repeated-key form. The response body is not touched here, which
/// is what lets `stream`-flagged requests stay unbuffered.
pub async fn execute_authenticated(
    http: &reqwest::Client,
    base_url: &str,
    url: &str,
    token: &str,
    spec: &RequestSpec,
) -> Result<reqwest::Response> {
    let full_url = resolve_url(base_url, url);
    let mut request = http.request(spec.method.clone(), &full_url);

    if !spec.query.is_empty() {
        request = request.query(spec.query.pairs());
    }
    for (name, value) in &spec.headers {
        request = request.header(name, value);
    }
    request = request.bearer_auth(token);
    if let Some(body) = &spec.body {
        request = request.json(body);
    }

    debug!(method = %spec.method, url = %full_url, stream = spec.stream, "executing signed request");
    Ok(request.send().await?)
}

/// Signs and executes one call: refresh, then execute, then normalize.
///
/// The two steps are strictly sequential — the token obtained by the
/// refresh is the one attached to the request. Returns the normalized
/// response and the (possibly refreshed) credential as a pair so the
/// facade can persist the updated snapshot.
pub async fn sign_and_execute(
    http: &reqwest::Client,
    base_url: &str,
    url: &str,
    credential: Credential,
    spec: &RequestSpec,
) -> Result<(reqwest::Response, Credential)> {
    let credential = ensure_valid_credential(http, base_url, credential).await?;
    let token = credential
        .token()
        .map(str::to_owned)
        .ok_or_else(|| HiveError::Auth {
            message: "token missing after refresh".to_string(),
        })?;

    let response = execute_authenticated(http, base_url, url, &token, spec).await?;
    let response = into_api_result(response).await?;
    Ok((response, credential))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh(expires_in_ms: i64) -> Credential {
        Credential::with_token(
            "app",
            "secret",
            "jwt-token",
            Utc::now() + Duration::milliseconds(expires_in_ms),
        )
    }

    #[test]
    fn missing_token_needs_refresh() {
        let cred = Credential::new("app", "secret");
        assert!(cred.needs_refresh(Utc::now()));
        assert!(cred.token().is_none());
    }

    #[test]
    fn token_within_margin_needs_refresh() {
        // Expires in 500ms: inside the 1s safety margin, so treated as stale
        // even though it has not technically expired yet.
        let cred = fresh(500);
        assert!(cred.needs_refresh(Utc::now()));
    }

    #[test]
    fn token_outside_margin_is_valid() {
        let cred = fresh(60_000);
        assert!(!cred.needs_refresh(Utc::now()));
        assert_eq!(cred.token(), Some("jwt-token"));
    }

    #[test]
    fn expired_token_needs_refresh() {
        let cred = fresh(-5_000);
        assert!(cred.needs_refresh(Utc::now()));
    }

    #[test]
    fn auth_response_decodes_epoch_seconds() {
        let json = r#"{"token": "abc.def.ghi", "expiresAt": 1767225600}"#;
        let auth: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(auth.token, "abc.def.ghi");
        assert_eq!(auth.expires_at.timestamp(), 1767225600);
    }

    #[test]
    fn resolve_url_joins_paths_and_passes_absolute_through() {
        assert_eq!(
            resolve_url("https://hive.example.com/api/", "/1/endpoints"),
            "https://hive.example.com/api/1/endpoints"
        );
        assert_eq!(
            resolve_url("https://hive.example.com", "1/alerts"),
            "https://hive.example.com/1/alerts"
        );
        let absolute = "https://hive.example.com/1/endpoints?page=2";
        assert_eq!(resolve_url("https://other.example.com", absolute), absolute);
    }

    #[test]
    fn with_bearer_replaces_token_and_expiry_together() {
        let stale = fresh(-1_000);
        let expires_at = Utc::now() + Duration::minutes(10);
        let updated = stale.with_bearer(BearerToken {
            token: "new-token".to_string(),
            expires_at,
        });
        assert_eq!(updated.token(), Some("new-token"));
        assert_eq!(updated.expires_at(), Some(expires_at));
        // Identity fields carry over untouched.
        assert_eq!(updated.app_id, "app");
        assert_eq!(updated.app_secret, "secret");
    }
}

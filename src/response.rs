//! Wrapper for Hive API responses with pagination continuation.
//!
//! Paginated Hive payloads carry a `result` array plus two continuation
//! fields: `remainingItems` (how many items exist beyond this page) and
//! `nextPage` (an opaque, fully-qualified URL for the following page). A
//! [`HiveResponse`] decides at construction whether a continuation exists —
//! both fields are required, either alone is insufficient — and exposes it
//! through [`HiveResponse::fetch_next_page`], whose absence is observable
//! as `None` rather than a no-op.
//!
//! Fetching the next page re-enters the facade's signing pipeline, so a
//! continuation fetched hours later still arrives with a valid token.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::HiveClient;
use crate::error::Result;
use crate::request::RequestSpec;

/// A wrapped API response: payload, headers, and an optional continuation.
pub struct HiveResponse {
    data: Value,
    headers: HeaderMap,
    next_page: Option<NextPage>,
}

/// The continuation capability: a client handle to sign the follow-up
/// request and the locator to send it to.
struct NextPage {
    client: HiveClient,
    url: String,
}

/// Extracts the next-page locator from a payload, applying the gating
/// rule: `remainingItems` must be positive AND `nextPage` must be a
/// non-empty string.
pub(crate) fn next_page_locator(data: &Value) -> Option<&str> {
    let remaining = data.get("remainingItems").and_then(Value::as_i64).unwrap_or(0);
    if remaining <= 0 {
        return None;
    }
    match data.get("nextPage").and_then(Value::as_str) {
        Some(url) if !url.is_empty() => Some(url),
        _ => None,
    }
}

impl HiveResponse {
    /// Wraps a payload, capturing the continuation if the gating rule
    /// passes. The client handle is what lets the continuation go back
    /// through the signing pipeline.
    pub(crate) fn new(data: Value, headers: HeaderMap, client: &HiveClient) -> Self {
        let next_page = next_page_locator(&data).map(|url| NextPage {
            client: client.clone(),
            url: url.to_string(),
        });
        Self {
            data,
            headers,
            next_page,
        }
    }

    /// Wraps a locally-synthesized payload with no headers and no
    /// continuation. Used for pagination aggregates and download metadata.
    pub(crate) fn synthesized(data: Value) -> Self {
        Self {
            data,
            headers: HeaderMap::new(),
            next_page: None,
        }
    }

    /// The payload of the API response.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Consumes the wrapper, returning the payload.
    pub fn into_data(self) -> Value {
        self.data
    }

    /// The HTTP headers of the API response.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Deserializes the payload into a caller-chosen type.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.data.clone())?)
    }

    /// Whether a next page of results exists.
    pub fn has_next_page(&self) -> bool {
        self.next_page.is_some()
    }

    /// The locator for the next page of results, if one exists.
    pub fn next_page_url(&self) -> Option<&str> {
        self.next_page.as_ref().map(|n| n.url.as_str())
    }

    /// Requests the next page of results through the signing pipeline.
    ///
    /// Returns `None` when no continuation exists — check with
    /// [`has_next_page`](Self::has_next_page) or match on the option;
    /// there is no empty-result stub to call.
    pub async fn fetch_next_page(&self) -> Option<Result<HiveResponse>> {
        let next = self.next_page.as_ref()?;
        Some(next.client.signed_request(&next.url, RequestSpec::get()).await)
    }
}

impl std::fmt::Debug for HiveResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiveResponse")
            .field("data", &self.data)
            .field("has_next_page", &self.has_next_page())
            .finish()
    }
}

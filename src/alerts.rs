//! Alert resource methods.
//!
//! Covers the "Alert" resource family of the Hive API:
//!
//! | Method | API Path |
//! |--------|----------|
//! | [`HiveClient::search_alerts`] | GET `/1/alerts` |
//! | [`HiveClient::get_alert`] | GET `/1/alert/{id}` |
//! | [`HiveClient::close_alert_as_benign`] | POST `/1/alert/{id}/close?malicious=false` |
//! | [`HiveClient::close_alert_as_malicious`] | POST `/1/alert/{id}/close?malicious=true` |
//! | [`HiveClient::add_tag_to_alert`] | POST `/1/alert/{id}/tags/{tag}` |
//! | [`HiveClient::remove_tag_from_alert`] | DELETE `/1/alert/{id}/tags/{tag}` |
//! | [`HiveClient::add_notes_to_alert`] | POST `/1/alert/{id}/notes` |

use serde_json::json;

use crate::client::HiveClient;
use crate::error::Result;
use crate::request::{Query, RequestSpec};
use crate::response::HiveResponse;

impl HiveClient {
    /// Searches alerts by arbitrary criteria (consult the Hive API
    /// documentation for supported parameters).
    pub async fn search_alerts(&self, params: Query) -> Result<HiveResponse> {
        self.signed_request("/1/alerts", RequestSpec::get().query(params))
            .await
    }

    /// Gets the details of a single alert.
    pub async fn get_alert(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/alert/{id}"), RequestSpec::get())
            .await
    }

    /// Closes an alert as a false positive.
    pub async fn close_alert_as_benign(&self, id: &str) -> Result<HiveResponse> {
        self.close_alert(id, false).await
    }

    /// Closes an alert as a true positive.
    pub async fn close_alert_as_malicious(&self, id: &str) -> Result<HiveResponse> {
        self.close_alert(id, true).await
    }

    async fn close_alert(&self, id: &str, malicious: bool) -> Result<HiveResponse> {
        let mut params = Query::new();
        params.push("malicious", malicious);
        self.signed_request(
            &format!("/1/alert/{id}/close"),
            RequestSpec::post().query(params),
        )
        .await
    }

    /// Adds a tag to an alert. The tag travels in the URL path, so it is
    /// percent-encoded automatically when it contains spaces.
    pub async fn add_tag_to_alert(&self, id: &str, tag: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/alert/{id}/tags/{tag}"), RequestSpec::post())
            .await
    }

    /// Removes a tag from an alert.
    pub async fn remove_tag_from_alert(&self, id: &str, tag: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/alert/{id}/tags/{tag}"), RequestSpec::delete())
            .await
    }

    /// Attaches a free-text note to an alert.
    ///
    /// The body shape is `{"content": <note>}`.
    pub async fn add_notes_to_alert(&self, id: &str, content: &str) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/alert/{id}/notes"),
            RequestSpec::post().body(json!({ "content": content })),
        )
        .await
    }
}

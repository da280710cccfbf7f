//! Endpoint-group resource methods.
//!
//! Covers the "Endpoint Group" resource family of the Hive API, including
//! the MSSP client-management endpoints (group creation with a license,
//! license updates):
//!
//! | Method | API Path |
//! |--------|----------|
//! | [`HiveClient::search_groups`] | GET `/1/endpoint-groups` |
//! | [`HiveClient::get_group`] | GET `/1/endpoint-group/{id}` |
//! | [`HiveClient::create_group`] | POST `/1/endpoint-group` |
//! | [`HiveClient::delete_group`] | DELETE `/1/endpoint-group/{id}` |
//! | [`HiveClient::add_endpoints_to_group`] | POST `/1/endpoint-group/{id}/add-endpoints` |
//! | [`HiveClient::remove_endpoints_from_group`] | POST `/1/endpoint-group/{id}/remove-endpoints` |
//! | [`HiveClient::update_client_license`] | POST `/1/endpoint-group/{id}/license` |

use serde::Serialize;

use crate::client::HiveClient;
use crate::error::Result;
use crate::request::{Query, RequestSpec};
use crate::response::HiveResponse;

/// Endpoint-count limits attached to an MSSP client license.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseLimit {
    /// Maximum number of mobile endpoints covered.
    pub max_mobile_endpoint_count: u64,
    /// Maximum number of endpoints covered.
    pub max_endpoint_count: u64,
}

/// A license for an MSSP client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientLicense {
    /// ISO 8601 date string describing when the license expires.
    pub expiration: String,
    /// Endpoint limits for this license.
    pub limit: LicenseLimit,
}

/// Details for the group you wish to create.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupCreateOptions {
    /// The name of the group.
    pub name: String,
    /// Optional description of the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The id of the client to which the group belongs, when adding a
    /// group under an MSSP client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_group: Option<String>,
    /// The license for this client, when adding an MSSP client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<ClientLicense>,
}

impl GroupCreateOptions {
    /// Creates group details with only the required name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            parent_group: None,
            license: None,
        }
    }
}

impl HiveClient {
    /// Searches groups by arbitrary criteria (consult the Hive API
    /// documentation for supported parameters).
    pub async fn search_groups(&self, params: Query) -> Result<HiveResponse> {
        self.signed_request("/1/endpoint-groups", RequestSpec::get().query(params))
            .await
    }

    /// Gets the details of a single group.
    pub async fn get_group(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/endpoint-group/{id}"), RequestSpec::get())
            .await
    }

    /// Creates an endpoint group, or an MSSP client subgroup when
    /// `parent_group`/`license` are set.
    pub async fn create_group(&self, details: GroupCreateOptions) -> Result<HiveResponse> {
        self.signed_request(
            "/1/endpoint-group",
            RequestSpec::post().body(serde_json::to_value(&details)?),
        )
        .await
    }

    /// Deletes a group.
    pub async fn delete_group(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/endpoint-group/{id}"), RequestSpec::delete())
            .await
    }

    /// Adds endpoints to a group. The body is the bare array of endpoint
    /// ids, matching the wire contract.
    pub async fn add_endpoints_to_group(
        &self,
        id: &str,
        endpoint_ids: &[String],
    ) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/endpoint-group/{id}/add-endpoints"),
            RequestSpec::post().body(serde_json::to_value(endpoint_ids)?),
        )
        .await
    }

    /// Removes endpoints from a group.
    pub async fn remove_endpoints_from_group(
        &self,
        id: &str,
        endpoint_ids: &[String],
    ) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/endpoint-group/{id}/remove-endpoints"),
            RequestSpec::post().body(serde_json::to_value(endpoint_ids)?),
        )
        .await
    }

    /// Updates the license for an MSSP client.
    pub async fn update_client_license(
        &self,
        id: &str,
        license: ClientLicense,
    ) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/endpoint-group/{id}/license"),
            RequestSpec::post().body(serde_json::to_value(&license)?),
        )
        .await
    }
}

//! Policy resource methods.
//!
//! Covers the "Policy" resource family of the Hive API:
//!
//! | Method | API Path |
//! |--------|----------|
//! | [`HiveClient::search_policies`] | GET `/1/policies` |
//! | [`HiveClient::get_policy`] | GET `/1/policy/{id}` |
//! | [`HiveClient::enable_policy`] | POST `/1/policy/{id}/enable` |
//! | [`HiveClient::disable_policy`] | POST `/1/policy/{id}/disable` |
//! | [`HiveClient::create_trigger_on_process_hash`] | POST `/1/policy/trigger-on-process-hash` |
//!
//! Enable/disable take their options as query parameters; the `groupIds`
//! array goes out in repeated-key form (`groupIds=a&groupIds=b`), which is
//! the only encoding the API accepts.

use serde::Serialize;

use crate::client::HiveClient;
use crate::error::Result;
use crate::request::{Query, RequestSpec};
use crate::response::HiveResponse;

/// Options for enabling or disabling a policy.
#[derive(Debug, Clone, Default)]
pub struct PolicyToggleOptions {
    /// The last version id of the policy you are toggling. When present,
    /// used by the API for optimistic concurrency control.
    pub previous_version_id: Option<String>,
    /// For group policies, the groups on which to apply the toggle.
    pub group_ids: Option<Vec<String>>,
}

impl PolicyToggleOptions {
    fn into_query(self) -> Query {
        let mut params = Query::new();
        if let Some(version) = self.previous_version_id {
            params.push("previousVersionId", version);
        }
        if let Some(group_ids) = self.group_ids {
            params.push_all("groupIds", group_ids);
        }
        params
    }
}

/// Details for a blacklist policy triggered on a process hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOnProcessHash {
    /// The title of the policy.
    pub title: String,
    /// The sha256 hash to trigger on.
    pub sha256: String,
    /// Optional description of the policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether to block processes with this hash from running.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<bool>,
    /// Whether to create the policy in a disabled state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable: Option<bool>,
    /// For group policies, groups on which to enable this policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled_groups: Option<Vec<String>>,
    /// For group policies, groups on which to disable this policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_groups: Option<Vec<String>>,
}

impl TriggerOnProcessHash {
    /// Creates trigger details with only the required fields set.
    pub fn new(title: impl Into<String>, sha256: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sha256: sha256.into(),
            description: None,
            block: None,
            disable: None,
            enabled_groups: None,
            disabled_groups: None,
        }
    }
}

impl HiveClient {
    /// Searches policies by arbitrary criteria (consult the Hive API
    /// documentation for supported parameters).
    pub async fn search_policies(&self, params: Query) -> Result<HiveResponse> {
        self.signed_request("/1/policies", RequestSpec::get().query(params))
            .await
    }

    /// Gets the details of a single policy.
    pub async fn get_policy(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/policy/{id}"), RequestSpec::get())
            .await
    }

    /// Enables a policy.
    pub async fn enable_policy(
        &self,
        id: &str,
        options: PolicyToggleOptions,
    ) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/policy/{id}/enable"),
            RequestSpec::post().query(options.into_query()),
        )
        .await
    }

    /// Disables a policy.
    pub async fn disable_policy(
        &self,
        id: &str,
        options: PolicyToggleOptions,
    ) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/policy/{id}/disable"),
            RequestSpec::post().query(options.into_query()),
        )
        .await
    }

    /// Creates a blacklist policy for processes with a given sha256 hash.
    pub async fn create_trigger_on_process_hash(
        &self,
        details: TriggerOnProcessHash,
    ) -> Result<HiveResponse> {
        self.signed_request(
            "/1/policy/trigger-on-process-hash",
            RequestSpec::post().body(serde_json::to_value(&details)?),
        )
        .await
    }
}

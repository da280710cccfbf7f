//! Endpoint (managed device) resource methods.
//!
//! Covers the "Endpoint" resource family of the Hive API:
//!
//! | Method | API Path |
//! |--------|----------|
//! | [`HiveClient::search_endpoints`] | GET `/1/endpoints` |
//! | [`HiveClient::get_endpoint`] | GET `/1/endpoint/{id}` |
//! | [`HiveClient::get_endpoint_processes`] | GET `/1/endpoint/{id}/processes` |
//! | [`HiveClient::kill_endpoint_processes`] | POST `/1/endpoint/{id}/processes/kill` |
//! | [`HiveClient::isolate_endpoint`] | POST `/1/endpoint/{id}/isolate` |
//! | [`HiveClient::deisolate_endpoint`] | POST `/1/endpoint/{id}/deisolate` |
//!
//! Search results are paginated; pass the response to
//! [`crate::collect_page_results`] to drain every page.

use serde::Serialize;

use crate::client::HiveClient;
use crate::error::Result;
use crate::request::{Query, RequestSpec};
use crate::response::HiveResponse;

/// A running process to kill, identified by pid and start time. The start
/// time disambiguates pid reuse between the listing and the kill request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessToKill {
    /// Process id on the endpoint.
    pub pid: u32,
    /// Process start time, as reported by `get_endpoint_processes`.
    pub start_time: i64,
}

impl HiveClient {
    /// Searches endpoints by arbitrary criteria (consult the Hive API
    /// documentation for supported parameters).
    pub async fn search_endpoints(&self, params: Query) -> Result<HiveResponse> {
        self.signed_request("/1/endpoints", RequestSpec::get().query(params))
            .await
    }

    /// Gets the details of a single endpoint.
    pub async fn get_endpoint(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/endpoint/{id}"), RequestSpec::get())
            .await
    }

    /// Lists the running processes on an endpoint.
    pub async fn get_endpoint_processes(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/endpoint/{id}/processes"), RequestSpec::get())
            .await
    }

    /// Kills a set of running processes on an endpoint.
    pub async fn kill_endpoint_processes(
        &self,
        id: &str,
        processes: &[ProcessToKill],
    ) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/endpoint/{id}/processes/kill"),
            RequestSpec::post().body(serde_json::to_value(processes)?),
        )
        .await
    }

    /// Isolates an endpoint from the network.
    pub async fn isolate_endpoint(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/endpoint/{id}/isolate"), RequestSpec::post())
            .await
    }

    /// Releases an endpoint from isolation.
    pub async fn deisolate_endpoint(&self, id: &str) -> Result<HiveResponse> {
        self.signed_request(&format!("/1/endpoint/{id}/deisolate"), RequestSpec::post())
            .await
    }
}

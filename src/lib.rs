//! Async Rust client library for the ReaQta-Hive endpoint security API.
//!
//! Provides JWT authentication with expiry-aware refresh, a signed-request
//! pipeline, response wrapping with pagination continuation, streaming
//! file download, and a generic bounded retry helper.
//!
//! # Modules
//!
//! - [`auth`] — Credential type, token manager, executor, and signing orchestrator.
//! - [`client`] — Configuration and the `HiveClient` facade.
//! - [`error`] — Typed error hierarchy (`HiveError`) for all library operations.
//! - [`request`] — Per-call request description and query encoding.
//! - [`response`] — Response wrapper with pagination continuation.
//! - [`pagination`] — Greedy collection across all pages of a search.
//! - [`retry`] — Bounded retry for any asynchronous operation.
//! - [`file_utils`] — Filename resolution and stream piping.
//! - [`endpoints`], [`alerts`], [`policies`], [`groups`], [`files`] —
//!   resource methods on `HiveClient`, one family per module.
//!
//! # Quick Start
//!
//! ```no_run
//! use reaqta_hive::{ApiConfig, HiveClient, Query, collect_page_results};
//!
//! # async fn example() -> reaqta_hive::Result<()> {
//! let client = HiveClient::new(ApiConfig::new(
//!     "my-app-id",
//!     "my-app-secret",
//!     "https://hive.example.com/rqt-api",
//! ))?;
//!
//! let mut params = Query::new();
//! params.push("os", "windows");
//! let first_page = client.search_endpoints(params).await?;
//! let all = collect_page_results(first_page).await?;
//! println!("{}", all.data());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod alerts;
pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod file_utils;
pub mod files;
pub mod groups;
pub mod pagination;
pub mod policies;
pub mod request;
pub mod response;
pub mod retry;

pub use auth::{BearerToken, Credential};
pub use client::{ApiConfig, HiveClient};
pub use endpoints::ProcessToKill;
pub use error::{HiveError, Result};
pub use files::{DownloadOptions, DownloadedFile, Output};
pub use groups::{ClientLicense, GroupCreateOptions, LicenseLimit};
pub use pagination::collect_page_results;
pub use policies::{PolicyToggleOptions, TriggerOnProcessHash};
pub use request::{Query, RequestSpec};
pub use response::HiveResponse;
pub use retry::{retry, retry_if};

//! Typed error hierarchy for the reaqta-hive crate.
//!
//! `HiveError` gives every failure a category that callers can branch on
//! to decide remediation (re-authenticate, create the missing directory,
//! retry, give up). Variants map to real system boundaries:
//! - `Api` covers non-success responses from the Hive REST API.
//! - `Network` covers transport failures that never produced a status code.
//! - `Parse` covers unexpected response shapes.
//! - `Stream` covers failures while piping a file download.
//! - `OutputDirectoryNotFound` is raised locally, before any remote call.
//!
//! Errors are never swallowed inside the crate: they surface to the caller
//! as the `Err` arm of the crate-wide [`Result`] alias. The crate performs
//! no automatic retries — pair [`HiveError::is_retryable`] with
//! [`crate::retry::retry_if`] to add them at the call site.

use std::path::PathBuf;

use reqwest::StatusCode;
use serde_json::Value;

/// Unified error type for all reaqta-hive library operations.
///
/// The `#[source]` attribute on inner errors enables `Error::source()`
/// chaining so callers and logging frameworks can traverse the full cause
/// chain.
#[derive(Debug, thiserror::Error)]
pub enum HiveError {
    /// The Hive API returned a non-success HTTP status code.
    ///
    /// The response body is preserved as JSON (or as a JSON string when the
    /// body is not valid JSON) because Hive error responses carry diagnostic
    /// detail that `error_for_status()`-style handling would discard.
    #[error("API error {status} from {url}")]
    Api {
        /// The HTTP status code returned by the API.
        status: StatusCode,
        /// The URL of the failed request.
        url: String,
        /// The response body. JSON when the API returned JSON, otherwise a
        /// JSON string holding the raw body text.
        data: Value,
    },

    /// Authentication could not produce a usable token.
    ///
    /// HTTP and transport failures from the authentication endpoint are
    /// reported as [`HiveError::Api`] / [`HiveError::Network`] like any
    /// other call; this variant covers the internal invariant violation of
    /// a refresh completing without a token.
    #[error("authentication failed: {message}")]
    Auth {
        /// Human-readable description of the failure.
        message: String,
    },

    /// A transport-level failure (DNS, TCP, TLS, timeout) occurred.
    ///
    /// No HTTP status code is available because the request did not
    /// complete. The wrapped `reqwest::Error` carries the transport
    /// diagnostics.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON deserialization failed when parsing an API response body.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A failure occurred while streaming a file download.
    ///
    /// Wraps the triggering error — a transport failure while reading the
    /// body, or an I/O failure while writing to the destination.
    #[error("error while streaming file")]
    Stream {
        /// The original error that caused the stream to fail.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The download output directory does not exist.
    ///
    /// Detected locally before any remote call is made, so failing fast on
    /// this error costs no API round-trip.
    #[error("output directory not found: {path}")]
    OutputDirectoryNotFound {
        /// The directory path that was checked.
        path: PathBuf,
    },
}

impl HiveError {
    /// Returns `true` if this error is plausibly transient and the failed
    /// operation may succeed on retry.
    ///
    /// Transport failures, HTTP 429, and 5xx responses qualify. Client
    /// errors (4xx other than 429), parse failures, and local validation
    /// failures do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            HiveError::Network(_) => true,
            HiveError::Api { status, .. } => {
                *status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
            }
            _ => false,
        }
    }
}

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, HiveError>;

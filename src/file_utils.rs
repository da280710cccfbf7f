//! Filename resolution and stream piping for file downloads.
//!
//! Two independent helpers used by the download path in [`crate::files`]:
//!
//! - [`filename_from_headers`] picks an output filename: the quoted name
//!   in the `content-disposition` header, else a caller-supplied fallback,
//!   else a timestamped generic name.
//! - [`pipe_to_writer`] drains a streaming response body into any
//!   `AsyncWrite`, translating every failure into [`HiveError::Stream`].

use chrono::{SecondsFormat, Utc};
use futures_util::StreamExt;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::{HiveError, Result};

/// Prefix used for synthesized filenames when neither the headers nor the
/// caller provide one.
const GENERIC_FILENAME_PREFIX: &str = "reaqta-api-download-";

/// Matches the quoted filename in a content-disposition header, e.g.
/// `attachment; filename="explorer.exe"`.
static FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename="(.+)""#).expect("filename regex is valid"));

/// Resolves an output filename from HTTP response headers.
///
/// Resolution order:
/// 1. The quoted `filename="..."` portion of `content-disposition`.
/// 2. `fallback`, when supplied.
/// 3. A generic timestamped name: `reaqta-api-download-<ISO-8601>.bin`.
pub fn filename_from_headers(headers: &HeaderMap, fallback: Option<&str>) -> String {
    let from_header = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .and_then(|disposition| FILENAME_RE.captures(disposition))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string());

    if let Some(name) = from_header {
        return name;
    }
    if let Some(name) = fallback {
        return name.to_string();
    }
    format!(
        "{GENERIC_FILENAME_PREFIX}{}.bin",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Pipes a streaming response body into `writer`.
///
/// Resolves when the body completes naturally. Any failure — a transport
/// error while reading a chunk, or an I/O error while writing — is wrapped
/// in [`HiveError::Stream`] with the triggering error attached, and the
/// body stream is dropped, which terminates the underlying connection so
/// no further data flows after the error.
pub async fn pipe_to_writer<W>(response: reqwest::Response, writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut body = response.bytes_stream();

    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|err| HiveError::Stream {
            source: Box::new(err),
        })?;
        writer.write_all(&chunk).await.map_err(|err| HiveError::Stream {
            source: Box::new(err),
        })?;
    }

    writer.flush().await.map_err(|err| HiveError::Stream {
        source: Box::new(err),
    })
}

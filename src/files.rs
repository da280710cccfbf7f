//! Endpoint file retrieval: request, poll, and streaming download.
//!
//! Fetching a file from an endpoint is a three-step flow:
//!
//! 1. [`HiveClient::request_file`] — POST `/1/endpoint/{id}/request-file`
//!    with the remote path; the response carries an `uploadId`.
//! 2. [`HiveClient::get_file_status`] — GET `/1/endpoint-file/{uploadId}/status`
//!    until the file is available; the response carries a `downloadId`.
//! 3. [`HiveClient::download_file`] — GET `/1/endpoint-file/{downloadId}/download`
//!    as a stream, piped into the chosen [`Output`].
//!
//! The destination is an explicit tagged choice — a directory to create a
//! file in, or a writer the caller already owns — rather than anything
//! inferred from the value at runtime. A directory output is validated
//! before the download request is issued, so a bad path costs no API call.

use std::path::PathBuf;

use serde_json::json;
use tokio::io::AsyncWrite;
use tracing::debug;

use crate::client::HiveClient;
use crate::error::{HiveError, Result};
use crate::file_utils;
use crate::request::RequestSpec;
use crate::response::HiveResponse;

/// Destination for a file download.
pub enum Output {
    /// Write into a new file under this existing directory; the filename
    /// comes from the response headers or the caller override.
    Directory(PathBuf),
    /// Pipe into a writer the caller already owns (a file, a socket, an
    /// in-memory buffer). No path metadata is produced.
    Writer(Box<dyn AsyncWrite + Send + Unpin>),
}

/// Options for [`HiveClient::download_file`].
pub struct DownloadOptions {
    /// Where the file contents go. Defaults to the current directory.
    pub output: Output,
    /// Overrides the filename from the response headers.
    pub filename: Option<String>,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output: Output::Directory(PathBuf::from("./")),
            filename: None,
        }
    }
}

impl DownloadOptions {
    /// Downloads into a new file under `dir`.
    pub fn to_directory(dir: impl Into<PathBuf>) -> Self {
        Self {
            output: Output::Directory(dir.into()),
            filename: None,
        }
    }

    /// Pipes the download into `writer`.
    pub fn to_writer(writer: impl AsyncWrite + Send + Unpin + 'static) -> Self {
        Self {
            output: Output::Writer(Box::new(writer)),
            filename: None,
        }
    }

    /// Overrides the filename instead of resolving it from the response
    /// headers.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }
}

/// Metadata describing a completed download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    /// The resolved filename (header, caller override, or synthesized).
    pub filename: String,
    /// The path the file was written to. `None` when the destination was a
    /// caller-supplied writer.
    pub path: Option<PathBuf>,
}

impl HiveClient {
    /// Requests a file from an endpoint.
    ///
    /// The result payload carries an `uploadId` for use with
    /// [`get_file_status`](Self::get_file_status).
    pub async fn request_file(&self, id: &str, path: &str) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/endpoint/{id}/request-file"),
            RequestSpec::post().body(json!({ "path": path })),
        )
        .await
    }

    /// Checks whether a requested file is available for download.
    pub async fn get_file_status(&self, upload_id: &str) -> Result<HiveResponse> {
        self.signed_request(
            &format!("/1/endpoint-file/{upload_id}/status"),
            RequestSpec::get(),
        )
        .await
    }

    /// Downloads a requested file, streaming it into the chosen output.
    ///
    /// Resolves once the download completes, with metadata naming the
    /// resulting file. `path` is `None` when the output was a
    /// caller-supplied writer.
    ///
    /// # Errors
    ///
    /// - [`HiveError::OutputDirectoryNotFound`] — the directory output
    ///   does not exist; detected before any request is made.
    /// - [`HiveError::Api`] / [`HiveError::Network`] — the download
    ///   request itself failed.
    /// - [`HiveError::Stream`] — the transfer failed mid-flight (body
    ///   read, file creation, or write).
    pub async fn download_file(
        &self,
        download_id: &str,
        options: DownloadOptions,
    ) -> Result<DownloadedFile> {
        if let Output::Directory(dir) = &options.output {
            if !dir.is_dir() {
                return Err(HiveError::OutputDirectoryNotFound { path: dir.clone() });
            }
        }

        let response = self
            .signed_request_streaming(
                &format!("/1/endpoint-file/{download_id}/download"),
                RequestSpec::get(),
            )
            .await?;

        let filename = match options.filename {
            Some(name) => name,
            None => file_utils::filename_from_headers(response.headers(), None),
        };

        match options.output {
            Output::Directory(dir) => {
                let path = dir.join(&filename);
                debug!(path = %path.display(), "streaming download to file");
                let mut file =
                    tokio::fs::File::create(&path)
                        .await
                        .map_err(|err| HiveError::Stream {
                            source: Box::new(err),
                        })?;
                file_utils::pipe_to_writer(response, &mut file).await?;
                Ok(DownloadedFile {
                    filename,
                    path: Some(path),
                })
            }
            Output::Writer(mut writer) => {
                debug!("streaming download to caller-supplied writer");
                file_utils::pipe_to_writer(response, writer.as_mut()).await?;
                Ok(DownloadedFile {
                    filename,
                    path: None,
                })
            }
        }
    }
}

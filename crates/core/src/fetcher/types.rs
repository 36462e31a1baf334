//! Types for the fetch capability.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a fetcher implementation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The video identifier is unknown to the remote side.
    #[error("video not found: {0}")]
    VideoNotFound(String),

    /// The remote side refused or dropped the transfer.
    #[error("download failed: {reason}")]
    DownloadFailed { reason: String },

    /// The destination could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catch-all for implementation-specific failures.
    #[error("fetcher error: {0}")]
    Other(String),
}

impl FetchError {
    /// Creates a download-failed error.
    pub fn download_failed(reason: impl Into<String>) -> Self {
        Self::DownloadFailed {
            reason: reason.into(),
        }
    }
}

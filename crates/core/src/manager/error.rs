//! Error types for job admission and status queries.

use thiserror::Error;

use crate::fetcher::FetchError;
use crate::fingerprint::JobFingerprint;

/// Errors returned synchronously by job admission.
///
/// None of these leave a trace in the status table.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The requested range is empty or inverted.
    #[error("invalid range: end {end_ms} must be greater than start {start_ms}")]
    InvalidRange { start_ms: u64, end_ms: u64 },

    /// All concurrency slots are taken.
    #[error("queue is full: {max} jobs already running")]
    CapacityExceeded { max: usize },

    /// The requested format is not offered for this video.
    #[error("format {format} is not available")]
    FormatUnavailable { format: u32 },

    /// The fetch capability failed while resolving available formats.
    #[error("format lookup failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Errors returned by the status query surface.
#[derive(Debug, Error)]
pub enum StatusError {
    /// No job exists for the queried fingerprint.
    #[error("no job found for fingerprint {0}")]
    NotFound(JobFingerprint),
}

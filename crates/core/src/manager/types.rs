//! Core job tracking types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::fingerprint::JobFingerprint;

/// Caller-supplied parameters for one conversion request.
///
/// Immutable once a job is admitted; all fields participate in the job
/// fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Source format identifier, as reported by the fetch capability.
    pub format: u32,
    /// Range start in milliseconds.
    pub start_ms: u64,
    /// Range end in milliseconds (exclusive).
    pub end_ms: u64,
}

impl DownloadOptions {
    /// Length of the requested range in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Lifecycle state of a job.
///
/// States only move forward: `Downloading -> Converting -> Done`, with
/// `Error` reachable from either non-terminal state. `Done` and `Error` are
/// never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Downloading,
    Converting,
    Done,
    Error,
}

impl JobState {
    /// Returns the string representation for API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Downloading => "downloading",
            JobState::Converting => "converting",
            JobState::Done => "done",
            JobState::Error => "error",
        }
    }

    /// Whether no further transitions are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Done | JobState::Error)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: JobState) -> bool {
        matches!(
            (*self, next),
            (JobState::Downloading, JobState::Converting)
                | (JobState::Downloading, JobState::Error)
                | (JobState::Converting, JobState::Done)
                | (JobState::Converting, JobState::Error)
        )
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status record for one admitted job.
///
/// Created exactly once per fingerprint and kept for the lifetime of the
/// process; the query surface returns snapshots of this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStatus {
    /// Identity of the request this record tracks.
    pub fingerprint: JobFingerprint,
    /// Current lifecycle state.
    pub state: JobState,
    /// Location of the produced animation; set when the job reaches `Done`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<PathBuf>,
    /// Pipeline stage that failed; set when the job reaches `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<String>,
    /// When the job was admitted.
    pub created_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
}

impl JobStatus {
    pub(crate) fn new(fingerprint: JobFingerprint) -> Self {
        let now = Utc::now();
        Self {
            fingerprint,
            state: JobState::Downloading,
            artifact: None,
            failed_stage: None,
            created_at: now,
            updated_at: now,
        }
    }
}

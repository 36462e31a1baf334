//! Shared status table.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::fingerprint::JobFingerprint;

use super::types::{JobState, JobStatus};

/// Outcome of a first-writer-wins insert.
#[derive(Debug)]
pub enum InsertOutcome {
    /// A fresh record was created by this call.
    Created(JobStatus),
    /// Another writer got there first; their record is returned.
    Existing(JobStatus),
}

/// Synchronized map from fingerprint to status record.
///
/// All reads and writes to job state funnel through this type. Entries are
/// never removed for the lifetime of the process, and a record only ever
/// moves forward through the state machine.
#[derive(Debug, Clone, Default)]
pub struct StatusTable {
    inner: Arc<RwLock<HashMap<JobFingerprint, JobStatus>>>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the record for `fingerprint`, if any.
    pub async fn get(&self, fingerprint: &JobFingerprint) -> Option<JobStatus> {
        self.inner.read().await.get(fingerprint).cloned()
    }

    /// Number of records ever admitted.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Inserts a fresh `Downloading` record unless one already exists.
    ///
    /// The existence check and the insert happen under a single write lock,
    /// so exactly one of any number of concurrent callers creates the
    /// record.
    pub async fn insert_new(&self, fingerprint: JobFingerprint) -> InsertOutcome {
        let mut table = self.inner.write().await;
        match table.entry(fingerprint.clone()) {
            Entry::Occupied(entry) => InsertOutcome::Existing(entry.get().clone()),
            Entry::Vacant(entry) => {
                let status = JobStatus::new(fingerprint);
                entry.insert(status.clone());
                InsertOutcome::Created(status)
            }
        }
    }

    /// Moves the record forward to `next`.
    ///
    /// Transitions the state machine does not permit are dropped with a
    /// warning; a record never moves backwards or out of a terminal state.
    pub async fn advance(&self, fingerprint: &JobFingerprint, next: JobState) {
        let mut table = self.inner.write().await;
        let Some(status) = table.get_mut(fingerprint) else {
            warn!(%fingerprint, to = %next, "status update for unknown job dropped");
            return;
        };
        if !status.state.can_transition_to(next) {
            warn!(%fingerprint, from = %status.state, to = %next, "illegal status transition dropped");
            return;
        }
        status.state = next;
        status.updated_at = Utc::now();
    }

    /// Marks the job `Done`, recording where the artifact landed.
    pub async fn complete(&self, fingerprint: &JobFingerprint, artifact: PathBuf) {
        let mut table = self.inner.write().await;
        let Some(status) = table.get_mut(fingerprint) else {
            warn!(%fingerprint, "completion for unknown job dropped");
            return;
        };
        if !status.state.can_transition_to(JobState::Done) {
            warn!(%fingerprint, from = %status.state, "illegal completion dropped");
            return;
        }
        status.state = JobState::Done;
        status.artifact = Some(artifact);
        status.updated_at = Utc::now();
    }

    /// Marks the job `Error`, attributing the failing stage.
    pub async fn fail(&self, fingerprint: &JobFingerprint, stage: &str) {
        let mut table = self.inner.write().await;
        let Some(status) = table.get_mut(fingerprint) else {
            warn!(%fingerprint, stage, "failure for unknown job dropped");
            return;
        };
        if !status.state.can_transition_to(JobState::Error) {
            warn!(%fingerprint, from = %status.state, stage, "illegal failure transition dropped");
            return;
        }
        status.state = JobState::Error;
        status.failed_stage = Some(stage.to_string());
        status.updated_at = Utc::now();
    }
}

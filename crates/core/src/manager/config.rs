//! Configuration for the download manager.

use serde::{Deserialize, Serialize};

/// Configuration for job admission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Maximum number of pipeline executors running at once.
    ///
    /// Admission is strict: a request arriving while this many jobs are
    /// running is rejected, never queued.
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent_jobs: usize,
}

fn default_max_concurrent() -> usize {
    3
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: default_max_concurrent(),
        }
    }
}

impl ManagerConfig {
    /// Sets the concurrency ceiling.
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent_jobs = max;
        self
    }
}

//! Configuration for filesystem staging.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the scratch directory area.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagingConfig {
    /// Root under which per-job scratch directories are created.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Permissions for created directories (Unix only, octal).
    #[serde(default = "default_dir_mode")]
    pub directory_mode: u32,
}

fn default_root() -> PathBuf {
    std::env::temp_dir().join("gifsmith-staging")
}

fn default_dir_mode() -> u32 {
    0o755
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            directory_mode: default_dir_mode(),
        }
    }
}

impl StagingConfig {
    /// Sets the staging root.
    pub fn with_root(mut self, root: PathBuf) -> Self {
        self.root = root;
        self
    }
}

//! Scratch directory lifecycle.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::converter::FRAME_FILE_REGEX;

use super::config::StagingConfig;
use super::error::StagingError;

/// Manages per-job scratch directories under a configured root.
///
/// Directories are keyed by (video id, start, end) only — two jobs that
/// differ only in format share a key and must not run concurrently.
#[derive(Debug, Clone)]
pub struct FsStaging {
    config: StagingConfig,
}

impl FsStaging {
    /// Creates a staging area with the given configuration.
    pub fn new(config: StagingConfig) -> Self {
        Self { config }
    }

    /// Creates a staging area with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(StagingConfig::default())
    }

    /// Scratch path for a job.
    pub fn dir_for(&self, video_id: &str, start_ms: u64, end_ms: u64) -> PathBuf {
        self.config
            .root
            .join(video_id)
            .join(start_ms.to_string())
            .join(end_ms.to_string())
    }

    /// Removes any previous scratch directory for the key and recreates it
    /// empty.
    pub async fn prepare(
        &self,
        video_id: &str,
        start_ms: u64,
        end_ms: u64,
    ) -> Result<PathBuf, StagingError> {
        let dir = self.dir_for(video_id, start_ms, end_ms);

        match fs::remove_dir_all(&dir).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(StagingError::Prepare {
                    path: dir,
                    source: e,
                })
            }
        }

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StagingError::Prepare {
                path: dir.clone(),
                source: e,
            })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(self.config.directory_mode);
            fs::set_permissions(&dir, perms)
                .await
                .map_err(|e| StagingError::Prepare {
                    path: dir.clone(),
                    source: e,
                })?;
        }

        Ok(dir)
    }

    /// Deletes the intermediate numbered frame files, leaving the artifact
    /// and the directory in place. Returns how many files were removed.
    pub async fn remove_frames(&self, dir: &Path) -> Result<usize, StagingError> {
        let mut entries = fs::read_dir(dir).await.map_err(|e| StagingError::Cleanup {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StagingError::Cleanup {
                path: dir.to_path_buf(),
                source: e,
            })?
        {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if FRAME_FILE_REGEX.is_match(name) {
                fs::remove_file(entry.path())
                    .await
                    .map_err(|e| StagingError::Cleanup {
                        path: entry.path(),
                        source: e,
                    })?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}

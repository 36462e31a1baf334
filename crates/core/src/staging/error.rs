//! Error types for filesystem staging.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from scratch directory management.
#[derive(Debug, Error)]
pub enum StagingError {
    /// The scratch directory could not be wiped or recreated.
    #[error("failed to prepare scratch directory {path}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Intermediate frame files could not be removed.
    #[error("failed to clean frames in {path}: {source}")]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

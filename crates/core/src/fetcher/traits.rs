//! Trait definition for the fetch capability.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::manager::DownloadOptions;

use super::types::FetchError;

/// Capability that resolves a video identifier to its available formats and
/// downloads the bytes for a requested range.
///
/// The engine treats the remote side as opaque; implementations decide how
/// the bytes are obtained.
#[async_trait]
pub trait VideoFetcher: Send + Sync {
    /// Returns the name of this fetcher implementation, for logging.
    fn name(&self) -> &str;

    /// Lists the format identifiers offered for `video_id`.
    async fn available_formats(&self, video_id: &str) -> Result<Vec<u32>, FetchError>;

    /// Downloads the media for the requested range and format.
    ///
    /// `dest` is a path prefix inside the job's scratch directory; the
    /// implementation returns the path of the file it actually wrote.
    async fn download(
        &self,
        dest: &Path,
        video_id: &str,
        options: &DownloadOptions,
    ) -> Result<PathBuf, FetchError>;
}

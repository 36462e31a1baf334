//! Mock fetch capability for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::fetcher::{FetchError, VideoFetcher};
use crate::manager::DownloadOptions;

/// A recorded download for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedDownload {
    /// Video the download was requested for.
    pub video_id: String,
    /// Options the download was requested with.
    pub options: DownloadOptions,
    /// Destination prefix the caller passed in.
    pub dest: PathBuf,
    /// Whether the download succeeded.
    pub success: bool,
}

/// Mock implementation of the fetch capability.
///
/// Provides controllable behavior for testing:
/// - Per-video format lists plus a fallback default list
/// - Injectable next error
/// - Adjustable simulated transfer duration
/// - Recorded downloads for assertions
///
/// Successful downloads write a small placeholder file so downstream stages
/// have a real path to work with.
#[derive(Debug, Clone)]
pub struct MockVideoFetcher {
    formats: Arc<RwLock<HashMap<String, Vec<u32>>>>,
    default_formats: Arc<RwLock<Vec<u32>>>,
    downloads: Arc<RwLock<Vec<RecordedDownload>>>,
    next_error: Arc<RwLock<Option<FetchError>>>,
    next_download_error: Arc<RwLock<Option<FetchError>>>,
    download_duration_ms: Arc<RwLock<u64>>,
}

impl Default for MockVideoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockVideoFetcher {
    /// Create a new mock fetcher with no formats configured.
    pub fn new() -> Self {
        Self {
            formats: Arc::new(RwLock::new(HashMap::new())),
            default_formats: Arc::new(RwLock::new(Vec::new())),
            downloads: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            next_download_error: Arc::new(RwLock::new(None)),
            download_duration_ms: Arc::new(RwLock::new(0)),
        }
    }

    /// Set the format list for a specific video.
    pub async fn set_formats(&self, video_id: impl Into<String>, formats: Vec<u32>) {
        self.formats.write().await.insert(video_id.into(), formats);
    }

    /// Set the format list reported for videos without a specific entry.
    pub async fn set_default_formats(&self, formats: Vec<u32>) {
        *self.default_formats.write().await = formats;
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: FetchError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next download (and only the download) to fail.
    ///
    /// Unlike [`set_next_error`](Self::set_next_error), this is not consumed
    /// by format lookups, so admission succeeds and the failure lands in the
    /// pipeline's acquisition stage.
    pub async fn set_next_download_error(&self, error: FetchError) {
        *self.next_download_error.write().await = Some(error);
    }

    /// Set the simulated transfer duration.
    pub async fn set_download_duration(&self, duration: Duration) {
        *self.download_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Get all recorded downloads.
    pub async fn recorded_downloads(&self) -> Vec<RecordedDownload> {
        self.downloads.read().await.clone()
    }

    /// Get the number of downloads performed.
    pub async fn download_count(&self) -> usize {
        self.downloads.read().await.len()
    }

    async fn take_error(&self) -> Option<FetchError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl VideoFetcher for MockVideoFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn available_formats(&self, video_id: &str) -> Result<Vec<u32>, FetchError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        if let Some(formats) = self.formats.read().await.get(video_id) {
            return Ok(formats.clone());
        }

        Ok(self.default_formats.read().await.clone())
    }

    async fn download(
        &self,
        dest: &Path,
        video_id: &str,
        options: &DownloadOptions,
    ) -> Result<PathBuf, FetchError> {
        let injected = match self.take_error().await {
            Some(err) => Some(err),
            None => self.next_download_error.write().await.take(),
        };
        if let Some(err) = injected {
            self.downloads.write().await.push(RecordedDownload {
                video_id: video_id.to_string(),
                options: *options,
                dest: dest.to_path_buf(),
                success: false,
            });
            return Err(err);
        }

        let duration_ms = *self.download_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        let path = dest.with_extension("mp4");
        tokio::fs::write(&path, b"mock video content")
            .await
            .map_err(|e| FetchError::Io {
                path: path.clone(),
                source: e,
            })?;

        self.downloads.write().await.push(RecordedDownload {
            video_id: video_id.to_string(),
            options: *options,
            dest: dest.to_path_buf(),
            success: true,
        });

        Ok(path)
    }
}

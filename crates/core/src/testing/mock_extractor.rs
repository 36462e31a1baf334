//! Mock frame extractor for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{ConverterError, ExtractJob, ExtractResult, FrameExtractor};

/// Mock implementation of the frame extractor.
///
/// Successful extractions write the configured number of numbered frame
/// files into the job's working directory so assembly and cleanup have real
/// files to operate on.
#[derive(Debug, Clone)]
pub struct MockFrameExtractor {
    extractions: Arc<RwLock<Vec<ExtractJob>>>,
    next_error: Arc<RwLock<Option<ConverterError>>>,
    extract_duration_ms: Arc<RwLock<u64>>,
    frame_count: Arc<RwLock<usize>>,
}

impl Default for MockFrameExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFrameExtractor {
    /// Create a new mock extractor producing 10 frames per job.
    pub fn new() -> Self {
        Self {
            extractions: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            extract_duration_ms: Arc::new(RwLock::new(0)),
            frame_count: Arc::new(RwLock::new(10)),
        }
    }

    /// Configure the next extraction to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated extraction duration.
    pub async fn set_extract_duration(&self, duration: Duration) {
        *self.extract_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Set the number of frame files written per extraction.
    pub async fn set_frame_count(&self, count: usize) {
        *self.frame_count.write().await = count;
    }

    /// Get all recorded extraction jobs.
    pub async fn recorded_extractions(&self) -> Vec<ExtractJob> {
        self.extractions.read().await.clone()
    }

    /// Get the number of extractions performed.
    pub async fn extraction_count(&self) -> usize {
        self.extractions.read().await.len()
    }

    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl FrameExtractor for MockFrameExtractor {
    fn name(&self) -> &str {
        "mock"
    }

    async fn extract(&self, job: ExtractJob) -> Result<ExtractResult, ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.extractions.write().await.push(job.clone());

        let duration_ms = *self.extract_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        let frames = *self.frame_count.read().await;
        for i in 1..=frames {
            let path = job.work_dir.join(format!("frame{:05}.gif", i));
            tokio::fs::write(&path, b"mock frame").await?;
        }

        Ok(ExtractResult {
            frames: Some(frames),
            duration_ms,
        })
    }
}

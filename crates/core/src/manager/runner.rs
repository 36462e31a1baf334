//! Job admission and deduplication.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::info;

use crate::converter::{FrameExtractor, GifAssembler};
use crate::fetcher::VideoFetcher;
use crate::fingerprint::{fingerprint, JobFingerprint};
use crate::metrics;
use crate::pipeline::{Executor, PipelineJob};
use crate::staging::FsStaging;

use super::config::ManagerConfig;
use super::error::{RequestError, StatusError};
use super::table::{InsertOutcome, StatusTable};
use super::types::{DownloadOptions, JobStatus};

/// Admission controller and status surface for conversion jobs.
///
/// Owns the status table and the concurrency slots. One executor task is
/// spawned per admitted job and runs to completion or failure on its own;
/// callers never block on it.
pub struct DownloadManager<F, E, A>
where
    F: VideoFetcher + 'static,
    E: FrameExtractor + 'static,
    A: GifAssembler + 'static,
{
    config: ManagerConfig,
    fetcher: Arc<F>,
    table: StatusTable,
    slots: Arc<Semaphore>,
    executor: Arc<Executor<F, E, A>>,
}

impl<F, E, A> DownloadManager<F, E, A>
where
    F: VideoFetcher + 'static,
    E: FrameExtractor + 'static,
    A: GifAssembler + 'static,
{
    /// Creates a new manager around the injected capabilities.
    pub fn new(config: ManagerConfig, fetcher: F, extractor: E, assembler: A, staging: FsStaging) -> Self {
        let fetcher = Arc::new(fetcher);
        let table = StatusTable::new();
        let executor = Arc::new(Executor::new(
            Arc::clone(&fetcher),
            Arc::new(extractor),
            Arc::new(assembler),
            staging,
            table.clone(),
        ));
        let slots = Arc::new(Semaphore::new(config.max_concurrent_jobs));

        Self {
            config,
            fetcher,
            table,
            slots,
            executor,
        }
    }

    /// Requests a conversion job for `video_id` over the given range.
    ///
    /// Re-requests with an identical (video, format, range) tuple return the
    /// existing record without starting new work, whatever state that record
    /// is in — a previously failed job is never retried through this path.
    /// The returned record is a snapshot; poll [`status`](Self::status) for
    /// progress.
    pub async fn request_job(
        &self,
        video_id: &str,
        options: DownloadOptions,
    ) -> Result<JobStatus, RequestError> {
        if options.end_ms <= options.start_ms {
            metrics::JOBS_REJECTED.with_label_values(&["invalid_range"]).inc();
            return Err(RequestError::InvalidRange {
                start_ms: options.start_ms,
                end_ms: options.end_ms,
            });
        }

        // Reserve a slot before deciding anything else. The owned permit
        // travels into the executor task and frees the slot when the job
        // finishes; rejected and deduplicated requests drop it on return.
        let permit = match Arc::clone(&self.slots).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                metrics::JOBS_REJECTED.with_label_values(&["capacity"]).inc();
                return Err(RequestError::CapacityExceeded {
                    max: self.config.max_concurrent_jobs,
                });
            }
        };

        let fp = fingerprint(video_id, &options);
        if let Some(existing) = self.table.get(&fp).await {
            metrics::JOBS_DEDUPLICATED.inc();
            return Ok(existing);
        }

        let formats = self.fetcher.available_formats(video_id).await?;
        if !formats.contains(&options.format) {
            metrics::JOBS_REJECTED.with_label_values(&["format_unavailable"]).inc();
            return Err(RequestError::FormatUnavailable {
                format: options.format,
            });
        }

        let status = match self.table.insert_new(fp.clone()).await {
            InsertOutcome::Existing(status) => {
                // Lost the insert race to a concurrent identical request.
                metrics::JOBS_DEDUPLICATED.inc();
                return Ok(status);
            }
            InsertOutcome::Created(status) => status,
        };

        metrics::JOBS_ADMITTED.inc();
        info!(
            fingerprint = %fp,
            video_id,
            format = options.format,
            start_ms = options.start_ms,
            end_ms = options.end_ms,
            "job admitted"
        );

        let job = PipelineJob {
            fingerprint: fp,
            video_id: video_id.to_string(),
            options,
        };
        let executor = Arc::clone(&self.executor);
        tokio::spawn(async move {
            executor.run(job, permit).await;
        });

        Ok(status)
    }

    /// Looks up the current status of a job.
    pub async fn status(&self, fingerprint: &JobFingerprint) -> Result<JobStatus, StatusError> {
        self.table
            .get(fingerprint)
            .await
            .ok_or_else(|| StatusError::NotFound(fingerprint.clone()))
    }

    /// Number of pipeline executors currently running.
    pub fn running_jobs(&self) -> usize {
        self.config.max_concurrent_jobs - self.slots.available_permits()
    }

    /// Number of records in the status table.
    pub async fn tracked_jobs(&self) -> usize {
        self.table.len().await
    }
}

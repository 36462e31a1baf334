//! Pipeline executor implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::OwnedSemaphorePermit;
use tracing::{error, info};

use crate::converter::{
    AssembleJob, ConverterError, ExtractJob, FrameExtractor, GifAssembler,
};
use crate::fetcher::{FetchError, VideoFetcher};
use crate::fingerprint::JobFingerprint;
use crate::manager::{DownloadOptions, JobState, StatusTable};
use crate::metrics;
use crate::staging::{FsStaging, StagingError};

/// Error type for pipeline stages; names the stage that failed.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Scratch directory could not be prepared or cleaned.
    #[error("staging failed: {0}")]
    Staging(#[from] StagingError),

    /// Source acquisition failed.
    #[error("download failed: {0}")]
    Download(#[from] FetchError),

    /// Frame extraction failed.
    #[error("frame extraction failed: {0}")]
    Extraction(ConverterError),

    /// Animation assembly failed.
    #[error("assembly failed: {0}")]
    Assembly(ConverterError),
}

impl PipelineError {
    /// Short label of the failed stage, for status records and metrics.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Staging(_) => "staging",
            Self::Download(_) => "download",
            Self::Extraction(_) => "extraction",
            Self::Assembly(_) => "assembly",
        }
    }

    /// Combined tool output captured with the failure, if any.
    fn tool_output(&self) -> Option<&str> {
        match self {
            Self::Extraction(e) | Self::Assembly(e) => e.output(),
            _ => None,
        }
    }
}

/// One admitted unit of work.
#[derive(Debug, Clone)]
pub struct PipelineJob {
    /// Identity of the request; key into the status table.
    pub fingerprint: JobFingerprint,
    /// Remote video identifier.
    pub video_id: String,
    /// Caller-supplied range and format.
    pub options: DownloadOptions,
}

/// Drives one job through acquisition, extraction, assembly and cleanup,
/// committing each stage boundary to the shared status table.
pub struct Executor<F, E, A> {
    fetcher: Arc<F>,
    extractor: Arc<E>,
    assembler: Arc<A>,
    staging: FsStaging,
    table: StatusTable,
}

impl<F, E, A> Executor<F, E, A>
where
    F: VideoFetcher,
    E: FrameExtractor,
    A: GifAssembler,
{
    /// Creates an executor around the injected capabilities.
    pub fn new(
        fetcher: Arc<F>,
        extractor: Arc<E>,
        assembler: Arc<A>,
        staging: FsStaging,
        table: StatusTable,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            assembler,
            staging,
            table,
        }
    }

    /// Runs the job to completion or failure.
    ///
    /// The permit reserved at admission is held for the whole run and
    /// releases the concurrency slot when this returns. Failures land in
    /// the status record, never in a caller — the triggering request has
    /// long since returned.
    pub async fn run(&self, job: PipelineJob, _permit: OwnedSemaphorePermit) {
        let start = Instant::now();
        match self.execute(&job).await {
            Ok(artifact) => {
                self.table.complete(&job.fingerprint, artifact).await;
                metrics::PIPELINES_COMPLETED.inc();
                metrics::PIPELINE_DURATION
                    .with_label_values(&["done"])
                    .observe(start.elapsed().as_secs_f64());
                info!(fingerprint = %job.fingerprint, "job done");
            }
            Err(e) => {
                match e.tool_output() {
                    Some(output) => error!(
                        fingerprint = %job.fingerprint,
                        stage = e.stage(),
                        %e,
                        tool_output = output,
                        "pipeline stage failed"
                    ),
                    None => error!(
                        fingerprint = %job.fingerprint,
                        stage = e.stage(),
                        %e,
                        "pipeline stage failed"
                    ),
                }
                self.table.fail(&job.fingerprint, e.stage()).await;
                metrics::PIPELINES_FAILED
                    .with_label_values(&[e.stage()])
                    .inc();
                metrics::PIPELINE_DURATION
                    .with_label_values(&["error"])
                    .observe(start.elapsed().as_secs_f64());
            }
        }
    }

    async fn execute(&self, job: &PipelineJob) -> Result<PathBuf, PipelineError> {
        let dir = self
            .staging
            .prepare(&job.video_id, job.options.start_ms, job.options.end_ms)
            .await?;

        let source = self
            .fetcher
            .download(&dir.join(&job.video_id), &job.video_id, &job.options)
            .await?;

        self.table
            .advance(&job.fingerprint, JobState::Converting)
            .await;
        info!(fingerprint = %job.fingerprint, source = %source.display(), "source acquired, converting");

        self.extractor
            .extract(ExtractJob {
                source,
                work_dir: dir.clone(),
                start_ms: job.options.start_ms,
                end_ms: job.options.end_ms,
            })
            .await
            .map_err(PipelineError::Extraction)?;

        let assembled = self
            .assembler
            .assemble(AssembleJob {
                work_dir: dir.clone(),
                output_name: format!("{}.gif", job.video_id),
            })
            .await
            .map_err(PipelineError::Assembly)?;

        self.staging.remove_frames(&dir).await?;

        Ok(assembled.artifact)
    }
}

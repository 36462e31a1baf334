//! ImageMagick-based animation assembly.

use async_trait::async_trait;
use std::time::Instant;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::process::{check_binary, run_tool};
use super::traits::GifAssembler;
use super::types::{AssembleJob, AssembleResult};

/// Assembler backed by the ImageMagick `convert` binary.
pub struct MagickAssembler {
    config: ConverterConfig,
}

impl MagickAssembler {
    /// Creates a new assembler with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates an assembler with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Builds the convert argument list for one assembly.
    ///
    /// The frame glob is passed through literally; convert expands it
    /// itself against its working directory.
    fn build_args(&self, job: &AssembleJob) -> Vec<String> {
        vec![
            "-delay".to_string(),
            self.config.frame_delay_cs.to_string(),
            "-layers".to_string(),
            "OptimizeTransparency".to_string(),
            "frame*.gif".to_string(),
            job.output_name.clone(),
        ]
    }
}

#[async_trait]
impl GifAssembler for MagickAssembler {
    fn name(&self) -> &str {
        "imagemagick"
    }

    async fn assemble(&self, job: AssembleJob) -> Result<AssembleResult, ConverterError> {
        let start = Instant::now();
        let args = self.build_args(&job);
        let run = run_tool(
            &self.config.magick_path,
            &args,
            &job.work_dir,
            self.config.timeout_secs,
        )
        .await?;

        if !run.status.success() {
            return Err(ConverterError::ToolFailed {
                tool: "convert".to_string(),
                status: run.status.code(),
                output: run.output,
            });
        }

        let artifact = job.work_dir.join(&job.output_name);
        let meta = tokio::fs::metadata(&artifact)
            .await
            .map_err(|_| ConverterError::OutputMissing {
                path: artifact.clone(),
            })?;

        Ok(AssembleResult {
            artifact,
            size_bytes: meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        check_binary(&self.config.magick_path).await
    }
}

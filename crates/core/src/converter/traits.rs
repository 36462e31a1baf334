//! Trait definitions for the conversion tools.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::{AssembleJob, AssembleResult, ExtractJob, ExtractResult};

/// Slices a source video into a numbered sequence of still frames.
#[async_trait]
pub trait FrameExtractor: Send + Sync {
    /// Returns the name of this extractor implementation.
    fn name(&self) -> &str;

    /// Extracts the requested range into numbered frame files inside
    /// `job.work_dir`.
    async fn extract(&self, job: ExtractJob) -> Result<ExtractResult, ConverterError>;

    /// Validates that the implementation is ready to run.
    async fn validate(&self) -> Result<(), ConverterError> {
        Ok(())
    }
}

/// Merges numbered frame files into one optimized animation.
#[async_trait]
pub trait GifAssembler: Send + Sync {
    /// Returns the name of this assembler implementation.
    fn name(&self) -> &str;

    /// Assembles the frames in `job.work_dir` into `job.output_name`.
    async fn assemble(&self, job: AssembleJob) -> Result<AssembleResult, ConverterError>;

    /// Validates that the implementation is ready to run.
    async fn validate(&self) -> Result<(), ConverterError> {
        Ok(())
    }
}

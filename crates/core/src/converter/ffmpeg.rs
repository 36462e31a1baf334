//! FFmpeg-based frame extraction.

use async_trait::async_trait;
use std::path::Path;
use std::time::Instant;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::process::{check_binary, run_tool};
use super::traits::FrameExtractor;
use super::types::{ExtractJob, ExtractResult};
use super::{FRAME_FILE_PATTERN, FRAME_FILE_REGEX};

/// Frame extractor backed by the ffmpeg binary.
pub struct FfmpegExtractor {
    config: ConverterConfig,
}

impl FfmpegExtractor {
    /// Creates a new extractor with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates an extractor with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Builds the ffmpeg argument list for one extraction.
    ///
    /// The process runs with the scratch directory as cwd, so the numbered
    /// output pattern is relative.
    fn build_args(&self, job: &ExtractJob) -> Vec<String> {
        vec![
            "-i".to_string(),
            job.source.to_string_lossy().to_string(),
            "-ss".to_string(),
            format_seconds(job.start_ms),
            "-t".to_string(),
            format_seconds(job.end_ms.saturating_sub(job.start_ms)),
            "-vsync".to_string(),
            "1".to_string(),
            "-r".to_string(),
            self.config.frame_rate.to_string(),
            FRAME_FILE_PATTERN.to_string(),
        ]
    }
}

/// Renders milliseconds as seconds with millisecond precision.
fn format_seconds(ms: u64) -> String {
    format!("{}.{:03}", ms / 1000, ms % 1000)
}

/// Counts the frame files currently present in `dir`.
async fn count_frames(dir: &Path) -> Option<usize> {
    let mut entries = tokio::fs::read_dir(dir).await.ok()?;
    let mut count = 0;
    while let Ok(Some(entry)) = entries.next_entry().await {
        if let Some(name) = entry.file_name().to_str() {
            if FRAME_FILE_REGEX.is_match(name) {
                count += 1;
            }
        }
    }
    Some(count)
}

#[async_trait]
impl FrameExtractor for FfmpegExtractor {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn extract(&self, job: ExtractJob) -> Result<ExtractResult, ConverterError> {
        if !job.source.exists() {
            return Err(ConverterError::InputNotFound {
                path: job.source.clone(),
            });
        }

        let start = Instant::now();
        let args = self.build_args(&job);
        let run = run_tool(
            &self.config.ffmpeg_path,
            &args,
            &job.work_dir,
            self.config.timeout_secs,
        )
        .await?;

        if !run.status.success() {
            return Err(ConverterError::ToolFailed {
                tool: "ffmpeg".to_string(),
                status: run.status.code(),
                output: run.output,
            });
        }

        Ok(ExtractResult {
            frames: count_frames(&job.work_dir).await,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        check_binary(&self.config.ffmpeg_path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_build_args() {
        let extractor = FfmpegExtractor::with_defaults();
        let job = ExtractJob {
            source: PathBuf::from("/scratch/abc/0/5000/abc"),
            work_dir: PathBuf::from("/scratch/abc/0/5000"),
            start_ms: 1000,
            end_ms: 5000,
        };

        let args = extractor.build_args(&job);
        assert_eq!(args[0], "-i");
        assert_eq!(args[1], "/scratch/abc/0/5000/abc");
        assert!(args.contains(&"-ss".to_string()));
        assert!(args.contains(&"1.000".to_string()));
        assert!(args.contains(&"-t".to_string()));
        assert!(args.contains(&"4.000".to_string()));
        assert!(args.contains(&"-vsync".to_string()));
        assert!(args.contains(&"-r".to_string()));
        assert!(args.contains(&"10".to_string()));
        assert_eq!(args.last(), Some(&FRAME_FILE_PATTERN.to_string()));
    }

    #[test]
    fn test_build_args_uses_configured_rate() {
        let extractor = FfmpegExtractor::new(ConverterConfig::default().with_frame_rate(24));
        let job = ExtractJob {
            source: PathBuf::from("/in"),
            work_dir: PathBuf::from("/work"),
            start_ms: 0,
            end_ms: 1000,
        };

        let args = extractor.build_args(&job);
        assert!(args.contains(&"24".to_string()));
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0), "0.000");
        assert_eq!(format_seconds(1000), "1.000");
        assert_eq!(format_seconds(1234), "1.234");
        assert_eq!(format_seconds(90_050), "90.050");
    }

    #[tokio::test]
    async fn test_extract_missing_input() {
        let extractor = FfmpegExtractor::with_defaults();
        let job = ExtractJob {
            source: PathBuf::from("/definitely/not/here.mp4"),
            work_dir: PathBuf::from("/tmp"),
            start_ms: 0,
            end_ms: 1000,
        };

        let result = extractor.extract(job).await;
        assert!(matches!(result, Err(ConverterError::InputNotFound { .. })));
    }
}

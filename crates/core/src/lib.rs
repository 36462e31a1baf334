//! Core engine for a remote-video-to-animated-GIF rendering service.
//!
//! The crate accepts requests to fetch a remote video, extract a sub-range
//! of it, and render that range as an optimized animated GIF, while
//! deduplicating identical requests, bounding concurrent work and exposing
//! a queryable status for each in-flight or completed job.
//!
//! The [`manager::DownloadManager`] is the entry point; the remote fetch
//! library and the two media tools are injected behind traits so callers
//! (and tests) decide the implementations.
//!
//! # Example
//!
//! ```ignore
//! use gifsmith_core::{
//!     ConverterConfig, DownloadManager, DownloadOptions, FfmpegExtractor, FsStaging,
//!     MagickAssembler, ManagerConfig, StagingConfig,
//! };
//!
//! let manager = DownloadManager::new(
//!     ManagerConfig::default(),
//!     my_fetcher,
//!     FfmpegExtractor::new(ConverterConfig::default()),
//!     MagickAssembler::new(ConverterConfig::default()),
//!     FsStaging::new(StagingConfig::default()),
//! );
//!
//! let status = manager
//!     .request_job("dQw4w9WgXcQ", DownloadOptions { format: 18, start_ms: 0, end_ms: 5000 })
//!     .await?;
//! println!("job {} is {}", status.fingerprint, status.state);
//!
//! // Poll for completion through the query surface.
//! let status = manager.status(&status.fingerprint).await?;
//! ```

pub mod config;
pub mod converter;
pub mod fetcher;
pub mod fingerprint;
pub mod manager;
pub mod metrics;
pub mod pipeline;
pub mod staging;
pub mod testing;

pub use config::{load_config, load_config_from_str, validate_config, Config, ConfigError};
pub use converter::{
    ConverterConfig, ConverterError, FfmpegExtractor, FrameExtractor, GifAssembler,
    MagickAssembler,
};
pub use fetcher::{FetchError, VideoFetcher};
pub use fingerprint::{fingerprint, JobFingerprint};
pub use manager::{
    DownloadManager, DownloadOptions, JobState, JobStatus, ManagerConfig, RequestError,
    StatusError, StatusTable,
};
pub use pipeline::{Executor, PipelineError, PipelineJob};
pub use staging::{FsStaging, StagingConfig, StagingError};

//! Conversion tools for slicing video into frames and assembling the GIF.
//!
//! The two pipeline stages that shell out to external binaries live behind
//! traits so the executor can be tested without the real tools:
//!
//! - [`FrameExtractor`] slices the downloaded source into a numbered
//!   sequence of still frames ([`FfmpegExtractor`] runs ffmpeg).
//! - [`GifAssembler`] merges the frames into one optimized animation
//!   ([`MagickAssembler`] runs ImageMagick convert).
//!
//! Both tools run with the job's scratch directory as their working
//! directory, report success as exit code zero and deliver diagnostics as
//! combined stdout/stderr. Invocations are killed after a configurable
//! timeout.
//!
//! # Example
//!
//! ```ignore
//! use gifsmith_core::converter::{ConverterConfig, ExtractJob, FfmpegExtractor, FrameExtractor};
//!
//! let extractor = FfmpegExtractor::new(ConverterConfig::default());
//! extractor.validate().await?;
//!
//! let result = extractor.extract(ExtractJob {
//!     source: "/scratch/abc/0/5000/abc".into(),
//!     work_dir: "/scratch/abc/0/5000".into(),
//!     start_ms: 0,
//!     end_ms: 5000,
//! }).await?;
//! println!("extracted {:?} frames in {} ms", result.frames, result.duration_ms);
//! ```

mod config;
mod error;
mod ffmpeg;
mod magick;
mod process;
mod traits;
mod types;

use once_cell::sync::Lazy;
use regex_lite::Regex;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegExtractor;
pub use magick::MagickAssembler;
pub use traits::{FrameExtractor, GifAssembler};
pub use types::{AssembleJob, AssembleResult, ExtractJob, ExtractResult};

/// printf-style pattern the extractor writes frame files with.
pub const FRAME_FILE_PATTERN: &str = "frame%05d.gif";

/// Matches the files produced by [`FRAME_FILE_PATTERN`].
pub static FRAME_FILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^frame\d{5}\.gif$").expect("frame pattern is valid"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_regex_matches_pattern_output() {
        assert!(FRAME_FILE_REGEX.is_match("frame00001.gif"));
        assert!(FRAME_FILE_REGEX.is_match("frame99999.gif"));
    }

    #[test]
    fn test_frame_regex_rejects_other_files() {
        assert!(!FRAME_FILE_REGEX.is_match("frame1.gif"));
        assert!(!FRAME_FILE_REGEX.is_match("frame000001.gif"));
        assert!(!FRAME_FILE_REGEX.is_match("abc.gif"));
        assert!(!FRAME_FILE_REGEX.is_match("frame00001.gif.tmp"));
        assert!(!FRAME_FILE_REGEX.is_match("frame00001.png"));
    }
}

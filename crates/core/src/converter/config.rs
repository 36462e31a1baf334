//! Configuration for the conversion tools.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration shared by the frame extractor and the assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path to the ffmpeg binary.
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: PathBuf,

    /// Path to the ImageMagick convert binary.
    #[serde(default = "default_magick_path")]
    pub magick_path: PathBuf,

    /// Frames sampled per second of source video.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// Delay between animation frames in centiseconds.
    #[serde(default = "default_frame_delay")]
    pub frame_delay_cs: u32,

    /// Timeout for a single tool invocation in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_ffmpeg_path() -> PathBuf {
    PathBuf::from("ffmpeg")
}

fn default_magick_path() -> PathBuf {
    PathBuf::from("convert")
}

fn default_frame_rate() -> u32 {
    10
}

fn default_frame_delay() -> u32 {
    10
}

fn default_timeout() -> u64 {
    600 // 10 minutes
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            magick_path: default_magick_path(),
            frame_rate: default_frame_rate(),
            frame_delay_cs: default_frame_delay(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ConverterConfig {
    /// Creates a new config with custom tool paths.
    pub fn with_paths(ffmpeg_path: PathBuf, magick_path: PathBuf) -> Self {
        Self {
            ffmpeg_path,
            magick_path,
            ..Default::default()
        }
    }

    /// Sets the sampling rate in frames per second.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

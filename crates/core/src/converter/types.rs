//! Types for the conversion tools.

use std::path::PathBuf;

/// A frame-extraction request.
#[derive(Debug, Clone)]
pub struct ExtractJob {
    /// Source media file to slice.
    pub source: PathBuf,
    /// Directory the numbered frames are written into; also the working
    /// directory of the tool process.
    pub work_dir: PathBuf,
    /// Range start in milliseconds.
    pub start_ms: u64,
    /// Range end in milliseconds.
    pub end_ms: u64,
}

/// Result of a successful frame extraction.
#[derive(Debug, Clone)]
pub struct ExtractResult {
    /// Number of frame files produced, when the implementation counts them.
    pub frames: Option<usize>,
    /// Wall-clock duration of the tool run in milliseconds.
    pub duration_ms: u64,
}

/// An animation-assembly request.
#[derive(Debug, Clone)]
pub struct AssembleJob {
    /// Directory containing the numbered frames; also the working directory
    /// of the tool process.
    pub work_dir: PathBuf,
    /// File name of the output animation, relative to `work_dir`.
    pub output_name: String,
}

/// Result of a successful assembly.
#[derive(Debug, Clone)]
pub struct AssembleResult {
    /// Absolute path of the produced animation.
    pub artifact: PathBuf,
    /// Size of the artifact in bytes.
    pub size_bytes: u64,
    /// Wall-clock duration of the tool run in milliseconds.
    pub duration_ms: u64,
}

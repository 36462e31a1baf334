//! Error types for the conversion tools.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running an external conversion tool.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The tool binary was not found.
    #[error("tool not found at path: {path}")]
    ToolNotFound { path: PathBuf },

    /// The input file is missing.
    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// The tool exited with a non-zero status.
    #[error("{tool} failed with status {status:?}")]
    ToolFailed {
        tool: String,
        status: Option<i32>,
        /// Combined stdout and stderr of the tool run.
        output: String,
    },

    /// The tool ran past the configured deadline and was killed.
    #[error("{tool} timed out after {timeout_secs} seconds")]
    Timeout { tool: String, timeout_secs: u64 },

    /// The tool reported success but the expected output is missing.
    #[error("expected output missing: {path}")]
    OutputMissing { path: PathBuf },

    /// I/O error while launching or reaping the tool.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Combined tool output captured with the failure, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::ToolFailed { output, .. } => Some(output),
            _ => None,
        }
    }
}

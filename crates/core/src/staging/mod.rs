//! Filesystem staging for per-job scratch directories.
//!
//! Each pipeline executor exclusively owns one scratch directory for the
//! duration of its job: recreated empty at job start, cleared of
//! intermediate frames on success, and left fully in place on failure so
//! the tool output can be inspected alongside whatever files it produced.

mod config;
mod error;
mod fs;

pub use config::StagingConfig;
pub use error::StagingError;
pub use fs::FsStaging;

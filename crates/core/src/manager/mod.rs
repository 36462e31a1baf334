//! Job admission, deduplication and status tracking.
//!
//! The [`DownloadManager`] is the entry point of the crate. It computes the
//! fingerprint of an incoming request, consults the shared status table and
//! either returns the existing record, rejects for capacity or an
//! unavailable format, or spawns a pipeline executor and returns a fresh
//! `Downloading` record.
//!
//! Two guarantees are enforced here rather than left to callers:
//!
//! - **At-most-one execution per fingerprint.** The existence check and the
//!   insert happen under one write lock, so concurrent identical requests
//!   resolve to a single record and a single executor.
//! - **Strict concurrency ceiling.** A slot is reserved with an owned
//!   semaphore permit before the decision to launch, and the permit is only
//!   released when the executor finishes — the running-job count can never
//!   overshoot the configured maximum.

mod config;
mod error;
mod runner;
mod table;
mod types;

pub use config::ManagerConfig;
pub use error::{RequestError, StatusError};
pub use runner::DownloadManager;
pub use table::{InsertOutcome, StatusTable};
pub use types::{DownloadOptions, JobState, JobStatus};

//! Per-job conversion pipeline.
//!
//! One executor task runs per admitted job: prepare the scratch directory,
//! acquire the source range, slice it into frames, assemble the animation,
//! clean up the intermediates. Each stage boundary commits a transition to
//! the shared status table; any stage failure is terminal for the job and
//! leaves the scratch directory untouched for diagnosis. No stage is
//! retried.

mod executor;

pub use executor::{Executor, PipelineError, PipelineJob};

//! Prometheus metrics for the conversion engine.
//!
//! This module provides metrics for:
//! - Admission decisions (admitted, deduplicated, rejected)
//! - Pipeline outcomes (completed, failed by stage, durations)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Jobs admitted and started.
pub static JOBS_ADMITTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("gifsmith_jobs_admitted_total", "Total jobs admitted").unwrap()
});

/// Re-requests answered from the status table.
pub static JOBS_DEDUPLICATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gifsmith_jobs_deduplicated_total",
        "Total requests answered by an existing job record",
    )
    .unwrap()
});

/// Rejected requests by reason.
pub static JOBS_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gifsmith_jobs_rejected_total", "Total rejected job requests"),
        &["reason"], // "invalid_range", "capacity", "format_unavailable"
    )
    .unwrap()
});

/// Pipelines that reached Done.
pub static PIPELINES_COMPLETED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gifsmith_pipelines_completed_total",
        "Total pipelines completed successfully",
    )
    .unwrap()
});

/// Pipelines that reached Error, by failing stage.
pub static PIPELINES_FAILED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gifsmith_pipelines_failed_total", "Total pipelines failed"),
        &["stage"], // "staging", "download", "extraction", "assembly"
    )
    .unwrap()
});

/// End-to-end pipeline duration in seconds.
pub static PIPELINE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gifsmith_pipeline_duration_seconds",
            "Duration of pipeline runs",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["result"], // "done", "error"
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(JOBS_ADMITTED.clone()),
        Box::new(JOBS_DEDUPLICATED.clone()),
        Box::new(JOBS_REJECTED.clone()),
        Box::new(PIPELINES_COMPLETED.clone()),
        Box::new(PIPELINES_FAILED.clone()),
        Box::new(PIPELINE_DURATION.clone()),
    ]
}

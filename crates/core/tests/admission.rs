//! Admission, deduplication and concurrency integration tests.
//!
//! These tests verify the admission controller's guarantees:
//! - Idempotent re-requests (at-most-once execution per fingerprint)
//! - Strict concurrency ceiling, with slots freed on completion
//! - Synchronous rejections that never touch the status table

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tempfile::TempDir;
use tokio_test::assert_ok;

use gifsmith_core::{
    DownloadManager, DownloadOptions, FsStaging, JobFingerprint, JobState, ManagerConfig,
    RequestError, StagingConfig,
    testing::{MockFrameExtractor, MockGifAssembler, MockVideoFetcher},
};

struct TestHarness {
    manager: Arc<DownloadManager<MockVideoFetcher, MockFrameExtractor, MockGifAssembler>>,
    fetcher: MockVideoFetcher,
    extractor: MockFrameExtractor,
    _staging_root: TempDir,
}

impl TestHarness {
    async fn with_config(config: ManagerConfig) -> Self {
        let staging_root = TempDir::new().expect("Failed to create staging root");

        let fetcher = MockVideoFetcher::new();
        fetcher.set_default_formats(vec![18, 22, 137]).await;
        let extractor = MockFrameExtractor::new();
        let assembler = MockGifAssembler::new();
        let staging =
            FsStaging::new(StagingConfig::default().with_root(staging_root.path().to_path_buf()));

        let manager = Arc::new(DownloadManager::new(
            config,
            fetcher.clone(),
            extractor.clone(),
            assembler,
            staging,
        ));

        Self {
            manager,
            fetcher,
            extractor,
            _staging_root: staging_root,
        }
    }

    async fn new() -> Self {
        Self::with_config(ManagerConfig::default()).await
    }

    fn options() -> DownloadOptions {
        DownloadOptions {
            format: 18,
            start_ms: 0,
            end_ms: 5000,
        }
    }

    async fn wait_for_terminal(&self, fingerprint: &JobFingerprint) {
        for _ in 0..500 {
            if let Ok(status) = self.manager.status(fingerprint).await {
                if status.state.is_terminal() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("job {} did not reach a terminal state", fingerprint);
    }
}

// =============================================================================
// Deduplication
// =============================================================================

#[tokio::test]
async fn test_rerequest_before_completion_returns_same_record() {
    let harness = TestHarness::new().await;
    harness
        .extractor
        .set_extract_duration(Duration::from_millis(300))
        .await;

    let first = harness
        .manager
        .request_job("abc", TestHarness::options())
        .await
        .unwrap();

    let second = harness
        .manager
        .request_job("abc", TestHarness::options())
        .await
        .unwrap();

    assert_eq!(first.fingerprint, second.fingerprint);
    harness.wait_for_terminal(&first.fingerprint).await;

    // Exactly one pipeline ran.
    assert_eq!(harness.fetcher.download_count().await, 1);
    assert_eq!(harness.extractor.extraction_count().await, 1);
    assert_eq!(harness.manager.tracked_jobs().await, 1);
}

#[tokio::test]
async fn test_rerequest_after_completion_starts_no_new_work() {
    let harness = TestHarness::new().await;

    let first = harness
        .manager
        .request_job("abc", TestHarness::options())
        .await
        .unwrap();
    harness.wait_for_terminal(&first.fingerprint).await;

    let second = harness
        .manager
        .request_job("abc", TestHarness::options())
        .await
        .unwrap();
    assert_eq!(second.state, JobState::Done);
    assert_eq!(second.fingerprint, first.fingerprint);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(harness.fetcher.download_count().await, 1);
}

#[tokio::test]
async fn test_concurrent_identical_requests_run_once() {
    let harness = TestHarness::with_config(ManagerConfig::default().with_max_concurrent(8)).await;
    harness
        .extractor
        .set_extract_duration(Duration::from_millis(100))
        .await;

    let requests = (0..8).map(|_| {
        let manager = Arc::clone(&harness.manager);
        tokio::spawn(async move { manager.request_job("abc", TestHarness::options()).await })
    });

    let results = join_all(requests).await;
    let mut fingerprints = Vec::new();
    for result in results {
        let status = result.unwrap().expect("identical requests must all succeed");
        fingerprints.push(status.fingerprint);
    }

    // Every caller observed the same record.
    fingerprints.dedup();
    assert_eq!(fingerprints.len(), 1);

    harness.wait_for_terminal(&fingerprints[0]).await;
    assert_eq!(harness.fetcher.download_count().await, 1);
    assert_eq!(harness.extractor.extraction_count().await, 1);
    assert_eq!(harness.manager.tracked_jobs().await, 1);
}

#[tokio::test]
async fn test_distinct_ranges_are_distinct_jobs() {
    let harness = TestHarness::with_config(ManagerConfig::default().with_max_concurrent(4)).await;

    let a = harness
        .manager
        .request_job(
            "abc",
            DownloadOptions {
                format: 18,
                start_ms: 0,
                end_ms: 5000,
            },
        )
        .await
        .unwrap();
    let b = harness
        .manager
        .request_job(
            "abc",
            DownloadOptions {
                format: 18,
                start_ms: 0,
                end_ms: 6000,
            },
        )
        .await
        .unwrap();

    assert_ne!(a.fingerprint, b.fingerprint);
    harness.wait_for_terminal(&a.fingerprint).await;
    harness.wait_for_terminal(&b.fingerprint).await;
    assert_eq!(harness.fetcher.download_count().await, 2);
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn test_unavailable_format_is_rejected() {
    let harness = TestHarness::new().await;

    let result = harness
        .manager
        .request_job(
            "abc",
            DownloadOptions {
                format: 999,
                start_ms: 0,
                end_ms: 5000,
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(RequestError::FormatUnavailable { format: 999 })
    ));
    // Rejections leave no trace in the table.
    assert_eq!(harness.manager.tracked_jobs().await, 0);
}

#[tokio::test]
async fn test_invalid_range_is_rejected() {
    let harness = TestHarness::new().await;

    let result = harness
        .manager
        .request_job(
            "abc",
            DownloadOptions {
                format: 18,
                start_ms: 5000,
                end_ms: 5000,
            },
        )
        .await;

    assert!(matches!(result, Err(RequestError::InvalidRange { .. })));
    assert_eq!(harness.manager.tracked_jobs().await, 0);
}

#[tokio::test]
async fn test_format_lookup_failure_is_surfaced() {
    let harness = TestHarness::new().await;
    harness
        .fetcher
        .set_next_error(gifsmith_core::FetchError::Other("listing failed".to_string()))
        .await;

    let result = harness
        .manager
        .request_job("abc", TestHarness::options())
        .await;

    assert!(matches!(result, Err(RequestError::Fetch(_))));
    assert_eq!(harness.manager.tracked_jobs().await, 0);
}

// =============================================================================
// Concurrency Ceiling
// =============================================================================

#[tokio::test]
async fn test_fourth_job_at_ceiling_is_rejected() {
    let harness = TestHarness::with_config(ManagerConfig::default().with_max_concurrent(3)).await;
    harness
        .extractor
        .set_extract_duration(Duration::from_millis(500))
        .await;

    for video_id in ["one", "two", "three"] {
        harness
            .manager
            .request_job(video_id, TestHarness::options())
            .await
            .unwrap();
    }
    assert_eq!(harness.manager.running_jobs(), 3);

    let result = harness
        .manager
        .request_job("four", TestHarness::options())
        .await;
    assert!(matches!(
        result,
        Err(RequestError::CapacityExceeded { max: 3 })
    ));
    assert_eq!(harness.manager.tracked_jobs().await, 3);
}

#[tokio::test]
async fn test_running_jobs_never_exceed_ceiling() {
    let harness = TestHarness::with_config(ManagerConfig::default().with_max_concurrent(2)).await;
    harness
        .extractor
        .set_extract_duration(Duration::from_millis(100))
        .await;

    let mut admitted = Vec::new();
    for i in 0..6 {
        let result = harness
            .manager
            .request_job(&format!("video{}", i), TestHarness::options())
            .await;
        assert!(harness.manager.running_jobs() <= 2);
        if let Ok(status) = result {
            admitted.push(status.fingerprint);
        }
    }

    assert!(!admitted.is_empty());
    for fingerprint in &admitted {
        harness.wait_for_terminal(fingerprint).await;
    }
    assert_eq!(harness.manager.running_jobs(), 0);
}

#[tokio::test]
async fn test_slot_is_freed_after_completion() {
    let harness = TestHarness::with_config(ManagerConfig::default().with_max_concurrent(1)).await;

    let first = harness
        .manager
        .request_job("one", TestHarness::options())
        .await
        .unwrap();
    harness.wait_for_terminal(&first.fingerprint).await;

    // The slot released by the finished job admits the next request.
    let second = harness
        .manager
        .request_job("two", TestHarness::options())
        .await
        .unwrap();
    assert_eq!(second.state, JobState::Downloading);
    harness.wait_for_terminal(&second.fingerprint).await;
}

#[tokio::test]
async fn test_slot_is_freed_after_failure() {
    let harness = TestHarness::with_config(ManagerConfig::default().with_max_concurrent(1)).await;
    harness
        .extractor
        .set_next_error(gifsmith_core::ConverterError::ToolFailed {
            tool: "ffmpeg".to_string(),
            status: Some(1),
            output: "boom".to_string(),
        })
        .await;

    let first = harness
        .manager
        .request_job("one", TestHarness::options())
        .await
        .unwrap();
    harness.wait_for_terminal(&first.fingerprint).await;
    assert_eq!(harness.manager.running_jobs(), 0);

    let second = harness
        .manager
        .request_job("two", TestHarness::options())
        .await;
    tokio_test::assert_ok!(second);
}

#[tokio::test]
async fn test_dedup_hit_does_not_leak_a_slot() {
    let harness = TestHarness::with_config(ManagerConfig::default().with_max_concurrent(2)).await;
    harness
        .extractor
        .set_extract_duration(Duration::from_millis(300))
        .await;

    let first = harness
        .manager
        .request_job("abc", TestHarness::options())
        .await
        .unwrap();

    // Re-requests briefly reserve a slot and drop it on the dedup hit.
    for _ in 0..5 {
        harness
            .manager
            .request_job("abc", TestHarness::options())
            .await
            .unwrap();
    }
    assert_eq!(harness.manager.running_jobs(), 1);

    // A second distinct job still fits under the ceiling.
    let other = harness
        .manager
        .request_job("xyz", TestHarness::options())
        .await;
    assert!(other.is_ok());

    harness.wait_for_terminal(&first.fingerprint).await;
}

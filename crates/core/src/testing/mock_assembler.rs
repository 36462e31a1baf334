//! Mock animation assembler for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{AssembleJob, AssembleResult, ConverterError, GifAssembler};

/// Mock implementation of the animation assembler.
///
/// Successful assemblies write the output file into the job's working
/// directory so the artifact path on the status record points at a real
/// file.
#[derive(Debug, Clone)]
pub struct MockGifAssembler {
    assemblies: Arc<RwLock<Vec<AssembleJob>>>,
    next_error: Arc<RwLock<Option<ConverterError>>>,
    assemble_duration_ms: Arc<RwLock<u64>>,
}

impl Default for MockGifAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGifAssembler {
    /// Create a new mock assembler.
    pub fn new() -> Self {
        Self {
            assemblies: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            assemble_duration_ms: Arc::new(RwLock::new(0)),
        }
    }

    /// Configure the next assembly to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set the simulated assembly duration.
    pub async fn set_assemble_duration(&self, duration: Duration) {
        *self.assemble_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Get all recorded assembly jobs.
    pub async fn recorded_assemblies(&self) -> Vec<AssembleJob> {
        self.assemblies.read().await.clone()
    }

    /// Get the number of assemblies performed.
    pub async fn assembly_count(&self) -> usize {
        self.assemblies.read().await.len()
    }

    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl GifAssembler for MockGifAssembler {
    fn name(&self) -> &str {
        "mock"
    }

    async fn assemble(&self, job: AssembleJob) -> Result<AssembleResult, ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.assemblies.write().await.push(job.clone());

        let duration_ms = *self.assemble_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        let artifact = job.work_dir.join(&job.output_name);
        let content = b"mock animation";
        tokio::fs::write(&artifact, content).await?;

        Ok(AssembleResult {
            artifact,
            size_bytes: content.len() as u64,
            duration_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_assemble_writes_artifact() {
        let dir = TempDir::new().unwrap();
        let assembler = MockGifAssembler::new();

        let result = assembler
            .assemble(AssembleJob {
                work_dir: dir.path().to_path_buf(),
                output_name: "abc.gif".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.artifact, dir.path().join("abc.gif"));
        assert!(result.artifact.exists());
        assert!(result.size_bytes > 0);
        assert_eq!(assembler.assembly_count().await, 1);
    }

    #[tokio::test]
    async fn test_error_injection() {
        let dir = TempDir::new().unwrap();
        let assembler = MockGifAssembler::new();
        assembler
            .set_next_error(ConverterError::ToolFailed {
                tool: "convert".to_string(),
                status: Some(1),
                output: "no frames".to_string(),
            })
            .await;

        let result = assembler
            .assemble(AssembleJob {
                work_dir: dir.path().to_path_buf(),
                output_name: "abc.gif".to_string(),
            })
            .await;

        assert!(result.is_err());
        assert!(!dir.path().join("abc.gif").exists());
    }
}

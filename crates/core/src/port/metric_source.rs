// Metric Source Port

use async_trait::async_trait;
use thiserror::Error;

/// Failure to read a metric source for one cycle
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One host resource readable as a text snapshot.
///
/// A producer task calls [`sample`](MetricSource::sample) once per
/// cycle; the implementation may perform blocking host I/O internally
/// (the queue never holds its lock across a sample). A failed sample
/// applies only to that cycle; the producer decides whether to skip or
/// terminate, per its failure policy.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Short identifier for logs and message prefixes (e.g. "memory")
    fn name(&self) -> &str;

    /// Read the resource and format its current values
    async fn sample(&self) -> Result<String, SourceError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock source producing a numbered snapshot per call
    pub struct MockMetricSource {
        name: String,
        calls: AtomicUsize,
    }

    impl MockMetricSource {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                name: name.into(),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MetricSource for MockMetricSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn sample(&self) -> Result<String, SourceError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("sample {}", n + 1))
        }
    }

    /// Mock source following a fixed script of results
    pub struct ScriptedSource {
        name: String,
        script: Mutex<Vec<Result<String, SourceError>>>,
    }

    impl ScriptedSource {
        pub fn new(
            name: impl Into<String>,
            script: Vec<Result<String, SourceError>>,
        ) -> Self {
            Self {
                name: name.into(),
                script: Mutex::new(script),
            }
        }
    }

    #[async_trait]
    impl MetricSource for ScriptedSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn sample(&self) -> Result<String, SourceError> {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                return Err(SourceError::Unavailable("script exhausted".to_string()));
            }
            script.remove(0)
        }
    }

    /// Mock source that always fails
    pub struct FailingSource {
        name: String,
    }

    impl FailingSource {
        pub fn new(name: impl Into<String>) -> Self {
            Self { name: name.into() }
        }
    }

    #[async_trait]
    impl MetricSource for FailingSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn sample(&self) -> Result<String, SourceError> {
            Err(SourceError::Unavailable(format!(
                "{} cannot be read",
                self.name
            )))
        }
    }
}

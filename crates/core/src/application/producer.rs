// Producer - sampling loop bound to one metric source

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::sleep;
use tracing::{info, warn};

use crate::application::queue::{BoundedQueue, QueueError};
use crate::application::shutdown::ShutdownToken;
use crate::domain::Message;
use crate::error::Result;
use crate::port::{MetricSource, SourceError};

/// What a producer does when its source fails for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFailurePolicy {
    /// Log and defer to the next cycle (default)
    Skip,
    /// Stop this producer; other producers and the consumer keep running
    Terminate,
}

/// Samples one metric source on a fixed interval and submits the
/// formatted snapshot to the shared queue.
///
/// One generic loop serves every source kind; each instance keeps its
/// own failure domain. A source failure never crashes the process and
/// never touches the queue; a skipped cycle waits the same configured
/// interval as a successful one, so a flapping source is polled no
/// faster than a healthy one. The loop exits on shutdown signal, on
/// queue close, or (under the terminate policy) with the source error.
pub struct Producer {
    source: Arc<dyn MetricSource>,
    queue: Arc<BoundedQueue>,
    interval: Duration,
    max_message_bytes: usize,
    failure_policy: SourceFailurePolicy,
}

impl Producer {
    pub fn new(
        source: Arc<dyn MetricSource>,
        queue: Arc<BoundedQueue>,
        interval: Duration,
        max_message_bytes: usize,
        failure_policy: SourceFailurePolicy,
    ) -> Self {
        Self {
            source,
            queue,
            interval,
            max_message_bytes,
            failure_policy,
        }
    }

    /// Run the sampling loop until shutdown, source termination, or
    /// queue close
    pub async fn run(&self, mut shutdown: ShutdownToken) -> Result<()> {
        let name = self.source.name().to_string();
        info!(source = %name, interval_ms = %self.interval.as_millis(), "Producer started");

        loop {
            if shutdown.is_shutdown() {
                info!(source = %name, "Producer shutting down");
                break;
            }

            match self.sample_and_submit(&name).await {
                CycleOutcome::Continue => {}
                CycleOutcome::QueueClosed => break,
                CycleOutcome::SourceFailed(e) => {
                    warn!(source = %name, error = %e, "Sample failed, terminating producer");
                    return Err(e.into());
                }
            }

            tokio::select! {
                _ = sleep(self.interval) => {}
                _ = shutdown.wait() => {
                    info!(source = %name, "Producer interrupted during sleep");
                    break;
                }
            }
        }

        info!(source = %name, "Producer stopped");
        Ok(())
    }

    /// One cycle: sample, format (with the wall-clock cost of the
    /// sampling call), submit
    async fn sample_and_submit(&self, name: &str) -> CycleOutcome {
        let started = Instant::now();
        let snapshot = match self.source.sample().await {
            Ok(s) => s,
            Err(e) => {
                // No retry within the cycle; defer to the next one
                return match self.failure_policy {
                    SourceFailurePolicy::Skip => {
                        warn!(source = %name, error = %e, "Sample failed, skipping cycle");
                        CycleOutcome::Continue
                    }
                    SourceFailurePolicy::Terminate => CycleOutcome::SourceFailed(e),
                };
            }
        };
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let message = Message::bounded(
            format!("{}: {} | sampled in {:.2} ms", name, snapshot, elapsed_ms),
            self.max_message_bytes,
        );

        match self.queue.submit(message).await {
            Ok(()) => CycleOutcome::Continue,
            Err(QueueError::Closed) => {
                info!(source = %name, "Queue closed, stopping producer");
                CycleOutcome::QueueClosed
            }
        }
    }
}

enum CycleOutcome {
    Continue,
    QueueClosed,
    SourceFailed(SourceError),
}

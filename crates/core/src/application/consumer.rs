// Consumer - drains the queue into the sink

use std::sync::Arc;

use tracing::{error, info};

use crate::application::queue::{BoundedQueue, QueueError};
use crate::error::Result;
use crate::port::Sink;

/// The single reader of the bounded queue.
///
/// One retrieval, one delivery, immediately looping again: no backoff
/// and no batching, so only the queue's blocking behavior paces the
/// drain. A sink failure drops that one message's delivery, never the
/// loop. Queue close is the termination signal; the consumer then
/// flushes whatever the producers left behind and exits, so shutdown
/// loses nothing.
pub struct Consumer {
    queue: Arc<BoundedQueue>,
    sink: Arc<dyn Sink>,
}

impl Consumer {
    pub fn new(queue: Arc<BoundedQueue>, sink: Arc<dyn Sink>) -> Self {
        Self { queue, sink }
    }

    pub async fn run(&self) -> Result<()> {
        info!("Consumer started");
        loop {
            match self.queue.retrieve().await {
                Ok(message) => {
                    if let Err(e) = self.sink.deliver(&message).await {
                        error!(error = %e, "Sink delivery failed");
                    }
                }
                Err(QueueError::Closed) => {
                    let residue = self.queue.drain();
                    info!(residue = residue.len(), "Queue closed, flushing residue");
                    for message in &residue {
                        if let Err(e) = self.sink.deliver(message).await {
                            error!(error = %e, "Sink delivery failed during flush");
                        }
                    }
                    break;
                }
            }
        }
        info!("Consumer stopped");
        Ok(())
    }
}

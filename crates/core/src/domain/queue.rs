// Queue and Monitor Configuration

use std::time::Duration;

use crate::domain::error::{DomainError, Result};
use crate::domain::message::DEFAULT_MAX_MESSAGE_BYTES;

/// Default bounded queue capacity (slots)
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Default producer sampling interval (2s)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Bounded queue configuration
#[derive(Debug, Clone)]
pub struct QueueConfig {
    pub capacity: usize,
    pub max_message_bytes: usize,
}

impl QueueConfig {
    pub fn new(capacity: usize, max_message_bytes: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DomainError::InvalidCapacity(capacity));
        }
        if max_message_bytes == 0 {
            return Err(DomainError::InvalidMessageLimit(max_message_bytes));
        }
        Ok(Self {
            capacity,
            max_message_bytes,
        })
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_QUEUE_CAPACITY,
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}

/// Top-level monitor configuration shared by the composition root
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub queue: QueueConfig,
    /// Default sampling interval; individual producers may override it.
    pub poll_interval: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            queue: QueueConfig::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

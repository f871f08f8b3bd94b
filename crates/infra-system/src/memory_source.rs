// Memory metric source backed by sysinfo

use async_trait::async_trait;
use std::sync::Mutex;
use sysinfo::System;
use tracing::debug;

use hostpulse_core::port::{MetricSource, SourceError};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Samples total and free physical memory.
///
/// Owns its `System` handle behind a mutex; refreshing is the only
/// mutation and the lock is never held across an await.
pub struct MemorySource {
    system: Mutex<System>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MetricSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn sample(&self) -> Result<String, SourceError> {
        let mut sys = self.system.lock().unwrap();
        sys.refresh_memory();

        let total_mb = sys.total_memory() / BYTES_PER_MB;
        let free_mb = sys.free_memory() / BYTES_PER_MB;

        debug!(total_mb = %total_mb, free_mb = %free_mb, "Memory sampled");
        Ok(format!("total {} MB, free {} MB", total_mb, free_mb))
    }
}

// Disk metric source backed by sysinfo

use async_trait::async_trait;
use std::path::PathBuf;
use sysinfo::Disks;
use tracing::debug;

use hostpulse_core::port::{MetricSource, SourceError};

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Samples total and free space for one filesystem.
///
/// Bound to a mount point at construction; `None` means whichever
/// disk the host lists first. A mount point that disappears (or a
/// host with no disks) is a per-cycle `Unavailable`, not a crash.
pub struct DiskSource {
    mount_point: Option<PathBuf>,
}

impl DiskSource {
    pub fn new(mount_point: Option<PathBuf>) -> Self {
        Self { mount_point }
    }
}

#[async_trait]
impl MetricSource for DiskSource {
    fn name(&self) -> &str {
        "disk"
    }

    async fn sample(&self) -> Result<String, SourceError> {
        let disks = Disks::new_with_refreshed_list();

        let disk = match &self.mount_point {
            Some(mount) => disks
                .iter()
                .find(|d| d.mount_point() == mount.as_path())
                .ok_or_else(|| {
                    SourceError::Unavailable(format!("no disk mounted at {}", mount.display()))
                })?,
            None => disks
                .first()
                .ok_or_else(|| SourceError::Unavailable("no disks found".to_string()))?,
        };

        let total_mb = disk.total_space() / BYTES_PER_MB;
        let free_mb = disk.available_space() / BYTES_PER_MB;

        debug!(
            mount = %disk.mount_point().display(),
            total_mb = %total_mb,
            free_mb = %free_mb,
            "Disk sampled"
        );
        Ok(format!(
            "{}: total {} MB, free {} MB",
            disk.mount_point().display(),
            total_mb,
            free_mb
        ))
    }
}

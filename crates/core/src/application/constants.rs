// Application constants (no magic values)
use std::time::Duration;

/// Graceful task shutdown timeout used by the composition root (5s)
pub const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

// Hostpulse Infrastructure - System Adapters
// Implements: MetricSource (memory/disk/network), Sink (console/json)

pub mod disk_source;
pub mod memory_source;
pub mod network_source;
pub mod sinks;

pub use disk_source::DiskSource;
pub use memory_source::MemorySource;
pub use network_source::NetworkSource;
pub use sinks::{ConsoleSink, JsonLinesSink};

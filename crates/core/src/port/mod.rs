// Port Layer - Interfaces for external dependencies

pub mod metric_source;
pub mod sink;

// Re-exports
pub use metric_source::{MetricSource, SourceError};
pub use sink::{Sink, SinkError};

// Domain Layer - Pure data types and invariants

pub mod error;
pub mod message;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use message::{Message, DEFAULT_MAX_MESSAGE_BYTES};
pub use queue::{MonitorConfig, QueueConfig, DEFAULT_POLL_INTERVAL, DEFAULT_QUEUE_CAPACITY};

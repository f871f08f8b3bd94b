// Application Layer - Task loops and the bounded queue

pub mod constants;
pub mod consumer;
pub mod producer;
pub mod queue;
pub mod shutdown;

// Re-exports
pub use consumer::Consumer;
pub use producer::{Producer, SourceFailurePolicy};
pub use queue::{BoundedQueue, QueueError};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

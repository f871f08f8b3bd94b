// Report Sink Port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::Message;

/// Failure to deliver a message downstream
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Destination for retrieved messages (print, log, forward).
///
/// Must return promptly: the single consumer is the only drain path,
/// and a sink that blocks indefinitely would stall the whole pipeline.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn deliver(&self, message: &Message) -> Result<(), SinkError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Mock sink recording every delivered message
    #[derive(Default)]
    pub struct CollectingSink {
        delivered: Mutex<Vec<Message>>,
    }

    impl CollectingSink {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn delivered(&self) -> Vec<Message> {
            self.delivered.lock().unwrap().clone()
        }

        pub fn len(&self) -> usize {
            self.delivered.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }
    }

    #[async_trait]
    impl Sink for CollectingSink {
        async fn deliver(&self, message: &Message) -> Result<(), SinkError> {
            self.delivered.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    /// Mock sink that rejects every delivery
    pub struct RejectingSink;

    #[async_trait]
    impl Sink for RejectingSink {
        async fn deliver(&self, _message: &Message) -> Result<(), SinkError> {
            Err(SinkError::Delivery("sink rejected message".to_string()))
        }
    }
}

// Central Error Type for the Application

use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    #[error("Queue error: {0}")]
    Queue(#[from] crate::application::queue::QueueError),

    #[error("Metric source error: {0}")]
    Source(#[from] crate::port::SourceError),

    #[error("Sink error: {0}")]
    Sink(#[from] crate::port::SinkError),
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

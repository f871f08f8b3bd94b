// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid queue capacity: {0} (must be positive)")]
    InvalidCapacity(usize),

    #[error("Invalid message limit: {0} bytes (must be positive)")]
    InvalidMessageLimit(usize),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;

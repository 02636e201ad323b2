//! Error types for sparse array operations.

use thiserror::Error;

/// Error variants for sparse array operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The index has no value: either its block was never materialized or its bit is unset.
    #[error("index not found: {0}")]
    NotFound(usize),

    /// An operation was invoked through a handle that holds no container.
    #[error("container is absent")]
    AbsentContainer,

    /// Canonical text could not be parsed back into a container.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// A specialized Result type for sparse array operations.
pub type Result<T> = std::result::Result<T, Error>;

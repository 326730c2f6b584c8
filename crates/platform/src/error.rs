//! Error types for frost-platform

use thiserror::Error;

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("required runtime build variable '{0}' is not set")]
    MissingVar(String),

    #[error("failed to query the interpreter: {0}")]
    InterpreterQuery(String),

    #[error("unexpected interpreter output: {0}")]
    InterpreterOutput(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for frost-core

use frost_platform::PlatformError;
use thiserror::Error;

/// Errors that can occur while building targets or post-processing
/// packaging artifacts.
///
/// Every variant aborts the operation that raised it; there is no retry or
/// partial-success path. Rerunning the build is the recovery mechanism.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("compiling '{target}' failed: {message}")]
    Compile { target: String, message: String },

    #[error("linking '{target}' failed: {message}")]
    Link { target: String, message: String },

    #[error("unexpected artifact name '{name}': {reason}")]
    Naming { name: String, reason: String },

    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for the driver crate.

use std::path::PathBuf;

use gauntlet_core::GoldenError;

/// Errors that can occur while driving the target program.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DriverError {
    /// Target binary not found at the configured path or in `$PATH`.
    #[error("target binary not found at {}", .path.display())]
    BinaryNotFound { path: PathBuf },

    /// The target process could not be started.
    #[error("target spawn failed: {0}")]
    SpawnFailed(String),

    /// The spawned target exposed no stdin pipe.
    #[error("target stdin unavailable")]
    StdinUnavailable,

    /// A fuzzer configuration value is unusable.
    #[error("invalid fuzzer config: {0}")]
    InvalidConfig(&'static str),

    /// Golden fixture error from the core layer.
    #[error(transparent)]
    Golden(#[from] GoldenError),

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//! Target program abstraction trait.
//!
//! The regression runner and crash fuzzer only ever touch the target through
//! this seam, so tests substitute stub targets for the real binary.

use std::borrow::Cow;
use std::path::Path;
use std::process::ExitStatus;

use async_trait::async_trait;

use crate::{DriverError, TargetHandle};

/// Captured result of one load-mode run of the target program.
#[derive(Debug)]
#[non_exhaustive]
pub struct RunOutput {
    /// Raw captured stdout.
    pub stdout: Vec<u8>,
    /// Raw captured stderr.
    pub stderr: Vec<u8>,
    /// Exit status the process terminated with.
    pub status: ExitStatus,
}

impl RunOutput {
    /// Lossy UTF-8 view of captured stdout.
    #[must_use]
    pub fn stdout_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    /// Lossy UTF-8 view of captured stderr.
    #[must_use]
    pub fn stderr_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

/// Abstraction over how target processes are launched.
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait TargetBackend: Send + Sync {
    /// Run the target in load-from-file mode against one scenario and wait
    /// for it to terminate, capturing both output streams.
    ///
    /// # Errors
    /// Returns [`DriverError::SpawnFailed`] if the process cannot be started.
    async fn run_scenario(&self, scenario: &Path) -> Result<RunOutput, DriverError>;

    /// Launch an interactive target session with stdin piped, for fuzzing.
    ///
    /// # Errors
    /// Returns [`DriverError::SpawnFailed`] if the process cannot be started
    /// and [`DriverError::StdinUnavailable`] if no stdin pipe was set up.
    async fn spawn_session(&self) -> Result<TargetHandle, DriverError>;

    /// Check that the target binary is reachable before starting a run.
    ///
    /// # Errors
    /// Returns [`DriverError::BinaryNotFound`] if it is not.
    async fn health_check(&self) -> Result<(), DriverError>;
}

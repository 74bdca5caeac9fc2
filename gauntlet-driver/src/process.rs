//! Real process backend over `tokio::process`.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::target::{RunOutput, TargetBackend};
use crate::{DriverError, TargetHandle};

/// Launches real target processes.
///
/// Load-mode runs invoke `<binary> --load --path <scenario>` and capture
/// both output streams; fuzzing sessions invoke the binary with no arguments
/// and a piped stdin, discarding its rendering.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    binary_path: PathBuf,
}

impl ProcessBackend {
    /// Create a backend for the given target binary.
    #[must_use]
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// The configured target binary.
    #[must_use]
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

#[async_trait]
impl TargetBackend for ProcessBackend {
    async fn run_scenario(&self, scenario: &Path) -> Result<RunOutput, DriverError> {
        tracing::debug!(
            binary = %self.binary_path.display(),
            scenario = %scenario.display(),
            "running load-mode scenario"
        );

        // No timeout: process completion is awaited synchronously, and a hung
        // target blocks the sweep until the operator intervenes.
        let output = Command::new(&self.binary_path)
            .arg("--load")
            .arg("--path")
            .arg(scenario)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DriverError::SpawnFailed(format!("exec {}: {e}", self.binary_path.display()))
            })?;

        Ok(RunOutput {
            stdout: output.stdout,
            stderr: output.stderr,
            status: output.status,
        })
    }

    async fn spawn_session(&self) -> Result<TargetHandle, DriverError> {
        let child = Command::new(&self.binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                DriverError::SpawnFailed(format!("exec {}: {e}", self.binary_path.display()))
            })?;

        TargetHandle::new(child)
    }

    async fn health_check(&self) -> Result<(), DriverError> {
        which_binary(&self.binary_path)
    }
}

/// Verify a binary exists either at the given path or in `$PATH`.
fn which_binary(path: &Path) -> Result<(), DriverError> {
    // Anything with a directory component is checked directly; bare names go
    // through a PATH lookup.
    if path.is_absolute() || path.components().count() > 1 {
        if path.exists() {
            return Ok(());
        }
        return Err(DriverError::BinaryNotFound { path: path.to_owned() });
    }

    let found = std::env::var("PATH")
        .unwrap_or_default()
        .split(':')
        .map(|dir| Path::new(dir).join(path))
        .any(|p| p.exists());

    if found {
        Ok(())
    } else {
        Err(DriverError::BinaryNotFound { path: path.to_owned() })
    }
}

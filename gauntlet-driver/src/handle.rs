//! Target instance handle: one live interactive process under the fuzzer.

use std::io;
use std::process::ExitStatus;

use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin};
use uuid::Uuid;

use crate::DriverError;

/// A handle to a running interactive target instance.
///
/// Dropping the handle kills the child (it is spawned with `kill_on_drop`),
/// but the fuzzer always reaps explicitly so exit statuses are never lost.
#[derive(Debug)]
pub struct TargetHandle {
    /// Unique identifier for this instance.
    pub id: Uuid,

    /// Timestamp when the instance was launched.
    pub spawned_at: DateTime<Utc>,

    child: Child,
    stdin: ChildStdin,
}

impl TargetHandle {
    /// Wrap a freshly spawned child whose stdin is piped.
    ///
    /// # Errors
    /// Returns [`DriverError::StdinUnavailable`] if the child has no stdin
    /// pipe to take.
    pub fn new(mut child: Child) -> Result<Self, DriverError> {
        let stdin = child.stdin.take().ok_or(DriverError::StdinUnavailable)?;
        Ok(Self {
            id: Uuid::new_v4(),
            spawned_at: Utc::now(),
            child,
            stdin,
        })
    }

    /// Write a single key to the instance and flush immediately.
    ///
    /// A `BrokenPipe` error here means the process stopped reading, which
    /// the caller treats as the instance having exited.
    ///
    /// # Errors
    /// Propagates the underlying pipe write error.
    pub async fn send_key(&mut self, key: char) -> io::Result<()> {
        let mut buf = [0u8; 4];
        self.stdin.write_all(key.encode_utf8(&mut buf).as_bytes()).await?;
        self.stdin.flush().await
    }

    /// Non-blocking liveness probe: `None` while the process is running.
    ///
    /// # Errors
    /// Propagates the underlying wait error.
    pub fn try_status(&mut self) -> io::Result<Option<ExitStatus>> {
        self.child.try_wait()
    }

    /// Await the instance's natural termination.
    ///
    /// # Errors
    /// Propagates the underlying wait error.
    pub async fn wait(&mut self) -> io::Result<ExitStatus> {
        self.child.wait().await
    }

    /// Terminate the instance and reap it, returning the status it actually
    /// exited with. A process that already exited on its own keeps its
    /// original status, so a crash landing on the restart threshold is still
    /// visible to the caller.
    ///
    /// # Errors
    /// Propagates the underlying wait error.
    pub async fn kill_and_reap(mut self) -> io::Result<ExitStatus> {
        // start_kill errors if the process already exited; the stored status
        // is what wait() then returns.
        let _ = self.child.start_kill();
        self.child.wait().await
    }
}

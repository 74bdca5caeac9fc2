//! Run records and crash reports.
//!
//! Records are immutable once created. Scenario records feed the structured
//! log; crash reports are the fuzzer's persisted artifact, carrying enough to
//! replay the killing key sequence deterministically.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A SHA-256 fingerprint of one run's captured output (stdout then stderr).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub struct OutputHash(pub [u8; 32]);

impl OutputHash {
    /// Creates an `OutputHash` from a raw 32-byte digest.
    #[must_use]
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for OutputHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Record of one scenario replay that passed all three block comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ScenarioRecord {
    /// The scenario that was replayed.
    pub scenario: PathBuf,
    /// Fingerprint of the captured output.
    pub output_hash: OutputHash,
    /// Wall-clock duration of the target run.
    pub duration: Duration,
    /// When the comparison completed.
    pub completed_at: DateTime<Utc>,
}

impl ScenarioRecord {
    /// Create a record stamped with the current time.
    #[must_use]
    pub fn new(scenario: PathBuf, output_hash: OutputHash, duration: Duration) -> Self {
        Self {
            scenario,
            output_hash,
            duration,
            completed_at: Utc::now(),
        }
    }
}

/// The fuzzer's finding: one target instance died with a non-zero status.
///
/// Holds the complete key sequence sent to that instance so the crash can be
/// replayed byte-for-byte.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct CrashReport {
    /// Identifier of the crashed instance.
    pub instance: Uuid,
    /// Exit code, when the process exited rather than dying to a signal.
    pub exit_code: Option<i32>,
    /// Terminating signal number, when one was delivered.
    pub signal: Option<i32>,
    /// Every key sent to the instance, in send order.
    pub keys: String,
    /// Number of keys sent.
    pub keys_sent: usize,
    /// When the crash was detected.
    pub found_at: DateTime<Utc>,
}

impl CrashReport {
    /// Create a report stamped with the current time.
    #[must_use]
    pub fn new(
        instance: Uuid,
        exit_code: Option<i32>,
        signal: Option<i32>,
        keys: String,
        keys_sent: usize,
    ) -> Self {
        Self {
            instance,
            exit_code,
            signal,
            keys,
            keys_sent,
            found_at: Utc::now(),
        }
    }
}

impl fmt::Display for CrashReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.exit_code, self.signal) {
            (Some(code), _) => {
                write!(f, "target crashed: exit code {code} ({} keys sent)", self.keys_sent)
            }
            (None, Some(signal)) => {
                write!(f, "target crashed: signal {signal} ({} keys sent)", self.keys_sent)
            }
            (None, None) => {
                write!(f, "target crashed: unknown status ({} keys sent)", self.keys_sent)
            }
        }
    }
}

//! Crash fuzzer engine.
//!
//! Bombards interactive target instances with random keys at a fixed cadence,
//! cycling instances at a bounded key count, until one dies with a non-zero
//! status. One instance is live at a time; the only suspension point is the
//! inter-key delay.

use std::process::ExitStatus;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use gauntlet_core::CrashReport;

use crate::target::TargetBackend;
use crate::{DriverError, TargetHandle};

/// Keys the fuzzer draws from: vi-style movement and diagonals, the rest
/// key, stair keys, and space.
pub const KEY_ALPHABET: &str = "hjklyubn,<> ";

/// Default pacing between consecutive keys.
pub const DEFAULT_KEY_DELAY: Duration = Duration::from_millis(10);

/// Default number of keys sent to one instance before it is cycled.
pub const DEFAULT_RESTART_THRESHOLD: u32 = 1000;

/// Tunable knobs for a fuzzing run.
///
/// The defaults are the contract; the fields exist so CI runs can tighten
/// the pacing and bound the instance count.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct FuzzerConfig {
    /// Characters drawn uniformly at random.
    pub alphabet: Vec<char>,

    /// Delay after each key write.
    pub key_delay: Duration,

    /// Keys sent to one instance before it is forcibly cycled.
    pub restart_threshold: u32,

    /// Stop after this many instances without a crash. `None` runs until a
    /// crash is found or the operator interrupts.
    pub max_instances: Option<u64>,
}

impl Default for FuzzerConfig {
    fn default() -> Self {
        Self {
            alphabet: KEY_ALPHABET.chars().collect(),
            key_delay: DEFAULT_KEY_DELAY,
            restart_threshold: DEFAULT_RESTART_THRESHOLD,
            max_instances: None,
        }
    }
}

/// Streams random keys into target instances until one crashes.
pub struct CrashFuzzer<B: TargetBackend> {
    backend: B,
    config: FuzzerConfig,
}

impl<B: TargetBackend> CrashFuzzer<B> {
    /// Create a fuzzer with the default configuration.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, FuzzerConfig::default())
    }

    /// Create a fuzzer with a custom configuration.
    #[must_use]
    pub fn with_config(backend: B, config: FuzzerConfig) -> Self {
        Self { backend, config }
    }

    /// Run until a crash is found or the instance budget is exhausted.
    ///
    /// Returns the crash report for the first instance that dies with a
    /// non-zero status, or `Ok(None)` if `max_instances` ran out first.
    ///
    /// # Errors
    /// Returns [`DriverError::InvalidConfig`] for an unusable configuration
    /// and propagates spawn and wait failures.
    pub async fn run(&self) -> Result<Option<CrashReport>, DriverError> {
        if self.config.alphabet.is_empty() {
            return Err(DriverError::InvalidConfig("key alphabet is empty"));
        }
        if self.config.restart_threshold == 0 {
            return Err(DriverError::InvalidConfig("restart threshold must be positive"));
        }

        let mut rng = StdRng::from_entropy();
        let mut instances: u64 = 0;

        loop {
            if let Some(max) = self.config.max_instances {
                if instances >= max {
                    tracing::info!(instances, "instance budget exhausted without a crash");
                    return Ok(None);
                }
            }
            instances += 1;

            let handle = self.backend.spawn_session().await?;
            tracing::debug!(instance = %handle.id, "target instance launched");

            if let Some(report) = self.drive_instance(&mut rng, handle).await? {
                tracing::warn!(
                    instance = %report.instance,
                    code = ?report.exit_code,
                    signal = ?report.signal,
                    keys_sent = report.keys_sent,
                    "target crashed"
                );
                return Ok(Some(report));
            }
        }
    }

    /// Feed one instance until it exits or hits the restart threshold.
    ///
    /// `Some(report)` means the instance died with a non-zero status;
    /// `None` means it either exited cleanly or was cycled at the threshold.
    async fn drive_instance(
        &self,
        rng: &mut StdRng,
        mut handle: TargetHandle,
    ) -> Result<Option<CrashReport>, DriverError> {
        let instance = handle.id;
        let mut keys = String::new();
        let mut sent: u32 = 0;

        loop {
            if let Some(status) = handle.try_status()? {
                return Ok(judge_exit(instance, status, keys, sent));
            }

            let key = draw_key(rng, &self.config.alphabet);
            if handle.send_key(key).await.is_err() {
                // The pipe broke mid-write: the instance stopped reading.
                // Reap it and judge whatever status it died with.
                let status = handle.wait().await?;
                return Ok(judge_exit(instance, status, keys, sent));
            }
            keys.push(key);
            tokio::time::sleep(self.config.key_delay).await;
            sent += 1;

            if sent >= self.config.restart_threshold {
                // Probe before killing: an instance that died exactly at the
                // threshold keeps its crash status instead of being discarded.
                if let Some(status) = handle.try_status()? {
                    return Ok(judge_exit(instance, status, keys, sent));
                }
                let status = handle.kill_and_reap().await?;
                if matches!(status.code(), Some(code) if code != 0) {
                    return Ok(judge_exit(instance, status, keys, sent));
                }
                tracing::debug!(
                    instance = %instance,
                    keys_sent = sent,
                    "restart threshold reached, cycling instance"
                );
                return Ok(None);
            }
        }
    }
}

/// Draw one key uniformly at random from the alphabet.
///
/// The caller guarantees a non-empty alphabet.
fn draw_key<R: Rng>(rng: &mut R, alphabet: &[char]) -> char {
    alphabet[rng.gen_range(0..alphabet.len())]
}

/// Turn a terminal exit status into a crash report, or `None` for a clean
/// exit. Signal deaths count as crashes.
fn judge_exit(instance: Uuid, status: ExitStatus, keys: String, sent: u32) -> Option<CrashReport> {
    if status.success() {
        tracing::debug!(instance = %instance, keys_sent = sent, "instance exited cleanly");
        return None;
    }
    Some(CrashReport::new(
        instance,
        status.code(),
        signal_of(status),
        keys,
        sent as usize,
    ))
}

fn signal_of(status: ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status.signal()
    }
    #[cfg(not(unix))]
    {
        let _ = status;
        None
    }
}

//! Child-process orchestration for the gauntlet test harness.
//!
//! Drives the external dungeon-crawler binary purely through its process
//! surface: command-line flags, stdin keystrokes, captured stdout/stderr,
//! and exit codes. The two engines, [`RegressionRunner`] and [`CrashFuzzer`],
//! are generic over [`TargetBackend`] so tests can swap the real binary for
//! stub targets.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod fuzz;
pub mod handle;
pub mod process;
pub mod regress;
pub mod target;

pub use error::DriverError;
pub use fuzz::{CrashFuzzer, FuzzerConfig, KEY_ALPHABET};
pub use handle::TargetHandle;
pub use process::ProcessBackend;
pub use regress::{compute_hash, RegressionOutcome, RegressionRunner};
pub use target::{RunOutput, TargetBackend};

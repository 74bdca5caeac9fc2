//! Core types for the gauntlet test harness.
//!
//! Defines the fundamental domain types shared by the regression runner and
//! the crash fuzzer: scenario fixtures, the golden-answer file model, block
//! extraction and comparison, and run/crash reports.
//!
//! Nothing in this crate touches a child process; all process orchestration
//! lives in `gauntlet-driver`.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod compare;
pub mod error;
pub mod golden;
pub mod report;
pub mod scenario;

pub use compare::{first_mismatch, BlockMismatch, CapturedBlocks};
pub use error::GoldenError;
pub use golden::{Block, BlockKind, GoldenFile, GoldenRecord, BLOCK_LEN};
pub use report::{CrashReport, OutputHash, ScenarioRecord};
pub use scenario::{discover, Scenario};

//! Integration tests: crash fuzzing against stub targets.
//!
//! Stub targets consume stdin with `head -c N` so the fuzzer's unbuffered
//! single-byte writes are enough to drive them, no newlines required.
#![cfg(unix)]

mod common;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use gauntlet_driver::{CrashFuzzer, DriverError, FuzzerConfig, ProcessBackend, KEY_ALPHABET};

fn quick_config(delay_ms: u64, threshold: u32, max_instances: Option<u64>) -> FuzzerConfig {
    let mut config = FuzzerConfig::default();
    config.key_delay = Duration::from_millis(delay_ms);
    config.restart_threshold = threshold;
    config.max_instances = max_instances;
    config
}

#[tokio::test]
async fn fuzzer_reports_crash_with_exit_code_and_key_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = common::write_script(dir.path(), "crasher", "head -c 1 > /dev/null\nexit 139");

    let fuzzer = CrashFuzzer::with_config(ProcessBackend::new(target), quick_config(1, 1000, Some(5)));
    let report = fuzzer
        .run()
        .await
        .expect("fuzzer run")
        .expect("a target that dies on its first key must be caught");

    assert_eq!(report.exit_code, Some(139));
    assert!(report.keys_sent >= 1, "at least one key must have been sent");
    assert_eq!(
        report.keys.chars().count(),
        report.keys_sent,
        "the key log must cover exactly the keys sent"
    );
    assert!(
        report.keys.chars().all(|k| KEY_ALPHABET.contains(k)),
        "every logged key must come from the fixed alphabet"
    );
    assert!(
        report.to_string().contains("139"),
        "the printed message must contain the exit code"
    );
}

#[tokio::test]
async fn fuzzer_relaunches_after_clean_exits() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = common::write_script(dir.path(), "benign", "head -c 1 > /dev/null\nexit 0");

    let fuzzer = CrashFuzzer::with_config(ProcessBackend::new(target), quick_config(1, 1000, Some(3)));
    let report = fuzzer.run().await.expect("fuzzer run");
    assert!(report.is_none(), "clean exits must be relaunched, not reported as crashes");
}

#[tokio::test]
async fn fuzzer_cycles_hung_instance_at_threshold() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Never reads stdin and never exits on its own.
    let target = common::write_script(dir.path(), "sleeper", "exec sleep 30");

    let fuzzer = CrashFuzzer::with_config(ProcessBackend::new(target), quick_config(1, 5, Some(2)));
    let start = Instant::now();
    let report = fuzzer.run().await.expect("fuzzer run");

    assert!(report.is_none(), "a forced cycle is not a crash");
    assert!(
        start.elapsed() < Duration::from_secs(10),
        "cycling must not wait out the hung target"
    );
}

#[tokio::test]
async fn fuzzer_catches_crash_landing_on_the_threshold() {
    let dir = tempfile::tempdir().expect("tempdir");
    // Dies non-zero immediately after consuming exactly threshold keys.
    let target = common::write_script(dir.path(), "edge", "head -c 5 > /dev/null\nexit 7");

    let fuzzer = CrashFuzzer::with_config(ProcessBackend::new(target), quick_config(30, 5, Some(3)));
    let report = fuzzer
        .run()
        .await
        .expect("fuzzer run")
        .expect("a crash coinciding with the threshold must not be lost");

    assert_eq!(report.exit_code, Some(7));
    assert_eq!(report.keys_sent, 5, "the full key budget was delivered before the crash");
}

#[tokio::test]
async fn fuzzer_propagates_spawn_failure() {
    let fuzzer = CrashFuzzer::new(ProcessBackend::new(PathBuf::from("/definitely/not/here")));
    let err = fuzzer.run().await.expect_err("missing binary must error");
    assert!(
        matches!(err, DriverError::SpawnFailed(_)),
        "expected SpawnFailed, got {err:?}"
    );
}

#[tokio::test]
async fn fuzzer_rejects_zero_restart_threshold() {
    let fuzzer = CrashFuzzer::with_config(
        ProcessBackend::new(PathBuf::from("sh")),
        quick_config(1, 0, Some(1)),
    );
    let err = fuzzer.run().await.expect_err("zero threshold must be rejected");
    assert!(
        matches!(err, DriverError::InvalidConfig(_)),
        "expected InvalidConfig, got {err:?}"
    );
}

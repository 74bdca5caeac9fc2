//! Entry point for the `gauntlet-fuzz` crash fuzzer.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use gauntlet_driver::{CrashFuzzer, FuzzerConfig, ProcessBackend, TargetBackend};

/// Stream random keystrokes into the target binary, cycling instances at a
/// bounded key count, until an instance dies with a non-zero status.
#[derive(Debug, Parser)]
#[command(name = "gauntlet-fuzz", version, about)]
struct Args {
    /// Path to the target program binary.
    target: PathBuf,

    /// Milliseconds to wait after each key.
    #[arg(long, default_value_t = 10)]
    key_delay_ms: u64,

    /// Keys sent to one instance before it is forcibly cycled.
    #[arg(long, default_value_t = 1000)]
    restart_threshold: u32,

    /// Stop after this many instances even without a crash. Unbounded by
    /// default.
    #[arg(long)]
    max_instances: Option<u64>,

    /// Where to write the crash report when a crash is found.
    #[arg(long, default_value = "crash-report.json")]
    report: PathBuf,
}

#[tokio::main]
async fn main() {
    gauntlet_cli::init_tracing();
    let args = Args::parse();

    let backend = ProcessBackend::new(args.target);
    if let Err(e) = backend.health_check().await {
        tracing::error!(error = %e, "target binary unavailable");
        std::process::exit(1);
    }

    let mut config = FuzzerConfig::default();
    config.key_delay = Duration::from_millis(args.key_delay_ms);
    config.restart_threshold = args.restart_threshold;
    config.max_instances = args.max_instances;

    let fuzzer = CrashFuzzer::with_config(backend, config);
    match fuzzer.run().await {
        Ok(Some(report)) => {
            println!("{report}");
            match serde_json::to_string_pretty(&report) {
                Ok(json) => {
                    if let Err(e) = tokio::fs::write(&args.report, json).await {
                        tracing::error!(
                            path = %args.report.display(),
                            error = %e,
                            "failed to persist crash report"
                        );
                    } else {
                        tracing::info!(path = %args.report.display(), "crash report written");
                    }
                }
                Err(e) => tracing::error!(error = %e, "failed to serialize crash report"),
            }
        }
        Ok(None) => {
            tracing::info!("instance budget exhausted without a crash");
        }
        Err(e) => {
            tracing::error!(error = %e, "fuzzer aborted");
            std::process::exit(1);
        }
    }
}

//! Entry point for the `gauntlet-regress` regression runner.

use std::path::PathBuf;

use clap::Parser;

use gauntlet_core::{discover, GoldenFile};
use gauntlet_driver::{ProcessBackend, RegressionRunner, TargetBackend};

/// Replay saved dungeon scenarios through the target binary and diff its
/// output against the golden-answer file, aborting on the first divergence.
#[derive(Debug, Parser)]
#[command(name = "gauntlet-regress", version, about)]
struct Args {
    /// Path to the target program binary.
    target: PathBuf,

    /// Directory holding saved scenario files.
    #[arg(long, default_value = "saved_dungeons")]
    scenarios: PathBuf,

    /// Scenario file extension to match.
    #[arg(long, default_value = "rlg327")]
    extension: String,

    /// Golden-answer file with the expected output blocks.
    #[arg(long, default_value = "saved_dungeons/path_examples.txt")]
    golden: PathBuf,
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

    let scenarios = match discover(&args.scenarios, &args.extension) {
        Ok(scenarios) => scenarios,
        Err(e) => {
            tracing::error!(dir = %args.scenarios.display(), error = %e, "scenario discovery failed");
            std::process::exit(1);
        }
    };
    if scenarios.is_empty() {
        tracing::warn!(
            dir = %args.scenarios.display(),
            extension = %args.extension,
            "no scenario files found"
        );
    }

    let golden = match GoldenFile::load(&args.golden) {
        Ok(golden) => golden,
        Err(e) => {
            tracing::error!(path = %args.golden.display(), error = %e, "cannot load golden file");
            std::process::exit(1);
        }
    };

    let runner = RegressionRunner::new(backend, golden);
    match runner.run_all(&scenarios).await {
        Ok(outcome) if outcome.is_pass() => {}
        Ok(_) => {
            // The engine already printed the verdict diagnostic.
            std::process::exit(1);
        }
        Err(e) => {
            // Missing golden entries and spawn failures abort the sweep the
            // same way a mismatch does, with the diagnostic on stdout.
            println!("{e}");
            std::process::exit(1);
        }
    }
}

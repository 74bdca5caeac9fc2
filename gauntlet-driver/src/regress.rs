//! Regression sweep engine.
//!
//! Replays every discovered scenario through the target in load-from-file
//! mode, compares the captured output against the golden file, and aborts on
//! the first divergence. One child process runs at a time, to completion,
//! before the next scenario begins.

use std::time::Instant;

use sha2::{Digest, Sha256};

use gauntlet_core::{
    first_mismatch, BlockMismatch, CapturedBlocks, GoldenFile, OutputHash, Scenario,
    ScenarioRecord,
};

use crate::target::TargetBackend;
use crate::DriverError;

/// Outcome of a regression sweep. The first failure aborts the run, so at
/// most one failing variant is ever produced.
#[derive(Debug)]
#[non_exhaustive]
pub enum RegressionOutcome {
    /// Every scenario matched all three golden blocks.
    AllPassed {
        /// One record per scenario, in sweep order.
        records: Vec<ScenarioRecord>,
    },

    /// The target exited non-zero before any comparison; its stderr was
    /// surfaced verbatim.
    TargetFailed {
        scenario: Scenario,
        status: std::process::ExitStatus,
        stderr: String,
    },

    /// A captured block diverged from its golden counterpart.
    Mismatch {
        scenario: Scenario,
        mismatch: BlockMismatch,
    },
}

impl RegressionOutcome {
    /// Whether the sweep passed in full.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, RegressionOutcome::AllPassed { .. })
    }
}

/// Replays scenarios and diffs their output against golden expectations.
pub struct RegressionRunner<B: TargetBackend> {
    backend: B,
    golden: GoldenFile,
}

impl<B: TargetBackend> RegressionRunner<B> {
    /// Create a runner over a backend and a loaded golden file.
    #[must_use]
    pub fn new(backend: B, golden: GoldenFile) -> Self {
        Self { backend, golden }
    }

    /// Run the full sweep in order, failing fast.
    ///
    /// Contractual verdict lines (pass notices, surfaced target stderr,
    /// labeled block diffs) are printed to stdout as the sweep progresses;
    /// the returned outcome mirrors them for callers.
    ///
    /// # Errors
    /// Returns [`DriverError::Golden`] when a scenario has no golden entry
    /// (or a truncated one), and propagates spawn failures. Both abort the
    /// sweep like any other first failure.
    pub async fn run_all(
        &self,
        scenarios: &[Scenario],
    ) -> Result<RegressionOutcome, DriverError> {
        let mut records = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            let started = Instant::now();
            let output = self.backend.run_scenario(scenario.path()).await?;

            if !output.status.success() {
                tracing::error!(
                    scenario = %scenario,
                    status = %output.status,
                    "target exited non-zero, aborting sweep"
                );
                print!("{}", output.stderr_text());
                return Ok(RegressionOutcome::TargetFailed {
                    scenario: scenario.clone(),
                    status: output.status,
                    stderr: output.stderr_text().into_owned(),
                });
            }

            let expected = self.golden.lookup(scenario)?;
            let actual = CapturedBlocks::from_stdout(&output.stdout_text());

            if let Some(mismatch) = first_mismatch(&actual, &expected) {
                tracing::error!(
                    scenario = %scenario,
                    block = %mismatch.kind,
                    "output diverged from golden expectation"
                );
                println!("{}", mismatch.render(scenario));
                return Ok(RegressionOutcome::Mismatch {
                    scenario: scenario.clone(),
                    mismatch,
                });
            }

            let record = ScenarioRecord::new(
                scenario.path().to_owned(),
                compute_hash(&output.stdout, &output.stderr),
                started.elapsed(),
            );
            tracing::info!(
                scenario = %scenario,
                output_hash = %record.output_hash,
                elapsed_ms = record.duration.as_millis(),
                "scenario passed"
            );
            println!("{scenario} passed");
            records.push(record);
        }

        Ok(RegressionOutcome::AllPassed { records })
    }
}

/// Compute SHA-256 of stdout + stderr concatenated, the fingerprint logged
/// for every passing run.
#[must_use]
pub fn compute_hash(stdout: &[u8], stderr: &[u8]) -> OutputHash {
    let mut hasher = Sha256::new();
    hasher.update(stdout);
    hasher.update(stderr);
    let result = hasher.finalize();
    OutputHash::new(result.into())
}

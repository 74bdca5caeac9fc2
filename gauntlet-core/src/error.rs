//! Error types for golden-answer fixtures.

use std::path::PathBuf;

/// Errors that can occur while loading or querying golden-answer fixtures.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GoldenError {
    /// No anchor line in the golden file matches the scenario path.
    #[error("no golden entry for scenario {}", .scenario.display())]
    MissingExpectation { scenario: PathBuf },

    /// The golden file ends before the scenario's record is complete.
    #[error(
        "golden record for {} is truncated: needs {} lines from the anchor, found {}",
        .scenario.display(), .needed, .have
    )]
    TruncatedRecord {
        scenario: PathBuf,
        needed: usize,
        have: usize,
    },

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

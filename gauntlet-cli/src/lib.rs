//! Command-line entry points for the gauntlet test harness.
//!
//! Two binaries share this crate: `gauntlet-regress` replays saved scenarios
//! and diffs their output against golden fixtures; `gauntlet-fuzz` streams
//! random keystrokes into the target until it crashes.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

use tracing_subscriber::EnvFilter;

/// Initialize structured logging from `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

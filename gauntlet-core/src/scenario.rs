//! Scenario fixture discovery.
//!
//! A scenario is a saved dungeon state on disk, consumed read-only and fed to
//! the target program by path. Its contents are opaque to the harness.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A saved program state to replay through the target program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scenario {
    path: PathBuf,
}

impl Scenario {
    /// Create a scenario from a fixture path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path passed to the target program's load mode.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The string matched against golden-file anchor lines.
    #[must_use]
    pub fn key(&self) -> String {
        self.path.display().to_string()
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Discover scenario files under `dir` with the given extension.
///
/// Paths are sorted lexicographically so a sweep visits scenarios in the same
/// order on every platform, independent of filesystem enumeration order.
///
/// # Errors
/// Returns the underlying I/O error if `dir` cannot be read.
pub fn discover(dir: &Path, extension: &str) -> io::Result<Vec<Scenario>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some(extension) {
            found.push(Scenario::new(path));
        }
    }
    found.sort();
    Ok(found)
}

//! Golden-answer file model.
//!
//! The golden file is a single plain-text fixture holding, for every
//! scenario, one record in a fixed-width layout: an anchor line exactly equal
//! to the scenario path, a separator line, then three 20-line blocks
//! (dungeon map, non-tunneling distance map, tunneling distance map) with a
//! one-line gap between blocks.
//!
//! The layout is kept for fixture compatibility; access goes through
//! [`GoldenFile::lookup`], which returns a structured [`GoldenRecord`] or an
//! explicit error instead of silently reading misaligned lines.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GoldenError;
use crate::scenario::Scenario;

/// Number of lines in every compared block.
pub const BLOCK_LEN: usize = 20;

/// Line ranges of the three blocks, relative to a record's anchor line.
const GOLDEN_OFFSETS: [(usize, usize); 3] = [(2, 22), (23, 43), (44, 64)];

/// Lines a complete record spans, anchor included.
const RECORD_LEN: usize = 64;

/// Which of the three compared output blocks a slice belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// The rendered dungeon map.
    Dungeon,
    /// The non-tunneling distance map.
    NoTunnel,
    /// The tunneling distance map.
    Tunnel,
}

impl BlockKind {
    /// All kinds, in the order they are compared.
    pub const ALL: [BlockKind; 3] = [BlockKind::Dungeon, BlockKind::NoTunnel, BlockKind::Tunnel];

    /// Label used in diff headers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Dungeon => "dungeon",
            BlockKind::NoTunnel => "no-tunnel",
            BlockKind::Tunnel => "tunnel",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One contiguous run of output lines, compared by exact sequence equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block(Vec<String>);

impl Block {
    /// Wrap already-stripped lines.
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }

    /// The stripped lines, in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.0
    }

    /// Lines joined with newlines, as printed in diffs.
    #[must_use]
    pub fn joined(&self) -> String {
        self.0.join("\n")
    }
}

/// Expected output for one scenario: the three golden blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenRecord {
    pub dungeon: Block,
    pub no_tunnel: Block,
    pub tunnel: Block,
}

impl GoldenRecord {
    /// The block of the given kind.
    #[must_use]
    pub fn block(&self, kind: BlockKind) -> &Block {
        match kind {
            BlockKind::Dungeon => &self.dungeon,
            BlockKind::NoTunnel => &self.no_tunnel,
            BlockKind::Tunnel => &self.tunnel,
        }
    }

    /// Render this record in the on-disk golden layout, anchored at `key`.
    ///
    /// Concatenating rendered records produces a well-formed golden file,
    /// which is how fixtures are regenerated after an intentional output
    /// change.
    #[must_use]
    pub fn render(&self, key: &str) -> String {
        let mut out = String::with_capacity(RECORD_LEN * 40);
        out.push_str(key);
        out.push_str("\n\n");
        for kind in BlockKind::ALL {
            for line in self.block(kind).lines() {
                out.push_str(line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

/// An in-memory golden-answer file, queried per scenario.
#[derive(Debug, Clone)]
pub struct GoldenFile {
    lines: Vec<String>,
}

impl GoldenFile {
    /// Load and parse a golden file from disk.
    ///
    /// # Errors
    /// Returns [`GoldenError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, GoldenError> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Parse golden-file text. Lines keep any trailing `\r`; stripping
    /// happens at extraction so anchors and blocks follow the same rules the
    /// comparison uses.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_owned).collect(),
        }
    }

    /// Total line count, trailing empty fragment included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the file held no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() || (self.lines.len() == 1 && self.lines[0].is_empty())
    }

    /// Locate the record for `scenario` by its anchor line.
    ///
    /// The anchor is the first line whose trimmed text equals the scenario
    /// key; the three blocks are read at fixed offsets from it.
    ///
    /// # Errors
    /// Returns [`GoldenError::MissingExpectation`] if no anchor matches, and
    /// [`GoldenError::TruncatedRecord`] if the file ends inside the record.
    pub fn lookup(&self, scenario: &Scenario) -> Result<GoldenRecord, GoldenError> {
        let key = scenario.key();
        let anchor = self
            .lines
            .iter()
            .position(|line| line.trim() == key)
            .ok_or_else(|| GoldenError::MissingExpectation {
                scenario: scenario.path().to_owned(),
            })?;

        let have = self.lines.len() - anchor;
        if have < RECORD_LEN {
            return Err(GoldenError::TruncatedRecord {
                scenario: scenario.path().to_owned(),
                needed: RECORD_LEN,
                have,
            });
        }

        let slice = |(start, end): (usize, usize)| -> Block {
            Block::new(
                self.lines[anchor + start..anchor + end]
                    .iter()
                    .map(|line| strip_eol(line).to_owned())
                    .collect(),
            )
        };

        Ok(GoldenRecord {
            dungeon: slice(GOLDEN_OFFSETS[0]),
            no_tunnel: slice(GOLDEN_OFFSETS[1]),
            tunnel: slice(GOLDEN_OFFSETS[2]),
        })
    }
}

/// Strip trailing newline and carriage-return characters only. Interior and
/// leading whitespace is significant in map output and must survive.
#[must_use]
pub fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

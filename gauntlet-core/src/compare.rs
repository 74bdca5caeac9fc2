//! Captured-output slicing and block comparison.
//!
//! The target program's load-mode stdout carries the same three maps the
//! golden file records, at fixed absolute line offsets. Comparison is exact
//! sequence equality per block, after stripping line endings.

use serde::{Deserialize, Serialize};

use crate::golden::{strip_eol, Block, BlockKind, GoldenRecord};
use crate::scenario::Scenario;

/// Absolute stdout line ranges of the three actual blocks.
const STDOUT_OFFSETS: [(usize, usize); 3] = [(2, 22), (24, 44), (46, 66)];

/// The three block slices extracted from one captured target run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedBlocks {
    pub dungeon: Block,
    pub no_tunnel: Block,
    pub tunnel: Block,
}

impl CapturedBlocks {
    /// Slice captured stdout at the fixed block offsets.
    ///
    /// Output shorter than a window yields a short block; that block then
    /// fails sequence equality against its 20-line golden counterpart, so
    /// truncated output is reported as a mismatch rather than a panic.
    #[must_use]
    pub fn from_stdout(stdout: &str) -> Self {
        let lines: Vec<&str> = stdout.split('\n').collect();
        let slice = |(start, end): (usize, usize)| -> Block {
            let end = end.min(lines.len());
            let start = start.min(end);
            Block::new(lines[start..end].iter().map(|l| strip_eol(l).to_owned()).collect())
        };

        Self {
            dungeon: slice(STDOUT_OFFSETS[0]),
            no_tunnel: slice(STDOUT_OFFSETS[1]),
            tunnel: slice(STDOUT_OFFSETS[2]),
        }
    }

    /// The block of the given kind.
    #[must_use]
    pub fn block(&self, kind: BlockKind) -> &Block {
        match kind {
            BlockKind::Dungeon => &self.dungeon,
            BlockKind::NoTunnel => &self.no_tunnel,
            BlockKind::Tunnel => &self.tunnel,
        }
    }
}

/// A block whose actual output diverged from the golden expectation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockMismatch {
    pub kind: BlockKind,
    pub actual: Block,
    pub expected: Block,
}

impl BlockMismatch {
    /// Render the labeled diff printed before a run aborts: a header naming
    /// the scenario and block, then both sides in full.
    #[must_use]
    pub fn render(&self, scenario: &Scenario) -> String {
        format!(
            "======== MISMATCH in {scenario}: {kind} ========\nACTUAL:\n{actual}\nEXPECTED:\n{expected}",
            kind = self.kind,
            actual = self.actual.joined(),
            expected = self.expected.joined(),
        )
    }
}

/// Compare captured blocks against a golden record in fixed order (dungeon,
/// no-tunnel, tunnel) and return the first divergence, if any.
#[must_use]
pub fn first_mismatch(actual: &CapturedBlocks, expected: &GoldenRecord) -> Option<BlockMismatch> {
    for kind in BlockKind::ALL {
        let a = actual.block(kind);
        let e = expected.block(kind);
        if a != e {
            return Some(BlockMismatch {
                kind,
                actual: a.clone(),
                expected: e.clone(),
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::golden::BLOCK_LEN;

    fn numbered(tag: &str) -> Vec<String> {
        (0..BLOCK_LEN).map(|i| format!("{tag} {i}")).collect()
    }

    /// Build load-mode stdout with the three blocks at their fixed offsets:
    /// two header lines, dungeon at [2,22), two gap lines, no-tunnel at
    /// [24,44), two gap lines, tunnel at [46,66).
    fn stdout_text(dungeon: &[String], no_tunnel: &[String], tunnel: &[String]) -> String {
        let mut lines: Vec<String> = vec!["seed 1234".to_owned(), String::new()];
        lines.extend_from_slice(dungeon);
        lines.extend([String::new(), "Non-tunneling distances:".to_owned()]);
        lines.extend_from_slice(no_tunnel);
        lines.extend([String::new(), "Tunneling distances:".to_owned()]);
        lines.extend_from_slice(tunnel);
        lines.join("\n") + "\n"
    }

    fn matching_pair() -> (CapturedBlocks, GoldenRecord) {
        let (d, n, t) = (numbered("dun"), numbered("not"), numbered("tun"));
        let actual = CapturedBlocks::from_stdout(&stdout_text(&d, &n, &t));
        let expected = GoldenRecord {
            dungeon: Block::new(d),
            no_tunnel: Block::new(n),
            tunnel: Block::new(t),
        };
        (actual, expected)
    }

    #[test]
    fn equal_blocks_have_no_mismatch() {
        let (actual, expected) = matching_pair();
        assert_eq!(first_mismatch(&actual, &expected), None);
    }

    #[test]
    fn stdout_slicing_is_positionally_exact() {
        let (actual, _) = matching_pair();
        assert_eq!(actual.dungeon.lines().len(), BLOCK_LEN);
        assert_eq!(actual.dungeon.lines()[0], "dun 0");
        assert_eq!(actual.no_tunnel.lines()[0], "not 0");
        assert_eq!(actual.tunnel.lines()[19], "tun 19");
    }

    #[test]
    fn first_mismatch_reports_earliest_block() {
        let (actual, mut expected) = matching_pair();
        // Perturb both later blocks; the dungeon block must win.
        expected.no_tunnel = Block::new(numbered("other"));
        expected.tunnel = Block::new(numbered("other"));
        let mut expected_dungeon = numbered("dun");
        expected_dungeon[7] = "dun seven".to_owned();
        expected.dungeon = Block::new(expected_dungeon);

        let mismatch = first_mismatch(&actual, &expected).expect("must mismatch");
        assert_eq!(mismatch.kind, BlockKind::Dungeon);
    }

    #[test]
    fn single_block_divergence_names_that_block() {
        let (actual, mut expected) = matching_pair();
        let mut lines = numbered("tun");
        lines[0] = "tun zero".to_owned();
        expected.tunnel = Block::new(lines);

        let mismatch = first_mismatch(&actual, &expected).expect("must mismatch");
        assert_eq!(mismatch.kind, BlockKind::Tunnel);
        assert_eq!(mismatch.actual.lines()[0], "tun 0");
        assert_eq!(mismatch.expected.lines()[0], "tun zero");
    }

    #[test]
    fn short_stdout_mismatches_instead_of_panicking() {
        let (_, expected) = matching_pair();
        let actual = CapturedBlocks::from_stdout("only\nthree\nlines");
        let mismatch = first_mismatch(&actual, &expected).expect("must mismatch");
        assert_eq!(mismatch.kind, BlockKind::Dungeon, "short output fails the first block");
    }

    #[test]
    fn carriage_returns_are_stripped_before_comparison() {
        let (d, n, t) = (numbered("dun"), numbered("not"), numbered("tun"));
        let crlf = stdout_text(&d, &n, &t).replace('\n', "\r\n");
        let actual = CapturedBlocks::from_stdout(&crlf);
        let expected = GoldenRecord {
            dungeon: Block::new(d),
            no_tunnel: Block::new(n),
            tunnel: Block::new(t),
        };
        assert_eq!(first_mismatch(&actual, &expected), None);
    }

    #[test]
    fn render_labels_block_and_shows_both_sides() {
        let (actual, mut expected) = matching_pair();
        let mut lines = numbered("not");
        lines[3] = "not tres".to_owned();
        expected.no_tunnel = Block::new(lines);

        let mismatch = first_mismatch(&actual, &expected).expect("must mismatch");
        let rendered = mismatch.render(&Scenario::new("saved_dungeons/foo.rlg327"));
        assert!(rendered.contains("saved_dungeons/foo.rlg327"));
        assert!(rendered.contains("no-tunnel"));
        let actual_at = rendered.find("ACTUAL:").expect("ACTUAL section");
        let expected_at = rendered.find("EXPECTED:").expect("EXPECTED section");
        assert!(actual_at < expected_at, "ACTUAL must precede EXPECTED");
        assert!(rendered.contains("not tres"));
    }
}

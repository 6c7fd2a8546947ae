//! Line-level diff computation with bounded lookahead.

/// How many positions each probe scans ahead before giving up.
///
/// A mismatch that realigns further ahead than this is rendered as
/// pairwise delete/insert replacements instead of a single run.
pub const LOOKAHEAD_WINDOW: usize = 4;

/// One element of a computed diff. The order of a `Vec<DiffOp>` is the
/// render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOp {
    /// Line present in both versions.
    Context(String),
    /// Line present only in the new version.
    Insert(String),
    /// Line present only in the old version.
    Delete(String),
}

/// Compute a line diff between two versions of a file.
///
/// Two cursors walk `old` and `new`. On a mismatch, a forward probe over
/// the next [`LOOKAHEAD_WINDOW`] lines of `new` looks for the current old
/// line (an insertion run); if that fails, the symmetric probe over `old`
/// looks for the current new line (a deletion run); if both fail, the pair
/// is emitted as a delete/insert replacement. The insert probe runs before
/// the delete probe; swapping them changes output for ambiguous inputs.
///
/// The result reconstructs both inputs exactly: the `Context` + `Delete`
/// lines in order equal `old`, and the `Context` + `Insert` lines in order
/// equal `new`.
pub fn diff_lines(old: &[String], new: &[String]) -> Vec<DiffOp> {
    let mut ops = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < old.len() || j < new.len() {
        if i < old.len() && j < new.len() {
            if old[i] == new[j] {
                ops.push(DiffOp::Context(old[i].clone()));
                i += 1;
                j += 1;
            } else if let Some(k) = find_ahead(new, j, &old[i]) {
                // Old line reappears shortly in new: the lines before it
                // are insertions.
                for line in &new[j..k] {
                    ops.push(DiffOp::Insert(line.clone()));
                }
                ops.push(DiffOp::Context(old[i].clone()));
                i += 1;
                j = k + 1;
            } else if let Some(k) = find_ahead(old, i, &new[j]) {
                // New line reappears shortly in old: the lines before it
                // are deletions.
                for line in &old[i..k] {
                    ops.push(DiffOp::Delete(line.clone()));
                }
                ops.push(DiffOp::Context(new[j].clone()));
                i = k + 1;
                j += 1;
            } else {
                ops.push(DiffOp::Delete(old[i].clone()));
                ops.push(DiffOp::Insert(new[j].clone()));
                i += 1;
                j += 1;
            }
        } else if i < old.len() {
            ops.push(DiffOp::Delete(old[i].clone()));
            i += 1;
        } else {
            ops.push(DiffOp::Insert(new[j].clone()));
            j += 1;
        }
    }

    ops
}

/// Scan `lines[from + 1..]` for `needle`, at most [`LOOKAHEAD_WINDOW`]
/// positions ahead. Returns the matching index.
fn find_ahead(lines: &[String], from: usize, needle: &str) -> Option<usize> {
    let end = lines.len().min(from + 1 + LOOKAHEAD_WINDOW);
    (from + 1..end).find(|&k| lines[k] == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Reassemble the old version from Context + Delete ops.
    fn old_side(ops: &[DiffOp]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                DiffOp::Context(l) | DiffOp::Delete(l) => Some(l.clone()),
                DiffOp::Insert(_) => None,
            })
            .collect()
    }

    /// Reassemble the new version from Context + Insert ops.
    fn new_side(ops: &[DiffOp]) -> Vec<String> {
        ops.iter()
            .filter_map(|op| match op {
                DiffOp::Context(l) | DiffOp::Insert(l) => Some(l.clone()),
                DiffOp::Delete(_) => None,
            })
            .collect()
    }

    fn assert_round_trip(old: &[String], new: &[String]) {
        let ops = diff_lines(old, new);
        assert_eq!(old_side(&ops), old, "old side must reconstruct exactly");
        assert_eq!(new_side(&ops), new, "new side must reconstruct exactly");
    }

    #[test]
    fn test_identical_sequences_are_all_context() {
        let s = lines(&["fn main() {", "    run();", "}"]);
        let ops = diff_lines(&s, &s);
        assert_eq!(ops.len(), s.len());
        assert!(ops.iter().all(|op| matches!(op, DiffOp::Context(_))));
        assert_round_trip(&s, &s);
    }

    #[test]
    fn test_pure_deletion() {
        let old = lines(&["a", "b", "c"]);
        let ops = diff_lines(&old, &[]);
        assert_eq!(
            ops,
            vec![
                DiffOp::Delete("a".into()),
                DiffOp::Delete("b".into()),
                DiffOp::Delete("c".into()),
            ]
        );
    }

    #[test]
    fn test_pure_insertion() {
        let new = lines(&["a", "b", "c"]);
        let ops = diff_lines(&[], &new);
        assert_eq!(
            ops,
            vec![
                DiffOp::Insert("a".into()),
                DiffOp::Insert("b".into()),
                DiffOp::Insert("c".into()),
            ]
        );
    }

    #[test]
    fn test_both_empty() {
        assert!(diff_lines(&[], &[]).is_empty());
    }

    #[test]
    fn test_insertion_within_window() {
        let old = lines(&["a", "b", "c"]);
        let new = lines(&["a", "x", "b", "c"]);
        assert_eq!(
            diff_lines(&old, &new),
            vec![
                DiffOp::Context("a".into()),
                DiffOp::Insert("x".into()),
                DiffOp::Context("b".into()),
                DiffOp::Context("c".into()),
            ]
        );
    }

    #[test]
    fn test_deletion_within_window() {
        let old = lines(&["a", "x", "b", "c"]);
        let new = lines(&["a", "b", "c"]);
        assert_eq!(
            diff_lines(&old, &new),
            vec![
                DiffOp::Context("a".into()),
                DiffOp::Delete("x".into()),
                DiffOp::Context("b".into()),
                DiffOp::Context("c".into()),
            ]
        );
    }

    #[test]
    fn test_replacement_pairs_when_no_probe_matches() {
        let old = lines(&["a", "b"]);
        let new = lines(&["x", "y"]);
        assert_eq!(
            diff_lines(&old, &new),
            vec![
                DiffOp::Delete("a".into()),
                DiffOp::Insert("x".into()),
                DiffOp::Delete("b".into()),
                DiffOp::Insert("y".into()),
            ]
        );
    }

    /// Gap wider than the lookahead window: both probes miss at the first
    /// mismatch, so the engine falls back to one replacement pair and then
    /// drains the rest of old as deletions. Pinned by hand-tracing the
    /// algorithm; do not "fix" this to a collapsed delete run.
    #[test]
    fn test_gap_beyond_window_falls_back_to_replacement() {
        let old = lines(&["a", "p", "q", "r", "s", "t", "b"]);
        let new = lines(&["a", "b"]);
        assert_eq!(
            diff_lines(&old, &new),
            vec![
                DiffOp::Context("a".into()),
                DiffOp::Delete("p".into()),
                DiffOp::Insert("b".into()),
                DiffOp::Delete("q".into()),
                DiffOp::Delete("r".into()),
                DiffOp::Delete("s".into()),
                DiffOp::Delete("t".into()),
                DiffOp::Delete("b".into()),
            ]
        );
        assert_round_trip(&old, &new);
    }

    /// A match exactly at the edge of the window is still found: the probe
    /// covers LOOKAHEAD_WINDOW positions past the cursor.
    #[test]
    fn test_match_at_window_edge_is_found() {
        let old = lines(&["a", "b"]);
        let new = lines(&["a", "w", "x", "y", "z", "b"]);
        assert_eq!(
            diff_lines(&old, &new),
            vec![
                DiffOp::Context("a".into()),
                DiffOp::Insert("w".into()),
                DiffOp::Insert("x".into()),
                DiffOp::Insert("y".into()),
                DiffOp::Insert("z".into()),
                DiffOp::Context("b".into()),
            ]
        );
    }

    /// One position past the window edge and the probe misses.
    #[test]
    fn test_match_past_window_edge_is_missed() {
        let old = lines(&["a", "b"]);
        let new = lines(&["a", "v", "w", "x", "y", "z", "b"]);
        let ops = diff_lines(&old, &new);
        assert_eq!(
            ops[..2],
            [DiffOp::Context("a".into()), DiffOp::Delete("b".into())]
        );
        assert_round_trip(&old, &new);
    }

    /// The insert probe wins over the delete probe when both would match.
    #[test]
    fn test_insert_probe_takes_precedence() {
        // old[0]="x" appears at new[1], and new[0]="y" appears at old[1]:
        // the insert probe fires first, emitting "y" as an insertion.
        let old = lines(&["x", "y"]);
        let new = lines(&["y", "x"]);
        assert_eq!(
            diff_lines(&old, &new),
            vec![
                DiffOp::Insert("y".into()),
                DiffOp::Context("x".into()),
                DiffOp::Delete("y".into()),
            ]
        );
        assert_round_trip(&old, &new);
    }

    #[test]
    fn test_round_trip_mixed_edit() {
        let old = lines(&["use std::fs;", "", "fn read() {}", "fn write() {}", "fn main() {}"]);
        let new = lines(&["use std::fs;", "use std::io;", "", "fn read() {}", "fn main() {}"]);
        assert_round_trip(&old, &new);
    }

    #[test]
    fn test_round_trip_empty_lines_and_duplicates() {
        let old = lines(&["", "a", "", "a", ""]);
        let new = lines(&["a", "", "", "b", "a"]);
        assert_round_trip(&old, &new);
    }

    #[test]
    fn test_round_trip_one_sided_empties() {
        assert_round_trip(&lines(&[""]), &lines(&["a", "b"]));
        assert_round_trip(&lines(&["a", "b"]), &lines(&[""]));
    }

    #[test]
    fn test_deterministic_output() {
        let old = lines(&["a", "b", "c", "d"]);
        let new = lines(&["a", "c", "x", "d"]);
        assert_eq!(diff_lines(&old, &new), diff_lines(&old, &new));
    }
}

//! Unified-diff-style rendering of file changes.

use std::fmt;

use crate::diff::engine::{DiffOp, diff_lines};
use crate::diff::split::split_lines;

/// Kind of change for a staged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => write!(f, "Added"),
            ChangeKind::Modified => write!(f, "Modified"),
            ChangeKind::Deleted => write!(f, "Deleted"),
        }
    }
}

/// Render a whole-file insertion. Returns the number of `+` lines emitted.
///
/// Added files bypass the diff engine: every line of the new content is an
/// insertion.
pub fn render_added(out: &mut String, path: &str, content: &str) -> usize {
    out.push_str("--- /dev/null\n");
    out.push_str(&format!("+++ b/{path}\n"));
    push_whole_file(out, '+', &split_lines(content))
}

/// Render a whole-file deletion. Returns the number of `-` lines emitted.
pub fn render_deleted(out: &mut String, path: &str, content: &str) -> usize {
    out.push_str(&format!("--- a/{path}\n"));
    out.push_str("+++ /dev/null\n");
    push_whole_file(out, '-', &split_lines(content))
}

/// Render a modification as a computed line diff.
/// Returns `(additions, deletions)`.
pub fn render_modified(out: &mut String, path: &str, old: &str, new: &str) -> (usize, usize) {
    out.push_str(&format!("--- a/{path}\n"));
    out.push_str(&format!("+++ b/{path}\n"));

    let old_lines = split_lines(old);
    let new_lines = split_lines(new);

    let mut additions = 0;
    let mut deletions = 0;
    for op in diff_lines(&old_lines, &new_lines) {
        match op {
            DiffOp::Context(line) => push_line(out, ' ', &line),
            DiffOp::Insert(line) => {
                push_line(out, '+', &line);
                additions += 1;
            }
            DiffOp::Delete(line) => {
                push_line(out, '-', &line);
                deletions += 1;
            }
        }
    }
    (additions, deletions)
}

/// Emit one prefixed line per element of a single-sided file.
///
/// A sequence consisting solely of separator-produced empty lines emits one
/// line fewer than its element count: empty content has no body at all, and
/// a lone newline is a single empty line.
fn push_whole_file(out: &mut String, prefix: char, lines: &[String]) -> usize {
    let count = if lines.iter().all(|l| l.is_empty()) {
        lines.len().saturating_sub(1)
    } else {
        lines.len()
    };

    for line in &lines[..count] {
        push_line(out, prefix, line);
    }
    count
}

fn push_line(out: &mut String, prefix: char, line: &str) {
    out.push(prefix);
    out.push_str(line);
    out.push('\n');
}

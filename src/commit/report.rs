//! Staged-change collection and unified diff report assembly.

use git2::{Delta, ErrorCode, Repository, Tree};
use tracing::warn;

use crate::diff::{ChangeKind, render_added, render_deleted, render_modified};
use crate::error::CommitError;
use crate::git::{head_content, working_content};

/// Maximum characters for the report's diff text before truncation.
const MAX_DIFF_LENGTH: usize = 30_000;

/// A file with staged changes.
#[derive(Debug, Clone)]
pub struct ChangedFile {
    pub path: String,
    pub kind: ChangeKind,
}

/// Unified diff report over all staged changes.
#[derive(Debug, Clone)]
pub struct DiffReport {
    pub diff_text: String,
    pub changed_files: Vec<ChangedFile>,
    pub truncated: bool,
    pub additions: usize,
    pub deletions: usize,
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found):
/// diffing the index against no tree classifies every staged file as added.
fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, CommitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(CommitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(CommitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Build the diff report for everything staged in the index.
///
/// Enumerates HEAD-vs-index deltas, sorts them by path so the report is
/// reproducible regardless of index order, and renders one unified-diff
/// block per file. A file whose content cannot be read gets an inline error
/// annotation in place of its body; the remaining files still render.
pub fn build_report(repo: &Repository) -> Result<DiffReport, CommitError> {
    let head_tree = resolve_head_tree(repo)?;

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(CommitError::DiffFailed)?;

    let mut changed_files = Vec::new();
    for delta_idx in 0..diff.deltas().len() {
        let Some(delta) = diff.get_delta(delta_idx) else {
            continue;
        };
        let kind = match delta.status() {
            Delta::Added => ChangeKind::Added,
            Delta::Deleted => ChangeKind::Deleted,
            _ => ChangeKind::Modified,
        };
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .map(|p| p.to_string_lossy().to_string());

        if let Some(path) = path
            && !path.is_empty()
        {
            changed_files.push(ChangedFile { path, kind });
        }
    }

    changed_files.sort_by(|a, b| a.path.cmp(&b.path));
    changed_files.dedup_by(|a, b| a.path == b.path);

    if changed_files.is_empty() {
        return Err(CommitError::NoChanges);
    }

    let mut diff_text = String::new();
    let mut additions = 0usize;
    let mut deletions = 0usize;
    let mut truncated = false;

    for file in &changed_files {
        if truncated {
            break;
        }

        let (block, block_additions, block_deletions) = file_block(repo, file);
        if diff_text.len() + block.len() > MAX_DIFF_LENGTH {
            warn!(path = %file.path, "Diff report truncated at {MAX_DIFF_LENGTH} chars");
            truncated = true;
            continue;
        }

        diff_text.push_str(&block);
        additions += block_additions;
        deletions += block_deletions;
    }

    Ok(DiffReport {
        diff_text,
        changed_files,
        truncated,
        additions,
        deletions,
    })
}

/// Render one file's diff block, `diff --git` framing included.
///
/// Content-acquisition failures become inline annotations instead of
/// propagating; one unreadable file must not block the report.
fn file_block(repo: &Repository, file: &ChangedFile) -> (String, usize, usize) {
    let path = &file.path;
    let mut block = format!("diff --git a/{path} b/{path}\n");
    let mut additions = 0;
    let mut deletions = 0;

    match file.kind {
        ChangeKind::Added => {
            block.push_str("new file mode 100644\n");
            block.push_str("index 0000000..0000000\n");
            match working_content(repo, path) {
                Ok(content) => additions = render_added(&mut block, path, &content),
                Err(e) => {
                    warn!(path = %path, "Could not read new file: {e}");
                    block.push_str(&format!("error reading new file {path}: {e}\n"));
                }
            }
        }
        ChangeKind::Modified => {
            block.push_str("index 0000000..0000000 100644\n");
            match (head_content(repo, path), working_content(repo, path)) {
                (Ok(old), Ok(new)) => {
                    (additions, deletions) = render_modified(&mut block, path, &old, &new);
                }
                (Err(e), _) | (_, Err(e)) => {
                    warn!(path = %path, "Could not diff file: {e}");
                    block.push_str(&format!("error generating diff for {path}: {e}\n"));
                }
            }
        }
        ChangeKind::Deleted => {
            block.push_str("deleted file mode 100644\n");
            block.push_str("index 0000000..0000000\n");
            match head_content(repo, path) {
                Ok(content) => deletions = render_deleted(&mut block, path, &content),
                Err(e) => {
                    warn!(path = %path, "Could not read deleted file: {e}");
                    block.push_str(&format!("error reading deleted file {path}: {e}\n"));
                }
            }
        }
    }

    block.push('\n');
    (block, additions, deletions)
}

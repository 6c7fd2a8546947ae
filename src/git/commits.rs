//! Recent commit history for prompt context.

use git2::{ErrorCode, Repository};

use crate::error::GitError;

/// Fetch the messages of the most recent commits, newest first.
///
/// Returns an empty list for repositories with no commits yet (unborn
/// branch), since there is no history to match style against.
pub fn recent_commits(repo: &Repository, limit: usize) -> Result<Vec<String>, GitError> {
    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;

    match revwalk.push_head() {
        Ok(()) => {}
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(Vec::new());
        }
        Err(e) => return Err(GitError::RevwalkError(e)),
    }

    let mut messages = Vec::new();
    for oid_result in revwalk.take(limit) {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        messages.push(commit.message().unwrap_or("").trim_end().to_string());
    }

    Ok(messages)
}

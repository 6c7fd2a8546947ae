//! Repository access: opening, content lookup at HEAD and in the working
//! tree, branch name.

use std::path::Path;

use git2::Repository;

use crate::error::GitError;

/// Open the repository enclosing the current directory.
pub fn open_repo() -> Result<Repository, GitError> {
    Repository::discover(".").map_err(GitError::OpenRepository)
}

/// Read a file's content from the HEAD tree.
///
/// Non-UTF-8 bytes are replaced rather than rejected; the diff operates on
/// whatever text comes out.
pub fn head_content(repo: &Repository, path: &str) -> Result<String, GitError> {
    let wrap = |source| GitError::HeadContent {
        path: path.to_string(),
        source,
    };

    let tree = repo
        .head()
        .and_then(|head| head.peel_to_tree())
        .map_err(wrap)?;
    let entry = tree.get_path(Path::new(path)).map_err(wrap)?;
    let object = entry.to_object(repo).map_err(wrap)?;
    let blob = object
        .into_blob()
        .map_err(|_| wrap(git2::Error::from_str("object is not a blob")))?;

    Ok(String::from_utf8_lossy(blob.content()).into_owned())
}

/// Read a file's content from the working tree.
pub fn working_content(repo: &Repository, path: &str) -> Result<String, GitError> {
    let workdir = repo.workdir().ok_or(GitError::BareRepository)?;
    let bytes = std::fs::read(workdir.join(path)).map_err(|source| GitError::WorkingContent {
        path: path.to_string(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Shorthand name of the current branch, if HEAD points at one.
pub fn current_branch(repo: &Repository) -> Option<String> {
    let head = repo.head().ok()?;
    head.shorthand().map(str::to_string)
}

//! Git operations using git2-rs.

pub mod commit;
pub mod commits;
pub mod repo;

pub use commit::create_commit;
pub use commits::recent_commits;
pub use repo::{current_branch, head_content, open_repo, working_content};

//! Staged-change reporting and AI-generated commit messages.

pub mod message;
pub mod prompt;
pub mod report;

pub use message::{CommitMessage, generate_commit_message};
pub use prompt::build_commit_prompt;
pub use report::{ChangedFile, DiffReport, build_report};

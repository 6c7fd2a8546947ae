//! Error types for scriv modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to read '{path}' at HEAD: {source}")]
    HeadContent {
        path: String,
        #[source]
        source: git2::Error,
    },

    #[error("Failed to read '{path}' from the working tree: {source}")]
    WorkingContent {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Repository has no working directory (bare repository)")]
    BareRepository,

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),
}

/// Errors from staged-change collection and commit creation.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("No staged changes to commit")]
    NoChanges,

    #[error("Failed to collect staged changes: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to write the staged index: {0}")]
    StagingFailed(#[source] git2::Error),

    #[error("Failed to create commit: {0}")]
    CommitFailed(#[source] git2::Error),

    #[error("Git config error (missing user.name or user.email): {0}")]
    ConfigError(#[source] git2::Error),
}

/// Errors from Ollama CLI operations.
#[derive(Error, Debug)]
pub enum OllamaError {
    #[error(
        "Ollama CLI not found. Install from https://ollama.com/download and pull a model with: ollama pull qwen2.5-coder:1.5b"
    )]
    NotInstalled,

    #[error("Ollama CLI failed to execute: {0}")]
    ExecutionFailed(String),

    #[error("Failed to spawn Ollama process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Ollama returned invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Ollama process timed out after {0} seconds")]
    Timeout(u64),

    #[error("Ollama CLI exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<OllamaError>),
}

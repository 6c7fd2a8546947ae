//! Commit message type and the generation entry point.

use serde::Deserialize;
use tracing::debug;

use crate::commit::prompt::build_commit_prompt;
use crate::commit::report::DiffReport;
use crate::error::OllamaError;
use crate::ollama::retry::{OllamaExecutor, generate_with_retry};

/// A parsed commit message from the LLM.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitMessage {
    pub subject: String,
    pub body: Option<String>,
}

impl CommitMessage {
    /// Format the commit message for git.
    ///
    /// Produces:
    /// ```text
    /// type(scope): subject
    ///
    /// Body text explaining why.
    /// ```
    pub fn format(&self) -> String {
        let subject = self.subject.trim();
        match self.body.as_ref().map(|b| b.trim()) {
            Some(body) if !body.is_empty() => format!("{subject}\n\n{body}"),
            _ => subject.to_string(),
        }
    }
}

/// Generate a commit message for the staged changes using the LLM.
pub async fn generate_commit_message<E: OllamaExecutor>(
    report: &DiffReport,
    recent_commits: &[String],
    branch_name: &str,
    model: &str,
    executor: &E,
) -> Result<CommitMessage, OllamaError> {
    let prompt = build_commit_prompt(report, recent_commits, branch_name);

    debug!("Commit prompt length: {} chars", prompt.len());
    debug!(
        "Report: {} files, {} additions, {} deletions, truncated={}",
        report.changed_files.len(),
        report.additions,
        report.deletions,
        report.truncated
    );

    generate_with_retry(executor, model, &prompt).await
}

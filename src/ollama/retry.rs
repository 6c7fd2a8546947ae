//! Exponential backoff retry logic for the Ollama CLI.

use std::time::Duration;

use async_trait::async_trait;
use backoff::ExponentialBackoff;
use backoff::backoff::Backoff;
use tracing::debug;

use crate::commit::CommitMessage;
use crate::error::OllamaError;
use crate::ollama::json::extract_json;
use crate::ollama::subprocess::run_ollama;

/// 3 attempts, base 1s, max 30s.
const MAX_RETRIES: u32 = 3;
const INITIAL_INTERVAL_SECS: u64 = 1;
const MAX_INTERVAL_SECS: u64 = 30;

/// Executor seam over the Ollama subprocess so tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OllamaExecutor: Send + Sync {
    async fn run(&self, model: &str, prompt: &str) -> Result<String, OllamaError>;
}

/// Production executor: spawns the real Ollama CLI.
pub struct DefaultExecutor;

#[async_trait]
impl OllamaExecutor for DefaultExecutor {
    async fn run(&self, model: &str, prompt: &str) -> Result<String, OllamaError> {
        run_ollama(model, prompt).await
    }
}

/// Generate a commit message with retry logic.
///
/// Retries up to 3 times with exponential backoff. A response that cannot
/// be parsed as a commit message counts as a failed attempt; small local
/// models produce malformed JSON often enough that a fresh sample is the
/// recovery path.
pub async fn generate_with_retry<E: OllamaExecutor>(
    executor: &E,
    model: &str,
    prompt: &str,
) -> Result<CommitMessage, OllamaError> {
    let mut backoff = ExponentialBackoff {
        initial_interval: Duration::from_secs(INITIAL_INTERVAL_SECS),
        max_interval: Duration::from_secs(MAX_INTERVAL_SECS),
        max_elapsed_time: None, // retries are counted manually
        ..Default::default()
    };

    let mut last_error = OllamaError::ExecutionFailed("no attempts were made".to_string());

    for attempt in 1..=MAX_RETRIES {
        match try_generate(executor, model, prompt).await {
            Ok(message) => return Ok(message),
            Err(e) => {
                debug!("Attempt {attempt}/{MAX_RETRIES} failed: {e}");
                last_error = e;

                if attempt < MAX_RETRIES
                    && let Some(wait) = backoff.next_backoff()
                {
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    Err(OllamaError::RetriesExhausted(Box::new(last_error)))
}

/// Single attempt: run the model, then parse its response.
async fn try_generate<E: OllamaExecutor>(
    executor: &E,
    model: &str,
    prompt: &str,
) -> Result<CommitMessage, OllamaError> {
    let response = executor.run(model, prompt).await?;
    parse_response(&response)
}

/// Parse the model's raw response text into a [`CommitMessage`].
fn parse_response(response: &str) -> Result<CommitMessage, OllamaError> {
    let json_str = extract_json(response);

    let message: CommitMessage = serde_json::from_str(&json_str).map_err(|e| {
        OllamaError::InvalidJson(format!(
            "Could not parse commit message: {}. Response: {}",
            e,
            &response[..response.len().min(200)]
        ))
    })?;

    if message.subject.trim().is_empty() {
        return Err(OllamaError::InvalidJson(
            "Commit message subject is empty".to_string(),
        ));
    }

    Ok(message)
}

//! Ollama CLI spawning.

use std::env;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

use crate::error::OllamaError;

/// Default timeout for Ollama subprocess execution (2 minutes).
///
/// Local models answer well within this on typical hardware; cold model
/// loads are the slow case.
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "SCRIV_OLLAMA_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from SCRIV_OLLAMA_TIMEOUT if set, otherwise uses the default of
/// 120 seconds. Logs a warning if the variable is set but not a number.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Check if the Ollama CLI is installed and accessible.
///
/// Uses the `which` crate for cross-platform executable detection, then
/// verifies the binary actually runs.
pub async fn check_ollama_installed() -> Result<(), OllamaError> {
    if which::which("ollama").is_err() {
        return Err(OllamaError::NotInstalled);
    }

    let version_check = Command::new("ollama")
        .arg("--version")
        .output()
        .await
        .map_err(OllamaError::SpawnFailed)?;

    if !version_check.status.success() {
        return Err(OllamaError::NotInstalled);
    }

    Ok(())
}

/// Run `ollama run <model>` with the given prompt and return the raw
/// response text.
///
/// The prompt is passed as an argument, which keeps the invocation
/// non-interactive. If the subprocess exceeds the configured timeout,
/// returns `OllamaError::Timeout`.
pub async fn run_ollama(model: &str, prompt: &str) -> Result<String, OllamaError> {
    let timeout_duration = get_timeout();
    let timeout_secs = timeout_duration.as_secs();

    let output = timeout(
        timeout_duration,
        Command::new("ollama")
            .arg("run")
            .arg(model)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| OllamaError::Timeout(timeout_secs))?
    .map_err(OllamaError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(OllamaError::NonZeroExit { code, stderr });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    Ok(stdout)
}

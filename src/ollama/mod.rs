//! Ollama CLI integration.

pub mod json;
pub mod retry;
pub mod subprocess;

pub use json::extract_json;
pub use retry::{DefaultExecutor, OllamaExecutor, generate_with_retry};
pub use subprocess::{check_ollama_installed, run_ollama};

//! scriv - CLI entry point.

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use tracing_subscriber::EnvFilter;

use scriv::commit::{build_report, generate_commit_message};
use scriv::error::CommitError;
use scriv::git::{create_commit, current_branch, open_repo, recent_commits};
use scriv::ollama::{DefaultExecutor, check_ollama_installed};

/// Generate a commit message for staged changes using a local LLM.
#[derive(Parser, Debug)]
#[command(name = "scriv")]
#[command(about = "Generate a commit message for staged changes using a local LLM")]
#[command(version)]
struct Cli {
    /// Ollama model used for generation
    #[arg(long, default_value = "qwen2.5-coder:1.5b")]
    model: String,

    /// Number of recent commits included as style context
    #[arg(long, default_value_t = 10)]
    context: usize,

    /// Print the generated message without committing
    #[arg(long)]
    dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Step 1: Check prerequisites
    check_ollama_installed()
        .await
        .context("Ollama CLI is required")?;

    // Step 2: Open git repository
    let repo = open_repo().context("Not a git repository. Run scriv from within a git repository.")?;

    // Step 3: Collect staged changes
    let report = match build_report(&repo) {
        Ok(report) => report,
        Err(CommitError::NoChanges) => {
            println!("Nothing staged. Stage changes with 'git add' first.");
            return Ok(());
        }
        Err(e) => return Err(e).context("Failed to collect staged changes"),
    };

    println!(
        "Found {} staged file(s) (+{} / -{})",
        report.changed_files.len(),
        report.additions,
        report.deletions
    );

    // Step 4: Gather prompt context
    let history = recent_commits(&repo, cli.context).context("Failed to read commit history")?;
    let branch = current_branch(&repo).unwrap_or_else(|| "HEAD".to_string());

    // Step 5: Generate the message
    println!("Generating commit message with {}...", cli.model);
    let executor = DefaultExecutor;
    let message = generate_commit_message(&report, &history, &branch, &cli.model, &executor)
        .await
        .context("Failed to generate commit message")?;

    let formatted = message.format();
    println!("\n{formatted}\n");

    if cli.dry_run {
        return Ok(());
    }

    // Step 6: Confirm and commit
    if !cli.yes {
        let confirmed = Confirm::new()
            .with_prompt("Commit staged changes with this message?")
            .default(true)
            .interact()
            .context("Confirmation prompt failed")?;
        if !confirmed {
            println!("Aborted. Nothing was committed.");
            return Ok(());
        }
    }

    let oid = create_commit(&repo, &formatted).context("Failed to create commit")?;
    let oid_str = oid.to_string();
    println!("✓ Committed {}: {}", &oid_str[..7], message.subject.trim());

    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` raises the crate's level to
/// debug. Diagnostics go to stderr so stdout stays clean for the message.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "scriv=debug" } else { "scriv=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

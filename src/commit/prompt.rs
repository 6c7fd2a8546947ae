//! Prompt construction for AI-generated commit messages.

use regex_lite::Regex;

use crate::commit::report::DiffReport;

/// Maximum length for sanitized diff text inside the prompt.
const MAX_DIFF_SANITIZED_LENGTH: usize = 30_000;

/// Build the LLM prompt for generating a commit message.
///
/// Includes the list of staged files, the sanitized unified diff, recent
/// commit messages for style matching, and the branch name for issue
/// reference extraction. Requests JSON output for reliable parsing.
pub fn build_commit_prompt(diff: &DiffReport, recent_commits: &[String], branch_name: &str) -> String {
    let files_section: String = diff
        .changed_files
        .iter()
        .map(|f| format!("- {} ({})", f.path, f.kind))
        .collect::<Vec<_>>()
        .join("\n");

    let history_section = if recent_commits.is_empty() {
        "(no commits yet)".to_string()
    } else {
        recent_commits.join("\n---\n")
    };

    let sanitized_diff = sanitize_diff(&diff.diff_text, MAX_DIFF_SANITIZED_LENGTH);

    let truncation_note = if diff.truncated {
        "\n\nNote: The diff was truncated due to size. Focus on the visible changes."
    } else {
        ""
    };

    format!(
        r#"You are generating a Git commit message following the Conventional Commits specification.

## Staged Files ({additions} additions, {deletions} deletions)
{files_section}

## Diff
```
{sanitized_diff}
```{truncation_note}

## Recent Commits (match their style)
{history_section}

## Branch Context
Branch: {branch_name}

## Subject Line Rules (STRICT)
- Format: `type(scope): description`
- Type: one of feat, fix, build, chore, ci, docs, style, refactor, perf, test
- Scope: infer from the primary module affected. Use the user-facing concept, not the file name. Omit the scope if the recent commits do not use scopes.
- Description: imperative mood ("add", "fix", "remove"), lowercase after the colon, NO period at the end
- HARD LIMIT: the ENTIRE subject line MUST be 50 characters or fewer. If your first draft exceeds 50 characters, shorten it.

## Body Rules
The diff already shows WHAT changed. The body MUST explain WHY.
- Wrap lines at 72 characters
- If the branch contains an issue key (e.g., `feat/SCR-42`), add a reference like `Closes SCR-42` on its own line
- For trivial changes (typos, formatting), body may be null

## Output Format
Respond with ONLY a JSON object (no markdown, no explanation):
{{"subject": "type(scope): desc", "body": "why this change was made"}}"#,
        additions = diff.additions,
        deletions = diff.deletions,
    )
}

/// Sanitize diff text for inclusion in an LLM prompt.
///
/// Applies control-char removal, ANSI escape removal, injection pattern
/// filtering, whitespace normalization, and a length cap. Markdown headers
/// are left alone since diff context legitimately contains them.
pub fn sanitize_diff(text: &str, max_len: usize) -> String {
    // ANSI removal must run before control-char removal: the pattern keys
    // on the ESC byte to avoid eating bracketed code like `arr[i]`.
    let mut result = remove_ansi_escapes(text);
    result = remove_control_chars(&result);
    result = filter_injection_patterns(&result);
    result = normalize_whitespace(&result);

    if result.len() > max_len {
        let mut end = max_len;
        while end > 0 && !result.is_char_boundary(end) {
            end -= 1;
        }
        result.truncate(end);
    }

    result
}

/// Remove control characters except newlines and tabs.
fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Remove ANSI escape sequences (colors, cursor movement).
fn remove_ansi_escapes(text: &str) -> String {
    let re = Regex::new("\u{1b}\\[[0-9;]*[A-Za-z]").unwrap();
    re.replace_all(text, "").into_owned()
}

/// Neutralize known prompt-injection phrases embedded in diff content.
fn filter_injection_patterns(text: &str) -> String {
    const PATTERNS: &[&str] = &[
        "ignore all previous instructions",
        "ignore previous instructions",
        "disregard the above",
        "new instructions:",
    ];

    let mut result = text.to_string();
    for pattern in PATTERNS {
        let re = Regex::new(&format!("(?i){pattern}")).unwrap();
        result = re.replace_all(&result, "[filtered]").into_owned();
    }
    result
}

/// Collapse runs of 3+ newlines down to 2.
fn normalize_whitespace(text: &str) -> String {
    let re = Regex::new(r"\n{3,}").unwrap();
    re.replace_all(text, "\n\n").into_owned()
}

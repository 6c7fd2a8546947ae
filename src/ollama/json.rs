//! JSON extraction from model responses.
//!
//! Local models often wrap their JSON answer in markdown code fences or
//! surround it with conversational text. Extraction here handles nested
//! braces and string escaping correctly instead of naive `find('}')`.

/// Extract a JSON object from a model response that may be wrapped in
/// markdown.
///
/// Tries, in order:
/// 1. A ` ```json ... ``` ` fenced block
/// 2. A bare ` ``` ... ``` ` fenced block whose content starts with `{`
/// 3. Valid-JSON / balanced-brace extraction from surrounding text
/// 4. The input unchanged as a last resort
pub fn extract_json(response: &str) -> String {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```json")
        && let Some(end) = trimmed[start + 7..].find("```")
    {
        return trimmed[start + 7..start + 7 + end].trim().to_string();
    }

    if let Some(start) = trimmed.find("```")
        && let Some(end) = trimmed[start + 3..].find("```")
    {
        let inner = trimmed[start + 3..start + 3 + end].trim();
        if inner.starts_with('{') {
            return inner.to_string();
        }
    }

    if let Some(json_str) = find_valid_json_object(trimmed) {
        return json_str;
    }

    trimmed.to_string()
}

/// Find a valid JSON object in a string using proper brace matching.
///
/// Iterates over every `{` in the input. For each, first tries a full
/// `serde_json` parse, then falls back to balanced-brace extraction with
/// string-escape awareness.
fn find_valid_json_object(text: &str) -> Option<String> {
    for (start_idx, _) in text.match_indices('{') {
        let candidate = &text[start_idx..];

        if let Ok(value) = serde_json::from_str::<serde_json::Value>(candidate)
            && let Ok(json_str) = serde_json::to_string(&value)
        {
            return Some(json_str);
        }

        if let Some(json_str) = extract_balanced_braces(candidate)
            && serde_json::from_str::<serde_json::Value>(&json_str).is_ok()
        {
            return Some(json_str);
        }
    }

    None
}

/// Extract a substring with balanced braces starting from the first `{`.
///
/// Tracks brace depth while respecting JSON string literals (including
/// escaped characters), so braces inside string values don't terminate the
/// scan early.
fn extract_balanced_braces(text: &str) -> Option<String> {
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (idx, ch) in text.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[..=idx].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

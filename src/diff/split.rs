//! Line splitting for the diff engine.

/// Split raw file content into lines for diffing.
///
/// Splits on `'\n'` without any normalization. Empty content yields a
/// single empty line; the renderer relies on that shape to suppress the
/// body of genuinely empty files. Content ending in a newline yields a
/// trailing empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    content.split('\n').map(str::to_string).collect()
}

use once_cell::sync::Lazy;
use regex::Regex;

static RE_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9\s]").unwrap());
static RE_SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Normalize raw resume/JD text for the lexical path.
///
/// Contract:
/// 1. `/`, `.`, `,`, `-` become spaces (compound tokens like "node.js" split)
/// 2. every other character outside `[A-Za-z0-9]` + whitespace is dropped
/// 3. whitespace runs collapse to a single space, ends trimmed
/// 4. result is ASCII-lowercased
///
/// Pure and idempotent; empty input yields an empty string.
pub fn clean_text(text: &str) -> String {
    let separated: String = text
        .chars()
        .map(|c| match c {
            '/' | '.' | ',' | '-' => ' ',
            other => other,
        })
        .collect();

    let stripped = RE_NOISE.replace_all(&separated, "");
    let collapsed = RE_SPACES.replace_all(&stripped, " ");

    collapsed.trim().to_ascii_lowercase()
}

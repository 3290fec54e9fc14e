use once_cell::sync::Lazy;
use regex::Regex;

pub const EMAIL_MARKER: &str = "[EMAIL REDACTED]";
pub const PHONE_MARKER: &str = "[PHONE REDACTED]";

/// Redacted previews keep at most this many characters of the source text.
const PREVIEW_CHAR_LIMIT: usize = 500;

static RE_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap()
});

// Optional 1-3 digit country code, then a loosely delimited 3-3-4 grouping.
// Known to over-match arbitrary 10-digit runs and to miss non-US formats;
// that looseness is part of the contract, do not tighten it here.
static RE_PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\+?(\d{1,3}))?[-. (]*(\d{3})[-. )]*(\d{3})[-. ]*(\d{4})\b").unwrap()
});

/// Mask email addresses and phone-shaped substrings in raw text.
pub fn redact_pii(text: &str) -> String {
    let pass = RE_EMAIL.replace_all(text, EMAIL_MARKER);
    RE_PHONE.replace_all(&pass, PHONE_MARKER).into_owned()
}

/// The only redacted view that ever leaves the engine: masked, truncated to
/// the first 500 characters, with a trailing ellipsis.
pub fn redacted_preview(text: &str) -> String {
    let redacted = redact_pii(text);
    let mut preview: String = redacted.chars().take(PREVIEW_CHAR_LIMIT).collect();
    preview.push_str("...");
    preview
}

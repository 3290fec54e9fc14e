//! Boundary to the document text extractor.
//!
//! Extraction internals (PDF parsing and friends) live outside this crate.
//! The contract is deliberately infallible: any internal failure surfaces as
//! empty text, which the scorer then reports as an empty-input error instead
//! of silently scoring nothing.

/// Produces raw text from document bytes. Never errors; returns an empty
/// string on any internal failure.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> String;
}

/// Extractor for documents that already are plain text.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_utf8_through() {
        let extractor = PlainTextExtractor;
        assert_eq!(extractor.extract(b"Python developer"), "Python developer");
    }

    #[test]
    fn invalid_utf8_never_errors() {
        let extractor = PlainTextExtractor;
        let text = extractor.extract(&[0x50, 0xff, 0xfe, 0x51]);
        assert!(text.starts_with('P'));
        assert!(text.ends_with('Q'));
    }
}

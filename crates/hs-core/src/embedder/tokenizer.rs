use crate::normalize::clean_text;

/// Weighted word token fed into the feature-hashing embedders.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedToken {
    pub token: String,
    pub weight: f32,
}

impl WeightedToken {
    pub fn new(token: impl Into<String>, weight: f32) -> Self {
        Self {
            token: token.into(),
            weight,
        }
    }
}

/// Word tokens of the normalized text at uniform weight. Casing and
/// punctuation handling happens here so callers can pass raw text, the way
/// a sentence-embedding model would take it.
pub fn word_tokens(text: &str) -> Vec<WeightedToken> {
    clean_text(text)
        .split_whitespace()
        .map(|word| WeightedToken::new(word, 1.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_raw_text_into_normalized_words() {
        let tokens = word_tokens("Python/Django, AWS!");
        let words: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
        assert_eq!(words, ["python", "django", "aws"]);
        assert!(tokens.iter().all(|t| t.weight == 1.0));
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(word_tokens("  \n ").is_empty());
    }
}

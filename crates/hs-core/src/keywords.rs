use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::Path;

use tracing::{info, warn};

use crate::normalize::clean_text;

/// General linguistic stop words.
const BASIC_STOP_WORDS: &[&str] = &[
    "and", "the", "to", "of", "in", "for", "with", "a", "an", "as", "at", "by", "on", "or", "is",
    "it", "be", "are",
];

/// Recruiting boilerplate that would otherwise dominate keyword overlap
/// ("responsible for", "proven track record", ...). Tunable domain
/// knowledge, not linguistic trivia; an external word list supplied via
/// [`StopWords::load`] overrides both sets.
const RECRUITING_STOP_WORDS: &[&str] = &[
    "experience",
    "years",
    "work",
    "team",
    "using",
    "build",
    "create",
    "develop",
    "project",
    "application",
    "performance",
    "optimize",
    "ensure",
    "responsible",
    "responsibilities",
    "proficient",
    "knowledge",
    "must",
    "have",
    "ability",
    "strong",
    "proven",
    "track",
    "record",
    "excellent",
    "skills",
    "preferred",
    "qualification",
];

/// Union of the basic and recruiting stop-word sets, immutable once built.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The compiled-in union of both word lists.
    pub fn builtin() -> Self {
        let words = BASIC_STOP_WORDS
            .iter()
            .chain(RECRUITING_STOP_WORDS.iter())
            .map(|w| (*w).to_string())
            .collect();
        Self { words }
    }

    /// Read a stop-word union from a file: one word per line, `#` starts a
    /// comment line, words are lowercased on ingest.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let words = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_ascii_lowercase)
            .collect();
        Ok(Self { words })
    }

    /// Resolve the process-wide stop-word union: the external artifact when
    /// one is configured and readable, otherwise the built-in lists.
    pub fn load(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match Self::from_path(path) {
                Ok(loaded) if !loaded.is_empty() => {
                    info!(
                        path = %path.display(),
                        words = loaded.len(),
                        "loaded stop-word union from file"
                    );
                    return loaded;
                }
                Ok(_) => {
                    warn!(path = %path.display(), "stop-word file is empty; using built-in lists");
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to read stop-word file; using built-in lists"
                    );
                }
            }
        }
        Self::builtin()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Extract the meaningful keyword set from raw text: normalize, split on
/// whitespace, keep tokens longer than two characters that are not stop
/// words, deduplicate. `BTreeSet` keeps iteration order deterministic for
/// the bounded samples downstream.
pub fn extract_keywords(text: &str, stop_words: &StopWords) -> BTreeSet<String> {
    clean_text(text)
        .split_whitespace()
        .filter(|token| token.len() > 2 && !stop_words.contains(token))
        .map(str::to_string)
        .collect()
}

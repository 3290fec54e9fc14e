use std::path::PathBuf;

/// Process-wide engine configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding the fine-tuned model artifact. Its presence decides
    /// the embedder variant for the process lifetime.
    pub model_dir: PathBuf,
    /// Optional external stop-word list; built-in lists are used when unset.
    pub stop_words_path: Option<PathBuf>,
    /// Feedback ledger location.
    pub feedback_path: PathBuf,
    /// Embedding dimension for the in-process embedders.
    pub embedding_dimension: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("./fine_tuned_model"),
            stop_words_path: None,
            feedback_path: PathBuf::from("training_data.csv"),
            embedding_dimension: 256,
        }
    }
}

impl EngineConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model_dir: std::env::var("HS_MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            stop_words_path: std::env::var("HS_STOPWORDS_PATH").ok().map(PathBuf::from),
            feedback_path: std::env::var("HS_FEEDBACK_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.feedback_path),
            embedding_dimension: std::env::var("HS_EMBEDDING_DIMENSION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.embedding_dimension),
        }
    }
}

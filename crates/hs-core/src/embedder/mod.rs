//! Embedder collaborator boundary: the trait the scorer talks to, the two
//! in-process variants, and the once-per-startup variant selection.

pub mod fine_tuned;
pub mod hash_embedder;
pub mod similarity;
pub mod tokenizer;

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use strum::AsRefStr;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::EngineConfig;
pub use fine_tuned::{FineTunedEmbedder, TokenWeightArtifact, ARTIFACT_FILE};
pub use hash_embedder::HashEmbedder;
pub use similarity::cosine_similarity;

/// Fixed-size text embedding.
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    pub vector: Vec<f32>,
}

impl Embedding {
    pub fn dimension(&self) -> usize {
        self.vector.len()
    }
}

/// Maps text to a fixed-length vector. Implementations must be deterministic
/// for identical input and must not mutate state during encoding: one
/// instance is shared read-only across concurrent scoring requests.
pub trait TextEmbedder: Send + Sync {
    /// Implementation name ("hash", "fine-tuned").
    fn name(&self) -> &'static str;

    /// Model generation tag, recorded for traceability.
    fn version(&self) -> &str;

    fn dimension(&self) -> usize;

    /// Encode raw, unnormalized text; the embedder handles casing and
    /// punctuation internally.
    fn encode(&self, text: &str) -> Embedding;

    /// Raw cosine similarity of two encodings, in [-1.0, 1.0].
    fn similarity(&self, a: &Embedding, b: &Embedding) -> f32 {
        if a.dimension() != b.dimension() {
            warn!(
                a_dimension = a.dimension(),
                b_dimension = b.dimension(),
                "embedding dimension mismatch; returning zero similarity"
            );
            return 0.0;
        }
        cosine_similarity(&a.vector, &b.vector)
    }
}

#[derive(Debug, Error)]
pub enum EmbedderError {
    #[error("model artifact not found at {}", .0.display())]
    ArtifactMissing(PathBuf),
    #[error("model artifact is invalid: {0}")]
    ArtifactInvalid(String),
    #[error("model artifact could not be read: {0}")]
    Io(#[from] std::io::Error),
}

/// Which embedder generation the process runs on. Decided once at startup
/// from the presence of the fine-tuned artifact on disk; no runtime hot-swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EmbedderVariant {
    Default,
    FineTuned,
}

impl EmbedderVariant {
    /// Amplification applied to raw cosine before fusing with the keyword
    /// score. The fine-tuned model's cosine distribution is compressed near
    /// the decision boundary and needs the stronger factor to occupy the
    /// full 0-100 range.
    pub fn scaling_factor(&self) -> f64 {
        match self {
            EmbedderVariant::FineTuned => 4.0,
            EmbedderVariant::Default => 3.5,
        }
    }
}

/// The embedder chosen at startup together with the variant actually in use.
/// The two always agree, so the scaling factor matches the running model
/// even after a fallback.
#[derive(Clone)]
pub struct SelectedEmbedder {
    pub embedder: Arc<dyn TextEmbedder>,
    pub variant: EmbedderVariant,
}

/// Choose the process-wide embedder: the fine-tuned variant when its
/// artifact directory exists and loads, otherwise the default hash embedder.
/// A present-but-broken artifact logs a warning and falls back.
pub fn select_embedder(config: &EngineConfig) -> SelectedEmbedder {
    if config.model_dir.exists() {
        match FineTunedEmbedder::load(&config.model_dir, config.embedding_dimension) {
            Ok(embedder) => {
                info!(
                    model_dir = %config.model_dir.display(),
                    version = embedder.version(),
                    "loaded fine-tuned embedder"
                );
                return SelectedEmbedder {
                    embedder: Arc::new(embedder),
                    variant: EmbedderVariant::FineTuned,
                };
            }
            Err(err) => {
                warn!(
                    model_dir = %config.model_dir.display(),
                    error = %err,
                    "failed to load fine-tuned model; falling back to default embedder"
                );
            }
        }
    }

    SelectedEmbedder {
        embedder: Arc::new(HashEmbedder::new(config.embedding_dimension)),
        variant: EmbedderVariant::Default,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn config_with_model_dir(model_dir: PathBuf) -> EngineConfig {
        EngineConfig {
            model_dir,
            embedding_dimension: 64,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn scaling_factor_follows_variant() {
        assert_eq!(EmbedderVariant::Default.scaling_factor(), 3.5);
        assert_eq!(EmbedderVariant::FineTuned.scaling_factor(), 4.0);
    }

    #[test]
    fn selects_default_when_model_dir_absent() {
        let config = config_with_model_dir(PathBuf::from("/nonexistent/fine_tuned_model"));
        let selected = select_embedder(&config);
        assert_eq!(selected.variant, EmbedderVariant::Default);
        assert_eq!(selected.embedder.name(), "hash");
        assert_eq!(selected.embedder.dimension(), 64);
    }

    #[test]
    fn selects_fine_tuned_when_artifact_loads() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = TokenWeightArtifact {
            version: "ft-1".into(),
            weights: [("python".to_string(), 2.0)].into_iter().collect(),
        };
        fs::write(
            dir.path().join(ARTIFACT_FILE),
            serde_json::to_string(&artifact).unwrap(),
        )
        .unwrap();

        let selected = select_embedder(&config_with_model_dir(dir.path().to_path_buf()));
        assert_eq!(selected.variant, EmbedderVariant::FineTuned);
        assert_eq!(selected.embedder.name(), "fine-tuned");
        assert_eq!(selected.embedder.version(), "ft-1");
    }

    #[test]
    fn broken_artifact_falls_back_to_default_variant() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ARTIFACT_FILE), "{ broken").unwrap();

        let selected = select_embedder(&config_with_model_dir(dir.path().to_path_buf()));
        // Variant must describe the embedder actually running, so the
        // scaling factor stays consistent after the fallback.
        assert_eq!(selected.variant, EmbedderVariant::Default);
        assert_eq!(selected.embedder.name(), "hash");
    }
}

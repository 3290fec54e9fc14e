use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::hash_embedder::HashEmbedder;
use super::tokenizer::word_tokens;
use super::{Embedding, EmbedderError, TextEmbedder};

/// File inside the model artifact directory that carries the learned weights.
pub const ARTIFACT_FILE: &str = "token_weights.json";

/// On-disk shape of the fine-tuning output: a model generation tag plus a
/// token → weight table distilled from human-labeled (resume, jd, score)
/// triples by the external trainer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenWeightArtifact {
    pub version: String,
    pub weights: HashMap<String, f32>,
}

/// The specialized embedder variant: feature hashing with learned per-token
/// weights. Tokens absent from the table keep their uniform weight, so a
/// sparsely trained artifact degrades gracefully toward the default encoder.
#[derive(Debug)]
pub struct FineTunedEmbedder {
    base: HashEmbedder,
    weights: HashMap<String, f32>,
    version: String,
}

impl FineTunedEmbedder {
    /// Load the artifact from a model directory. Missing or malformed
    /// artifacts are reported, not papered over; the caller decides whether
    /// to fall back to the default embedder.
    pub fn load(model_dir: &Path, dimension: usize) -> Result<Self, EmbedderError> {
        let path = model_dir.join(ARTIFACT_FILE);
        if !path.exists() {
            return Err(EmbedderError::ArtifactMissing(path));
        }

        let raw = std::fs::read_to_string(&path)?;
        let artifact: TokenWeightArtifact = serde_json::from_str(&raw)
            .map_err(|err| EmbedderError::ArtifactInvalid(err.to_string()))?;

        Ok(Self {
            base: HashEmbedder::new(dimension),
            weights: artifact.weights,
            version: artifact.version,
        })
    }
}

impl TextEmbedder for FineTunedEmbedder {
    fn name(&self) -> &'static str {
        "fine-tuned"
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn dimension(&self) -> usize {
        self.base.dimension()
    }

    fn encode(&self, text: &str) -> Embedding {
        let mut tokens = word_tokens(text);
        for token in &mut tokens {
            if let Some(weight) = self.weights.get(&token.token) {
                token.weight *= weight;
            }
        }
        self.base.embed_tokens(&tokens)
    }
}

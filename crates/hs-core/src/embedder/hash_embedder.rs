use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher13;

use super::tokenizer::{word_tokens, WeightedToken};
use super::{Embedding, TextEmbedder};

// Fixed seeds keep encodings stable across processes and Rust versions.
// Changing either value changes every embedding; bump EMBEDDER_VERSION too.
const HASH_SEED_K0: u64 = 0x5c8a_1f42_d09e_b731;
const HASH_SEED_K1: u64 = 0x94d6_3e07_a5c2_18fb;

const EMBEDDER_VERSION: &str = "v1";

/// Deterministic feature-hashing text embedder.
///
/// The in-process stand-in for the pretrained sentence model: no training,
/// no model artifact, O(tokens) per encode, and safe for concurrent use
/// because encoding touches no shared state.
#[derive(Debug)]
pub struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn hash_token(&self, token: &str) -> usize {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dimension
    }

    /// Sign-hashed accumulation followed by L2 normalization.
    pub(super) fn embed_tokens(&self, tokens: &[WeightedToken]) -> Embedding {
        let mut vector = vec![0.0f32; self.dimension];

        for wt in tokens {
            let idx = self.hash_token(&wt.token);
            let sign = if self.hash_token(&format!("{}_sign", wt.token)) % 2 == 0 {
                1.0
            } else {
                -1.0
            };
            vector[idx] += sign * wt.weight;
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }

        Embedding { vector }
    }
}

impl TextEmbedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn version(&self) -> &str {
        EMBEDDER_VERSION
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode(&self, text: &str) -> Embedding {
        self.embed_tokens(&word_tokens(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_is_deterministic() {
        let embedder = HashEmbedder::new(256);
        let a = embedder.encode("Python developer with AWS");
        let b = embedder.encode("Python developer with AWS");
        assert_eq!(a.vector, b.vector);
    }

    #[test]
    fn vectors_are_l2_normalized() {
        let embedder = HashEmbedder::new(256);
        let emb = embedder.encode("rust aws docker");
        let norm: f32 = emb.vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5, "L2 norm should be 1.0, got {norm}");
    }

    #[test]
    fn empty_text_encodes_to_zero_vector() {
        let embedder = HashEmbedder::new(64);
        let emb = embedder.encode("");
        assert!(emb.vector.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn similar_texts_score_higher_than_unrelated_texts() {
        let embedder = HashEmbedder::new(256);
        let jd = embedder.encode("Python AWS Kubernetes engineer");
        let close = embedder.encode("Python and AWS developer with Docker");
        let far = embedder.encode("oil painting restoration specialist");

        let close_sim = embedder.similarity(&jd, &close);
        let far_sim = embedder.similarity(&jd, &far);
        assert!(
            close_sim > far_sim,
            "expected {close_sim} > {far_sim} for related text"
        );
    }

    #[test]
    fn dimension_is_clamped_to_at_least_one() {
        let embedder = HashEmbedder::new(0);
        assert_eq!(embedder.dimension(), 1);
    }
}

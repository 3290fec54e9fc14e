use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;
use thiserror::Error;
use tracing::debug;

use crate::config::EngineConfig;
use crate::embedder::{select_embedder, EmbedderVariant, TextEmbedder};
use crate::keywords::{extract_keywords, StopWords};
use crate::normalize::clean_text;
use crate::redact::redacted_preview;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    /// Blank after extraction/normalization; user-correctable, never retried.
    #[error("{0} text is empty after normalization")]
    EmptyInput(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
pub enum MatchStatus {
    Shortlisted,
    Rejected,
}

/// Score-fusion parameters. The 60/40 split is deliberate policy: keyword
/// overlap is the primary, auditable signal; the embedding score smooths in
/// paraphrase and synonym matches the lexical path misses.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub keyword_weight: f64,
    pub semantic_weight: f64,
    pub shortlist_threshold: f64,
    pub missing_sample_limit: usize,
    pub follow_up_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            keyword_weight: 0.6,
            semantic_weight: 0.4,
            shortlist_threshold: 40.0,
            missing_sample_limit: 5,
            follow_up_limit: 2,
        }
    }
}

/// One scoring outcome. Transient; computed per request, never persisted.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Fused score, rounded to one decimal.
    pub score: f64,
    pub status: MatchStatus,
    /// Truncated, PII-masked resume view; the full text never leaves the engine.
    pub redacted_resume: String,
    pub matching_keywords: BTreeSet<String>,
    /// Bounded sample of missing JD keywords, in deterministic set order.
    pub missing_keywords: Vec<String>,
    pub keyword_score: f64,
    pub semantic_score: f64,
    pub summary: String,
    pub follow_up_questions: Vec<String>,
}

/// Fuses keyword-overlap ratio and embedding cosine similarity into a single
/// 0-100 score and a shortlist decision. Read-only; safe to share across
/// concurrent requests.
pub struct HybridScorer {
    embedder: Arc<dyn TextEmbedder>,
    variant: EmbedderVariant,
    stop_words: StopWords,
    config: ScoringConfig,
}

impl HybridScorer {
    pub fn new(
        embedder: Arc<dyn TextEmbedder>,
        variant: EmbedderVariant,
        stop_words: StopWords,
        config: ScoringConfig,
    ) -> Self {
        Self {
            embedder,
            variant,
            stop_words,
            config,
        }
    }

    /// Build a scorer from engine configuration: select the embedder variant
    /// from the model directory and resolve the stop-word union.
    pub fn from_config(config: &EngineConfig) -> Self {
        let selected = select_embedder(config);
        let stop_words = StopWords::load(config.stop_words_path.as_deref());
        Self::new(
            selected.embedder,
            selected.variant,
            stop_words,
            ScoringConfig::default(),
        )
    }

    pub fn variant(&self) -> EmbedderVariant {
        self.variant
    }

    /// Score a resume against a job description.
    ///
    /// Lexical path: each JD keyword counts as matched when it occurs as a
    /// substring of the cleaned resume, NOT via token-set intersection, so
    /// keywords inside compound tokens still count. Semantic path: cosine
    /// similarity of raw-text embeddings, amplified by the variant's scaling
    /// factor and capped at 100 with the floor left unclamped.
    pub fn score(&self, resume_raw: &str, jd_raw: &str) -> Result<MatchResult, ScoreError> {
        let cleaned_resume = clean_text(resume_raw);
        if cleaned_resume.is_empty() {
            return Err(ScoreError::EmptyInput("resume"));
        }
        if clean_text(jd_raw).is_empty() {
            return Err(ScoreError::EmptyInput("job description"));
        }

        let jd_keywords = extract_keywords(jd_raw, &self.stop_words);
        let mut matching_keywords = BTreeSet::new();
        let mut missing = BTreeSet::new();
        for keyword in &jd_keywords {
            if cleaned_resume.contains(keyword.as_str()) {
                matching_keywords.insert(keyword.clone());
            } else {
                missing.insert(keyword.clone());
            }
        }

        let keyword_score = if jd_keywords.is_empty() {
            0.0
        } else {
            matching_keywords.len() as f64 / jd_keywords.len() as f64 * 100.0
        };

        let resume_embedding = self.embedder.encode(resume_raw);
        let jd_embedding = self.embedder.encode(jd_raw);
        let semantic_raw = f64::from(self.embedder.similarity(&resume_embedding, &jd_embedding));
        let semantic_score = (semantic_raw * self.variant.scaling_factor() * 100.0).min(100.0);

        let fused = semantic_score * self.config.semantic_weight
            + keyword_score * self.config.keyword_weight;
        let score = (fused * 10.0).round() / 10.0;
        let status = if score >= self.config.shortlist_threshold {
            MatchStatus::Shortlisted
        } else {
            MatchStatus::Rejected
        };

        debug!(
            keyword_score,
            semantic_raw,
            semantic_score,
            score,
            status = status.as_ref(),
            embedder = self.embedder.name(),
            "hybrid score computed"
        );

        let missing_keywords: Vec<String> = missing
            .iter()
            .take(self.config.missing_sample_limit)
            .cloned()
            .collect();
        let follow_up_questions = missing_keywords
            .iter()
            .take(self.config.follow_up_limit)
            .map(|keyword| format!("Tell me about your experience with {keyword}?"))
            .collect();
        let summary = format!(
            "Hybrid Analysis: Semantic ({}%) + Keywords ({}%).",
            semantic_score as i64, keyword_score as i64
        );

        Ok(MatchResult {
            score,
            status,
            redacted_resume: redacted_preview(resume_raw),
            matching_keywords,
            missing_keywords,
            keyword_score,
            semantic_score,
            summary,
            follow_up_questions,
        })
    }
}

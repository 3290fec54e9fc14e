//! Hybrid resume / job-description scoring engine.
//!
//! Two signals are fused per request: keyword overlap (lexical, auditable,
//! weighted 0.6) and embedding cosine similarity (semantic smoothing,
//! weighted 0.4). Human-reviewed scores accumulate in an append-only CSV
//! ledger that an external trainer turns into a fine-tuned embedder
//! artifact; when that artifact is present at startup the engine runs on
//! the specialized variant with a stronger semantic scaling factor.

pub mod api;
pub mod config;
pub mod embedder;
pub mod extract;
pub mod feedback;
pub mod keywords;
pub mod logging;
pub mod normalize;
pub mod redact;
pub mod scoring;

pub use config::EngineConfig;
pub use embedder::{select_embedder, EmbedderVariant, SelectedEmbedder, TextEmbedder};
pub use extract::{PlainTextExtractor, TextExtractor};
pub use feedback::{FeedbackError, FeedbackStore, ScoreRecord};
pub use keywords::{extract_keywords, StopWords};
pub use normalize::clean_text;
pub use redact::{redact_pii, redacted_preview};
pub use scoring::{HybridScorer, MatchResult, MatchStatus, ScoreError, ScoringConfig};

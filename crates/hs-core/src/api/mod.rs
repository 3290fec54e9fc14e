//! Wire-facing request/response types for whatever hosting layer embeds the
//! engine. The engine itself never serves HTTP.

pub mod feedback;
pub mod match_response;

pub use feedback::{FeedbackRequest, FeedbackResponse};
pub use match_response::MatchResponse;

pub mod client;
pub mod score;

pub use client::{aggregate_scores, RemoteSafetyScorer, SafetyScorer};
pub use score::{ScoreMap, ScoringRequest, ScoringResponse, DEFAULT_SAFETY_SCORE};

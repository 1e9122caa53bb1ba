//! Conversation context tracking
//!
//! Analyses produced during a conversation are remembered for a short
//! while so later messages can be related to them. A message that mentions
//! an analyzed project, its language or its frameworks gets the matching
//! analyses back along with suggested follow-up questions.

mod eviction;
mod scoring;
mod suggestions;
mod tracker;
mod types;

#[cfg(test)]
mod tests;

pub use scoring::{rank, relevance_score};
pub use suggestions::suggest;
pub use tracker::ContextTracker;
pub use types::{
    AnalysisContextRecord, ContextDetail, ContextResult, ContextStats, FollowUp, KeyInfo,
    ProjectOverview, ScoredRecord, UNKNOWN_PROJECT,
};

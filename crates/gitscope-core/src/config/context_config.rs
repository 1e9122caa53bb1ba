//! Context tracker configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Score contributed by each kind of match between a message and a record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelevanceWeights {
    /// Project name appears in the message
    pub project_name: f64,
    /// Primary language appears in the message
    pub language: f64,
    /// Per framework of the tech stack that appears in the message
    pub technology: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            project_name: 0.8,
            language: 0.6,
            technology: 0.4,
        }
    }
}

/// Configuration of the conversation context tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// How long a remembered analysis stays available
    #[serde(with = "humantime_serde")]
    pub retention: Duration,
    /// Records kept per conversation before the oldest is dropped
    pub max_records_per_conversation: usize,
    /// Minimum score for a record to count as relevant
    pub relevance_threshold: f64,
    pub weights: RelevanceWeights,
    /// Cap on follow-up suggestions
    pub max_suggestions: usize,
    /// Number of top relevant records suggestions are drawn from
    pub suggestion_sources: usize,
    /// Interval of the background sweep
    #[serde(with = "humantime_serde")]
    pub cleanup_interval: Duration,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(60 * 60),
            max_records_per_conversation: 10,
            relevance_threshold: 0.7,
            weights: RelevanceWeights::default(),
            max_suggestions: 5,
            suggestion_sources: 2,
            cleanup_interval: Duration::from_secs(10 * 60),
        }
    }
}

impl ContextConfig {
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records_per_conversation = max;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.relevance_threshold = threshold;
        self
    }
}

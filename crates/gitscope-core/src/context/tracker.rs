//! Per-conversation analysis context

use super::eviction::{self, ConversationRecords};
use super::scoring::rank;
use super::suggestions::{suggest, suggest_for};
use super::types::{AnalysisContextRecord, ContextResult, ContextStats, FollowUp};
use crate::clock::{SharedClock, system_clock};
use crate::config::ContextConfig;
use crate::maintenance::spawn_sweeper;
use crate::payload::AnalysisResult;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Remembers analyses per conversation and relates new messages to them
///
/// Records live for the configured retention window and each conversation
/// keeps a bounded number of them. Expired records are hidden from reads
/// right away and physically removed by [`ContextTracker::cleanup_expired`].
#[derive(Debug)]
pub struct ContextTracker {
    config: ContextConfig,
    conversations: RwLock<HashMap<String, ConversationRecords>>,
    clock: SharedClock,
}

impl ContextTracker {
    pub fn new(config: ContextConfig) -> Self {
        Self::with_clock(config, system_clock())
    }

    pub fn with_clock(config: ContextConfig, clock: SharedClock) -> Self {
        Self {
            config,
            conversations: RwLock::new(HashMap::new()),
            clock,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    fn retention(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.config.retention).unwrap_or(chrono::Duration::MAX)
    }

    fn is_live(&self, record: &AnalysisContextRecord, now: DateTime<Utc>) -> bool {
        !eviction::is_expired(record, self.retention(), now)
    }

    /// Remember an analysis for a conversation
    ///
    /// Remembering the same repository again replaces the record and makes
    /// it the newest one.
    pub fn remember(&self, conversation_id: &str, repository_id: &str, analysis: AnalysisResult) {
        let record = AnalysisContextRecord::new(repository_id, analysis, self.clock.now());
        let project_name = record.project_name.clone();

        let mut conversations = self.conversations.write();
        let records = conversations.entry(conversation_id.to_string()).or_default();
        records.shift_remove(repository_id);
        records.insert(repository_id.to_string(), record);

        let evicted = eviction::evict_oldest(records, self.config.max_records_per_conversation);
        let total = records.len();
        drop(conversations);

        for repository in &evicted {
            debug!(conversation_id, repository = %repository, "dropped oldest analysis from context");
        }
        info!(conversation_id, repository_id, project = %project_name, total, "stored analysis in context");
    }

    /// Live records of a conversation, oldest first
    pub fn records(&self, conversation_id: &str) -> Vec<AnalysisContextRecord> {
        let now = self.clock.now();
        self.conversations
            .read()
            .get(conversation_id)
            .map(|records| {
                records
                    .values()
                    .filter(|record| self.is_live(record, now))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Live record of one repository in a conversation
    pub fn lookup(&self, conversation_id: &str, repository_id: &str) -> Option<AnalysisContextRecord> {
        let now = self.clock.now();
        self.conversations
            .read()
            .get(conversation_id)?
            .get(repository_id)
            .filter(|record| self.is_live(record, now))
            .cloned()
    }

    /// Forget a conversation, returning how many records it held
    pub fn forget(&self, conversation_id: &str) -> usize {
        self.conversations
            .write()
            .remove(conversation_id)
            .map(|records| records.len())
            .unwrap_or(0)
    }

    /// Relate a message to the analyses of its conversation
    pub fn enhance(&self, message: &str, conversation_id: &str) -> ContextResult {
        let records = self.records(conversation_id);
        if records.is_empty() {
            return ContextResult::NoContext;
        }

        let relevant = rank(
            message,
            &records,
            &self.config.weights,
            self.config.relevance_threshold,
        );

        if relevant.is_empty() {
            return ContextResult::Ambient {
                projects: records.iter().map(AnalysisContextRecord::overview).collect(),
                summary: summarize(&records),
            };
        }

        debug!(
            conversation_id,
            relevant = relevant.len(),
            "found relevant analysis context"
        );

        let details = relevant.iter().map(|scored| scored.record.detail()).collect();
        let suggestions = suggest_for(
            &relevant,
            self.config.suggestion_sources,
            self.config.max_suggestions,
        );

        ContextResult::Specific {
            relevant,
            details,
            suggestions,
        }
    }

    /// Follow-up questions for one analysis
    pub fn suggest(&self, analysis: &AnalysisResult) -> Vec<String> {
        suggest(analysis, self.config.max_suggestions)
    }

    /// Decide how a follow-up question can be answered
    pub fn follow_up(&self, question: &str, conversation_id: &str) -> FollowUp {
        self.enhance(question, conversation_id).into()
    }

    pub fn stats(&self) -> ContextStats {
        let conversations = self.conversations.read();
        let total_conversations = conversations.len();
        let total_stored_records: usize = conversations.values().map(|records| records.len()).sum();
        let average_records_per_conversation = if total_conversations == 0 {
            0.0
        } else {
            total_stored_records as f64 / total_conversations as f64
        };

        ContextStats {
            total_conversations,
            total_stored_records,
            average_records_per_conversation,
        }
    }

    /// Remove expired records and empty conversations
    pub fn cleanup_expired(&self) -> usize {
        let removed = eviction::cleanup_expired_records(
            &mut self.conversations.write(),
            self.retention(),
            self.clock.now(),
        );
        if removed > 0 {
            info!(removed, "cleaned up expired analysis context");
        }
        removed
    }

    /// Run [`ContextTracker::cleanup_expired`] every `period` until `cancel` fires
    pub fn spawn_cleanup_task(
        self: &Arc<Self>,
        period: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let tracker = Arc::clone(self);
        spawn_sweeper("context", period, cancel, move || tracker.cleanup_expired())
    }
}

impl Default for ContextTracker {
    fn default() -> Self {
        Self::new(ContextConfig::default())
    }
}

/// `"Analyzed projects: a, b. Technologies involved: X, Y"`
fn summarize(records: &[AnalysisContextRecord]) -> String {
    let projects: Vec<&str> = records.iter().map(|r| r.project_name.as_str()).collect();
    let languages: IndexSet<&str> = records
        .iter()
        .filter_map(|r| r.primary_language.as_deref())
        .collect();

    format!(
        "Analyzed projects: {}. Technologies involved: {}",
        projects.join(", "),
        languages.into_iter().collect::<Vec<_>>().join(", ")
    )
}

//! Bounding and expiry of remembered analyses

use super::types::AnalysisContextRecord;
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use std::collections::HashMap;

pub(super) type ConversationRecords = IndexMap<String, AnalysisContextRecord>;

/// Whether a record is past its retention window at `now`
pub(super) fn is_expired(record: &AnalysisContextRecord, retention: Duration, now: DateTime<Utc>) -> bool {
    now - record.stored_at > retention
}

/// Drop the oldest-stored records until at most `max` remain
pub(super) fn evict_oldest(records: &mut ConversationRecords, max: usize) -> Vec<String> {
    let overflow = records.len().saturating_sub(max);
    records.drain(..overflow).map(|(id, _)| id).collect()
}

/// Remove expired records, then conversations left without records
pub(super) fn cleanup_expired_records(
    conversations: &mut HashMap<String, ConversationRecords>,
    retention: Duration,
    now: DateTime<Utc>,
) -> usize {
    let mut expired = 0;

    for records in conversations.values_mut() {
        let before = records.len();
        records.retain(|_, record| !is_expired(record, retention, now));
        expired += before - records.len();
    }

    conversations.retain(|_, records| !records.is_empty());
    expired
}

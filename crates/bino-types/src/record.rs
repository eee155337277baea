//! Persistent records: memory bank entries and post history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single fact or opinion held in the memory bank.
///
/// Entries are immutable once created; the store never updates or deletes
/// a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Store-assigned identifier, monotonically increasing.
    pub id: i64,
    /// Short label. Not required to be unique.
    pub key: String,
    /// Free-text content.
    pub value: String,
    /// Assigned at insertion, non-decreasing across entries.
    pub created_at: DateTime<Utc>,
}

/// A drafted post, recorded exactly once per successful pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// Final content, post-normalization.
    pub content: String,
    /// Topic the draft was asked to cover, if any.
    pub topic: Option<String>,
    /// Model identifier used for generation.
    pub model: Option<String>,
    /// Assigned at insertion.
    pub created_at: DateTime<Utc>,
}

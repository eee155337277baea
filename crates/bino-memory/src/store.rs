//! Append-only fact store and post history backed by SQLite.

use bino_types::error::{BinoError, BinoResult};
use bino_types::record::{MemoryEntry, PostRecord};
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::migration::run_migrations;

/// Fact store backed by SQLite.
///
/// The memory bank is append-only: `insert` and `insert_if_new` are the
/// only write paths and neither updates or deletes existing rows. The
/// pipeline is the only writer besides the operator-facing `remember`
/// commands; if concurrent invocations are ever introduced,
/// `insert_if_new` must become atomic per (key, value) pair.
#[derive(Clone)]
pub struct FactStore {
    conn: Arc<Mutex<Connection>>,
}

impl FactStore {
    /// Open (or create) the store at `path` and run schema migrations.
    pub fn open(path: &Path) -> BinoResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path).map_err(|e| BinoError::Memory(e.to_string()))?;
        run_migrations(&conn).map_err(|e| BinoError::Memory(e.to_string()))?;
        debug!(path = %path.display(), "Opened fact store");
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an isolated in-memory store (tests, dry runs).
    pub fn open_in_memory() -> BinoResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| BinoError::Memory(e.to_string()))?;
        run_migrations(&conn).map_err(|e| BinoError::Memory(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Insert a memory entry unconditionally. No uniqueness check.
    pub fn insert(&self, key: &str, value: &str) -> BinoResult<MemoryEntry> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| BinoError::Internal(e.to_string()))?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO memory_entries (key, value, created_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![key, value, now.to_rfc3339()],
        )
        .map_err(|e| BinoError::Memory(e.to_string()))?;
        Ok(MemoryEntry {
            id: conn.last_insert_rowid(),
            key: key.to_string(),
            value: value.to_string(),
            created_at: now,
        })
    }

    /// Insert a memory entry unless an identical (key, value) pair exists.
    ///
    /// Returns the most recent matching entry when one is found (no new
    /// row), otherwise the freshly inserted row. This is the sole
    /// de-duplication mechanism: the dedup key is the (key, value) pair,
    /// not the value alone.
    pub fn insert_if_new(&self, key: &str, value: &str) -> BinoResult<MemoryEntry> {
        {
            let conn = self
                .conn
                .lock()
                .map_err(|e| BinoError::Internal(e.to_string()))?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, key, value, created_at FROM memory_entries
                     WHERE key = ?1 AND value = ?2
                     ORDER BY created_at DESC, id DESC LIMIT 1",
                )
                .map_err(|e| BinoError::Memory(e.to_string()))?;
            match stmt.query_row(rusqlite::params![key, value], row_to_entry) {
                Ok(entry) => return Ok(entry),
                Err(rusqlite::Error::QueryReturnedNoRows) => {}
                Err(e) => return Err(BinoError::Memory(e.to_string())),
            }
        }
        self.insert(key, value)
    }

    /// Recall memory entries, oldest-first.
    ///
    /// With a limit, selects the newest `limit` entries by creation time
    /// and re-orders them ascending for presentation. "No limit" is
    /// expressed as `None`; `Some(0)` is taken literally and recalls
    /// nothing.
    pub fn recall(&self, limit: Option<usize>) -> BinoResult<Vec<MemoryEntry>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| BinoError::Internal(e.to_string()))?;
        let mut sql = String::from(
            "SELECT id, key, value, created_at FROM memory_entries
             ORDER BY created_at DESC, id DESC",
        );
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| BinoError::Memory(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_entry)
            .map_err(|e| BinoError::Memory(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| BinoError::Memory(e.to_string()))?);
        }
        entries.reverse();
        Ok(entries)
    }

    /// Record a drafted post. Called exactly once per successful pipeline
    /// run; records are immutable afterward.
    pub fn add_post(
        &self,
        content: &str,
        topic: Option<&str>,
        model: Option<&str>,
    ) -> BinoResult<PostRecord> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| BinoError::Internal(e.to_string()))?;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO post_records (content, topic, model, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![content, topic, model, now.to_rfc3339()],
        )
        .map_err(|e| BinoError::Memory(e.to_string()))?;
        Ok(PostRecord {
            id: conn.last_insert_rowid(),
            content: content.to_string(),
            topic: topic.map(str::to_string),
            model: model.map(str::to_string),
            created_at: now,
        })
    }

    /// List the newest `limit` post records, newest-first.
    pub fn list_posts(&self, limit: usize) -> BinoResult<Vec<PostRecord>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| BinoError::Internal(e.to_string()))?;
        let mut stmt = conn
            .prepare(
                "SELECT id, content, topic, model, created_at FROM post_records
                 ORDER BY created_at DESC, id DESC LIMIT ?1",
            )
            .map_err(|e| BinoError::Memory(e.to_string()))?;
        let rows = stmt
            .query_map([limit], |row| {
                Ok(PostRecord {
                    id: row.get(0)?,
                    content: row.get(1)?,
                    topic: row.get(2)?,
                    model: row.get(3)?,
                    created_at: parse_timestamp(row.get::<_, String>(4)?.as_str()),
                })
            })
            .map_err(|e| BinoError::Memory(e.to_string()))?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row.map_err(|e| BinoError::Memory(e.to_string()))?);
        }
        Ok(posts)
    }
}

/// Map a memory_entries row to a MemoryEntry.
fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemoryEntry> {
    Ok(MemoryEntry {
        id: row.get(0)?,
        key: row.get(1)?,
        value: row.get(2)?,
        created_at: parse_timestamp(row.get::<_, String>(3)?.as_str()),
    })
}

/// Parse an RFC 3339 timestamp, falling back to the epoch on a row written
/// by hand or by an older schema.
fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> FactStore {
        FactStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_assigns_monotonic_ids() {
        let store = setup();
        let a = store.insert("alpha", "first").unwrap();
        let b = store.insert("beta", "second").unwrap();
        assert!(b.id > a.id);
        assert!(b.created_at >= a.created_at);
    }

    #[test]
    fn test_insert_never_dedups() {
        let store = setup();
        store.insert("k", "v").unwrap();
        store.insert("k", "v").unwrap();
        assert_eq!(store.recall(None).unwrap().len(), 2);
    }

    #[test]
    fn test_insert_if_new_dedups_identical_pair() {
        let store = setup();
        let first = store.insert_if_new("news::abc", "BNB hits a new high").unwrap();
        let second = store.insert_if_new("news::abc", "BNB hits a new high").unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(store.recall(None).unwrap().len(), 1);
    }

    #[test]
    fn test_insert_if_new_same_key_different_value() {
        let store = setup();
        let first = store.insert_if_new("news::abc", "old headline").unwrap();
        let second = store.insert_if_new("news::abc", "new headline").unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(store.recall(None).unwrap().len(), 2);
    }

    #[test]
    fn test_recall_oldest_first() {
        let store = setup();
        store.insert("a", "1").unwrap();
        store.insert("b", "2").unwrap();
        store.insert("c", "3").unwrap();
        let entries = store.recall(None).unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_recall_limit_selects_newest() {
        let store = setup();
        for i in 0..5 {
            store.insert(&format!("k{i}"), "v").unwrap();
        }
        let entries = store.recall(Some(2)).unwrap();
        // The two most recent, re-ordered ascending for presentation.
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["k3", "k4"]);
    }

    #[test]
    fn test_recall_limit_zero_is_empty() {
        let store = setup();
        store.insert("k", "v").unwrap();
        // None means "no limit"; a literal zero recalls nothing.
        assert!(store.recall(Some(0)).unwrap().is_empty());
        assert_eq!(store.recall(None).unwrap().len(), 1);
    }

    #[test]
    fn test_recall_limit_larger_than_store() {
        let store = setup();
        store.insert("only", "one").unwrap();
        assert_eq!(store.recall(Some(10)).unwrap().len(), 1);
    }

    #[test]
    fn test_post_history_newest_first() {
        let store = setup();
        store.add_post("first post", None, Some("gpt-4o-mini")).unwrap();
        store.add_post("second post", Some("bnb"), Some("gpt-4o-mini")).unwrap();
        let posts = store.list_posts(10).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].content, "second post");
        assert_eq!(posts[0].topic.as_deref(), Some("bnb"));
        assert_eq!(posts[1].content, "first post");
    }

    #[test]
    fn test_open_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("agent.db");
        let store = FactStore::open(&path).unwrap();
        store.insert("k", "v").unwrap();
        assert!(path.exists());
    }
}

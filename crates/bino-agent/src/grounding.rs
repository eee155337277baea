//! Grounding assembly: merge memory recall with the market snapshot.
//!
//! Every non-empty highlight in the snapshot is upserted into the fact
//! store under a fingerprint-derived key, so repeated scrapes returning
//! the same news grow the store by at most one row per distinct highlight
//! text ever seen.

use bino_memory::FactStore;
use bino_types::error::BinoResult;
use bino_types::snapshot::Snapshot;
use sha2::{Digest, Sha256};

/// Fallback when the memory bank is empty.
const NO_MEMORY: &str = "None so far.";
/// Fallback for missing price/variation fields.
const NOT_AVAILABLE: &str = "N/A";
/// Fallback for a missing snapshot timestamp.
const UNKNOWN_TIME: &str = "unknown time";
/// Fallback when no highlights were captured.
const NO_HIGHLIGHTS: &str = "- No highlights captured.";

/// How many highlight lines make it into the prompt.
const MAX_HIGHLIGHTS: usize = 3;

/// Length of the highlight fingerprint, in hex characters.
const FINGERPRINT_LEN: usize = 12;

/// Key prefix for deduplicated news highlights in the memory bank.
const NEWS_KEY_PREFIX: &str = "news::";

/// Ephemeral context fed to the prompt builder. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingContext {
    /// Recalled memory entries, one `- [key] value` line each, newest
    /// last, or the empty-bank fallback.
    pub memory_lines: String,
    /// Resolved price string or `"N/A"`.
    pub price: String,
    /// Resolved 24h variation string or `"N/A"`.
    pub variation: String,
    /// Snapshot timestamp or `"unknown time"`.
    pub timestamp: String,
    /// Up to three `- `-prefixed highlight lines, or the fallback line.
    pub highlights: String,
}

/// Short stable fingerprint of a highlight text, used as its dedup key.
///
/// Deterministic across runs: the same text always produces the same
/// 12-hex-character digest.
pub fn fingerprint(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(digest)[..FINGERPRINT_LEN].to_string()
}

/// Build the grounding context from the memory bank and current snapshot.
pub fn assemble(
    store: &FactStore,
    snapshot: Option<&Snapshot>,
    memory_limit: usize,
) -> BinoResult<GroundingContext> {
    let memories = store.recall(Some(memory_limit))?;
    let memory_lines = if memories.is_empty() {
        NO_MEMORY.to_string()
    } else {
        memories
            .iter()
            .map(|m| format!("- [{}] {}", m.key, m.value))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let Some(snapshot) = snapshot else {
        return Ok(GroundingContext {
            memory_lines,
            price: NOT_AVAILABLE.to_string(),
            variation: NOT_AVAILABLE.to_string(),
            timestamp: UNKNOWN_TIME.to_string(),
            highlights: NO_HIGHLIGHTS.to_string(),
        });
    };

    let price = non_empty(snapshot.price.as_deref(), NOT_AVAILABLE);
    let variation = non_empty(snapshot.variation_24h.as_deref(), NOT_AVAILABLE);
    let timestamp = non_empty(snapshot.timestamp.as_deref(), UNKNOWN_TIME);

    // Upsert each highlight under its fingerprint key; the stored form is
    // preferred for display so a pre-existing row wins over the raw scrape.
    let mut stored = Vec::new();
    for item in &snapshot.deep_dives {
        if item.is_empty() {
            continue;
        }
        let key = format!("{NEWS_KEY_PREFIX}{}", fingerprint(item));
        let entry = store.insert_if_new(&key, item)?;
        stored.push(entry.value);
    }

    let display: Vec<&str> = if stored.is_empty() {
        snapshot.deep_dives.iter().map(String::as_str).collect()
    } else {
        stored.iter().map(String::as_str).collect()
    };
    let highlights = display
        .iter()
        .take(MAX_HIGHLIGHTS)
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n");
    let highlights = if highlights.is_empty() {
        NO_HIGHLIGHTS.to_string()
    } else {
        highlights
    };

    Ok(GroundingContext {
        memory_lines,
        price,
        variation,
        timestamp,
        highlights,
    })
}

fn non_empty(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(deep_dives: Vec<&str>) -> Snapshot {
        Snapshot {
            timestamp: Some("2026-08-27T10:00:00Z".to_string()),
            price: Some("$612.40".to_string()),
            variation_24h: Some("+2.41%".to_string()),
            deep_dives: deep_dives.into_iter().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let a = fingerprint("BNB Chain ships a new release");
        let b = fingerprint("BNB Chain ships a new release");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, fingerprint("a different headline"));
    }

    #[test]
    fn test_empty_store_absent_snapshot_fallbacks() {
        let store = FactStore::open_in_memory().unwrap();
        let ctx = assemble(&store, None, 10).unwrap();
        assert_eq!(ctx.memory_lines, "None so far.");
        assert_eq!(ctx.price, "N/A");
        assert_eq!(ctx.variation, "N/A");
        assert_eq!(ctx.timestamp, "unknown time");
        assert_eq!(ctx.highlights, "- No highlights captured.");
    }

    #[test]
    fn test_memory_lines_newest_last() {
        let store = FactStore::open_in_memory().unwrap();
        store.insert("launch", "BNB greenfield went live").unwrap();
        store.insert("price", "ATH was $793").unwrap();
        let ctx = assemble(&store, None, 10).unwrap();
        assert_eq!(
            ctx.memory_lines,
            "- [launch] BNB greenfield went live\n- [price] ATH was $793"
        );
    }

    #[test]
    fn test_highlights_deduped_across_assemblies() {
        let store = FactStore::open_in_memory().unwrap();
        let snapshot = snapshot_with(vec!["BNB Chain ships a new release"]);
        for _ in 0..3 {
            assemble(&store, Some(&snapshot), 10).unwrap();
        }
        let news: Vec<_> = store
            .recall(None)
            .unwrap()
            .into_iter()
            .filter(|e| e.key.starts_with("news::"))
            .collect();
        assert_eq!(news.len(), 1);
    }

    #[test]
    fn test_highlights_capped_at_three() {
        let store = FactStore::open_in_memory().unwrap();
        let snapshot = snapshot_with(vec!["one", "two", "three", "four"]);
        let ctx = assemble(&store, Some(&snapshot), 10).unwrap();
        assert_eq!(ctx.highlights, "- one\n- two\n- three");
        // All four still land in the memory bank.
        let news = store.recall(None).unwrap();
        assert_eq!(news.len(), 4);
    }

    #[test]
    fn test_empty_highlight_strings_skipped() {
        let store = FactStore::open_in_memory().unwrap();
        let snapshot = snapshot_with(vec!["", "real headline"]);
        let ctx = assemble(&store, Some(&snapshot), 10).unwrap();
        assert_eq!(ctx.highlights, "- real headline");
        assert_eq!(store.recall(None).unwrap().len(), 1);
    }

    #[test]
    fn test_no_highlights_fallback_with_snapshot() {
        let store = FactStore::open_in_memory().unwrap();
        let snapshot = snapshot_with(vec![]);
        let ctx = assemble(&store, Some(&snapshot), 10).unwrap();
        assert_eq!(ctx.highlights, "- No highlights captured.");
        assert_eq!(ctx.price, "$612.40");
    }

    #[test]
    fn test_empty_snapshot_fields_fall_back() {
        let store = FactStore::open_in_memory().unwrap();
        let snapshot = Snapshot {
            timestamp: None,
            price: Some(String::new()),
            variation_24h: None,
            deep_dives: vec![],
        };
        let ctx = assemble(&store, Some(&snapshot), 10).unwrap();
        assert_eq!(ctx.price, "N/A");
        assert_eq!(ctx.variation, "N/A");
        assert_eq!(ctx.timestamp, "unknown time");
    }
}

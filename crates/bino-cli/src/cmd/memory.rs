//! Memory bank commands (add, list) and post history.
//!
//! These only need the fact store, so they work without an API key.

use crate::ui;
use bino_memory::FactStore;
use bino_types::config;

fn open_store() -> FactStore {
    match FactStore::open(&config::db_path()) {
        Ok(store) => store,
        Err(e) => {
            ui::error(&format!("Failed to open memory store: {e}"));
            std::process::exit(1);
        }
    }
}

pub fn cmd_add(key: &str, value: &str) {
    let store = open_store();
    match store.insert(key, value) {
        Ok(entry) => ui::success(&format!("Stored memory #{} ({})", entry.id, entry.key)),
        Err(e) => {
            ui::error(&format!("Failed to store memory: {e}"));
            std::process::exit(1);
        }
    }
}

pub fn cmd_list(limit: Option<usize>) {
    let store = open_store();
    match store.recall(limit) {
        Ok(entries) if entries.is_empty() => println!("Memory is empty."),
        Ok(entries) => {
            for entry in entries {
                println!(
                    "[{}] {}: {}",
                    entry.created_at.format("%Y-%m-%d %H:%M"),
                    entry.key,
                    entry.value
                );
            }
        }
        Err(e) => {
            ui::error(&format!("Failed to list memory: {e}"));
            std::process::exit(1);
        }
    }
}

pub fn cmd_history(limit: usize) {
    let store = open_store();
    match store.list_posts(limit) {
        Ok(posts) if posts.is_empty() => println!("No posts have been drafted yet."),
        Ok(posts) => {
            for post in posts {
                println!(
                    "[{}] ({}) {}",
                    post.created_at.format("%Y-%m-%d %H:%M"),
                    post.topic.as_deref().unwrap_or("general"),
                    post.content
                );
            }
        }
        Err(e) => {
            ui::error(&format!("Failed to list posts: {e}"));
            std::process::exit(1);
        }
    }
}

//! Agent configuration loaded from the environment.

use crate::error::{BinoError, BinoResult};
use std::path::PathBuf;

/// Default model sent to the generation API.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// How many memory entries to recall when grounding a draft.
pub const DEFAULT_MEMORY_LIMIT: usize = 10;

/// Runtime configuration for the agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// OpenAI API key. Required.
    pub api_key: String,
    /// Model identifier sent to the generation API.
    pub model: String,
    /// Path to the SQLite database.
    pub db_path: PathBuf,
    /// Path to the market snapshot JSON.
    pub snapshot_path: PathBuf,
    /// Memory recall limit for grounding.
    pub memory_limit: usize,
}

impl AgentConfig {
    /// Load configuration from the environment.
    ///
    /// `OPENAI_API_KEY` is required and its absence is fatal; everything
    /// else defaults under `~/.bino/`.
    pub fn from_env() -> BinoResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| BinoError::Config("OPENAI_API_KEY is not set".to_string()))?;
        let model = std::env::var("BINO_MODEL")
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Ok(Self {
            api_key,
            model,
            db_path: db_path(),
            snapshot_path: snapshot_path(),
            memory_limit: DEFAULT_MEMORY_LIMIT,
        })
    }
}

/// Data directory: `~/.bino`, falling back to the current directory.
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".bino"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Database path: `BINO_DB_PATH` or `~/.bino/agent.db`.
///
/// Resolvable without credentials so memory/history commands work without
/// an API key.
pub fn db_path() -> PathBuf {
    std::env::var("BINO_DB_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("agent.db"))
}

/// Snapshot path: `BINO_SNAPSHOT_PATH` or `~/.bino/bnb_data.json`.
pub fn snapshot_path() -> PathBuf {
    std::env::var("BINO_SNAPSHOT_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| data_dir().join("bnb_data.json"))
}

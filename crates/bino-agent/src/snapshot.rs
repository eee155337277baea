//! Snapshot loading and refresh.
//!
//! The snapshot file is written wholesale by an external scraper; this
//! module only reads it back and drives the refresh step. A missing or
//! corrupt snapshot is never an error — the grounding assembler
//! substitutes fallbacks.

use async_trait::async_trait;
use bino_types::error::{BinoError, BinoResult};
use bino_types::snapshot::Snapshot;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Whether the refresh step produced a fresh snapshot or the pipeline is
/// running on whatever was already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The scraper ran and rewrote the snapshot file.
    Refreshed,
    /// The scraper failed; the prior (possibly absent) snapshot is used.
    FellBack,
}

/// External collaborator that rewrites the snapshot file.
#[async_trait]
pub trait SnapshotRefresher: Send + Sync {
    async fn refresh(&self) -> BinoResult<()>;
}

/// Refresher that shells out to an external scraper command.
///
/// The command receives the snapshot path as its final argument and is
/// expected to rewrite that file; a non-zero exit status counts as a
/// failed refresh.
pub struct ScriptRefresher {
    program: String,
    args: Vec<String>,
    snapshot_path: PathBuf,
}

impl ScriptRefresher {
    pub fn new(program: impl Into<String>, args: Vec<String>, snapshot_path: PathBuf) -> Self {
        Self {
            program: program.into(),
            args,
            snapshot_path,
        }
    }
}

#[async_trait]
impl SnapshotRefresher for ScriptRefresher {
    async fn refresh(&self) -> BinoResult<()> {
        debug!(program = %self.program, "Running snapshot scraper");
        let status = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(&self.snapshot_path)
            .status()
            .await
            .map_err(|e| BinoError::Internal(format!("scraper failed to start: {e}")))?;
        if !status.success() {
            return Err(BinoError::Internal(format!("scraper exited with {status}")));
        }
        Ok(())
    }
}

/// Refresher that does nothing (offline drafting, tests).
pub struct NoopRefresher;

#[async_trait]
impl SnapshotRefresher for NoopRefresher {
    async fn refresh(&self) -> BinoResult<()> {
        Ok(())
    }
}

/// Load the latest snapshot from `path`.
///
/// A missing, unreadable, or unparsable snapshot yields `None`.
pub fn load_snapshot(path: &Path) -> Option<Snapshot> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No snapshot available");
            return None;
        }
    };
    match serde_json::from_str::<Snapshot>(&contents) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Snapshot unparsable, ignoring");
            None
        }
    }
}

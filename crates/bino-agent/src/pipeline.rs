//! Post pipeline orchestration.
//!
//! One invocation: refresh the snapshot (failure absorbed), assemble the
//! grounding context, generate a raw draft, normalize it, persist the
//! final post. Single-threaded per invocation; no two invocations run
//! concurrently in this design.

use crate::driver::Generator;
use crate::grounding;
use crate::prompt;
use crate::snapshot::{self, RefreshOutcome, SnapshotRefresher};
use crate::style;
use bino_memory::FactStore;
use bino_types::config::AgentConfig;
use bino_types::error::BinoResult;
use tracing::{info, warn};

/// Orchestrates grounding, generation, normalization, and persistence.
pub struct PostPipeline {
    config: AgentConfig,
    store: FactStore,
    refresher: Box<dyn SnapshotRefresher>,
    generator: Box<dyn Generator>,
}

impl PostPipeline {
    pub fn new(
        config: AgentConfig,
        store: FactStore,
        refresher: Box<dyn SnapshotRefresher>,
        generator: Box<dyn Generator>,
    ) -> Self {
        Self {
            config,
            store,
            refresher,
            generator,
        }
    }

    /// Draft a post grounded in the memory bank and the latest snapshot.
    ///
    /// A failed refresh falls back to the prior (possibly absent)
    /// snapshot; generation and persistence failures propagate to the
    /// caller.
    pub async fn draft_post(
        &self,
        topic: Option<&str>,
        instructions: Option<&str>,
    ) -> BinoResult<String> {
        self.refresh_snapshot().await;

        let snap = snapshot::load_snapshot(&self.config.snapshot_path);
        let ctx = grounding::assemble(&self.store, snap.as_ref(), self.config.memory_limit)?;
        let request = prompt::build_prompt(&ctx, topic, instructions);

        let raw = self.generator.generate(&request).await?;
        let final_text = style::normalize(raw.trim());

        let record = self
            .store
            .add_post(&final_text, topic, Some(self.generator.model()))?;
        info!(id = record.id, "Post drafted");
        Ok(final_text)
    }

    /// Run the external refresher, mapping any failure to an explicit
    /// fallback so callers and tests can observe which path was taken.
    pub async fn refresh_snapshot(&self) -> RefreshOutcome {
        match self.refresher.refresh().await {
            Ok(()) => RefreshOutcome::Refreshed,
            Err(e) => {
                warn!(error = %e, "Snapshot refresh failed, using prior snapshot");
                RefreshOutcome::FellBack
            }
        }
    }

    /// The shared fact store behind this pipeline.
    pub fn store(&self) -> &FactStore {
        &self.store
    }
}

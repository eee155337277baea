//! Publishing collaborator: hands a finished post to the external
//! browser-automation script.
//!
//! Session cookies and the actual posting flow live in the script; this
//! module only invokes it and surfaces failure.

use async_trait::async_trait;
use bino_types::error::{BinoError, BinoResult};
use tracing::info;

/// External publishing step.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, text: &str) -> BinoResult<()>;
}

/// Publisher that invokes a Node-based automation script with the post
/// text as its final argument.
pub struct ScriptPublisher {
    program: String,
    script: String,
}

impl ScriptPublisher {
    pub fn new(program: impl Into<String>, script: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            script: script.into(),
        }
    }
}

#[async_trait]
impl Publisher for ScriptPublisher {
    async fn publish(&self, text: &str) -> BinoResult<()> {
        info!(script = %self.script, "Handing post to publishing script");
        let output = tokio::process::Command::new(&self.program)
            .arg(&self.script)
            .arg(text)
            .output()
            .await
            .map_err(|e| BinoError::Publish(format!("failed to start publisher: {e}")))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BinoError::Publish(format!(
                "publisher exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

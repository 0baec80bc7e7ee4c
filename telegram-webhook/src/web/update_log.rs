//! Best-effort diagnostic logging of inbound updates.
//!
//! Preview deployments log every accepted update so the payload shape can be
//! inspected. Nothing here is allowed to affect the reply: callers discard
//! the returned `Result`.

use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Failure while emitting an update to the log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("failed to serialize update: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Destination for diagnostic copies of inbound updates.
pub trait UpdateLogger: Send + Sync {
    fn log_update(&self, update: &Value) -> Result<(), LogError>;
}

/// Writes updates to the `tracing` pipeline as a JSON string field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingUpdateLogger;

impl UpdateLogger for TracingUpdateLogger {
    fn log_update(&self, update: &Value) -> Result<(), LogError> {
        let json = serde_json::to_string(update)?;
        info!(update = %json, "telegram_update");
        Ok(())
    }
}

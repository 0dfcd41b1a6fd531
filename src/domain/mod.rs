use derive_more::Display;
use thiserror::Error;
use tracing::error;

pub mod todo;

#[cfg(test)]
pub(crate) mod test_util;

/// The store operation that was being attempted when something went wrong
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    #[display("fetch todos")]
    Fetch,
    #[display("add todo")]
    Add,
    #[display("update todo")]
    Update,
    #[display("delete todo")]
    Delete,
}

/// The only failure the todo store reports. Connectivity problems and constraint violations
/// are not told apart; callers get a fixed message per operation and the cause for logging.
#[derive(Error, Debug)]
#[error("Failed to {action}")]
pub struct StoreError {
    pub action: StoreAction,
    #[source]
    pub cause: anyhow::Error,
}

impl StoreError {
    /// Logs the driven port failure and wraps it up as a [StoreError] for [action]
    pub(crate) fn trying_to(action: StoreAction, cause: anyhow::Error) -> Self {
        error!("Failed to {action}: {cause:#}");
        Self { action, cause }
    }
}

//! TaskExecutor port - タスクの実処理
//!
//! 実処理の中身は core の関心外。worker はこの trait を呼ぶだけ。

use async_trait::async_trait;

use crate::domain::Task;

/// Failure reported by a work unit. The task ends up `Failed` with this message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ExecutionError {
    message: String,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Runs the work for one task.
///
/// Called with the task already `InProgress`. Must not touch the store.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    async fn execute(&self, task: &Task) -> Result<(), ExecutionError>;
}

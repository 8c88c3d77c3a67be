//! Errors - エラー型と分類
//!
//! - 回復可能: `TaskNotFound`（呼び出し側に not found として返す）
//! - プログラミングエラー: close 後の enqueue、二重 start / stop（fail loudly）

use thiserror::Error;

use super::{TaskId, TaskStatus};

#[derive(Debug, Error)]
pub enum BobbinError {
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("task queue is closed")]
    QueueClosed,

    #[error("queue capacity must be at least 1")]
    InvalidCapacity,

    #[error("worker pool needs at least one worker")]
    NoWorkers,

    #[error("monitor interval must be greater than zero")]
    InvalidMonitorInterval,

    #[error("worker pool already started")]
    PoolAlreadyStarted,

    #[error("worker pool already stopped")]
    PoolAlreadyStopped,

    #[error("invalid status transition {from} -> {to}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    #[error("config: {0}")]
    Config(String),
}

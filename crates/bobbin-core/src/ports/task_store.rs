//! TaskStore port - タスク状態の正本（source of truth）
//!
//! - すべての状態変更は `set` を通す（フィールドを直接共有しない）
//! - 読み手は書き込み途中のレコードを見ない

use crate::domain::{Stats, Task, TaskId};

/// Concurrent registry of task records keyed by id.
pub trait TaskStore: Send + Sync {
    /// Insert or replace the record for `task.id()`.
    fn set(&self, task: Task);

    /// Current record, `None` for an unknown id.
    fn get(&self, id: &TaskId) -> Option<Task>;

    /// Snapshot copy of every record. Order is unspecified.
    fn get_all(&self) -> Vec<Task>;

    /// Number of records held.
    fn count(&self) -> usize;

    /// Drop a record. Only used to roll back an ingestion whose enqueue failed.
    fn remove(&self, id: &TaskId) -> Option<Task>;

    /// Aggregate counts over one snapshot.
    fn stats(&self) -> Stats {
        Stats::from_tasks(&self.get_all())
    }
}

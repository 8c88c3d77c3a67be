//! TaskService - ingestion と参照の入口（transport 層が呼ぶ境界）

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{BobbinError, Stats, Task, TaskId, TaskIdGenerator};
use crate::ports::{Clock, SystemClock, TaskStore};
use crate::queue::TaskQueue;

/// Create / list / get / stats over the shared store and queue.
///
/// # create のフロー
/// 1. counter から ID を払い出し、Pending の Task を作る
/// 2. `TaskStore::set`
/// 3. `TaskQueue::enqueue`（満杯なら待つ）
///
/// set を enqueue より先に行う。逆順だと worker の InProgress を
/// Pending で上書きする可能性がある。
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    queue: Arc<TaskQueue>,
    ids: TaskIdGenerator,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, queue: Arc<TaskQueue>) -> Self {
        Self {
            store,
            queue,
            ids: TaskIdGenerator::new(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a new task and queue it. Returns the `Pending` record.
    ///
    /// Waits while the queue is full. If the queue is closed the record is
    /// removed again and `QueueClosed` is returned.
    pub async fn create(&self, payload: impl Into<String>) -> Result<Task, BobbinError> {
        let task = Task::new(self.ids.next_id(), payload, self.clock.now());
        self.store.set(task.clone());

        if let Err(e) = self.queue.enqueue(task.clone()).await {
            self.store.remove(task.id());
            warn!(task_id = %task.id(), error = %e, "task rejected");
            return Err(e);
        }

        debug!(task_id = %task.id(), "task submitted");
        Ok(task)
    }

    /// Every task, in no particular order.
    pub fn list(&self) -> Vec<Task> {
        self.store.get_all()
    }

    pub fn get(&self, id: &TaskId) -> Result<Task, BobbinError> {
        self.store
            .get(id)
            .ok_or_else(|| BobbinError::TaskNotFound(id.clone()))
    }

    pub fn stats(&self) -> Stats {
        self.store.stats()
    }
}

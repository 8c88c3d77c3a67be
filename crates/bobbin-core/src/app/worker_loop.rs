//! WorkerLoop - タスク実行ループ
//!
//! # フロー
//! 1. stop signal と `TaskQueue::dequeue()` を select
//! 2. Pending -> InProgress、`TaskStore::set`
//! 3. `TaskExecutor::execute()`
//! 4. InProgress -> Done / Failed、`TaskStore::set`
//!
//! work unit は別 task で走らせる。panic しても worker は生き残り、task は Failed になる

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::{Task, TaskStatus};
use crate::ports::{Clock, TaskExecutor, TaskStore};
use crate::queue::TaskQueue;

/// One worker. Processes a single task at a time.
pub struct WorkerLoop {
    worker_id: usize,
    queue: Arc<TaskQueue>,
    store: Arc<dyn TaskStore>,
    executor: Arc<dyn TaskExecutor>,
    clock: Arc<dyn Clock>,
}

impl WorkerLoop {
    pub fn new(
        worker_id: usize,
        queue: Arc<TaskQueue>,
        store: Arc<dyn TaskStore>,
        executor: Arc<dyn TaskExecutor>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            worker_id,
            queue,
            store,
            executor,
            clock,
        }
    }

    /// Loop until the stop signal flips or the queue reports closed.
    ///
    /// A task that has been dequeued always runs to completion; stop is only
    /// observed between tasks.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        let worker_id = self.worker_id;
        debug!(worker_id, "worker started");

        loop {
            if *shutdown_rx.borrow() {
                info!(worker_id, "worker received stop signal");
                break;
            }

            // dequeue は待つ可能性があるので stop と競合させる
            // (dequeue は cancel-safe: drop されても item は失われない)
            let next = tokio::select! {
                biased;
                changed = shutdown_rx.changed() => {
                    if changed.is_err() {
                        info!(worker_id, "stop signal dropped, worker exiting");
                        break;
                    }
                    continue;
                }
                task = self.queue.dequeue() => task,
            };

            let Some(task) = next else {
                info!(worker_id, "queue closed, worker exiting");
                break;
            };

            self.process(task).await;
        }
    }

    async fn process(&self, mut task: Task) {
        let worker_id = self.worker_id;

        if let Err(e) = task.start(self.clock.now()) {
            // Only Pending tasks are ever enqueued.
            error!(worker_id, task_id = %task.id(), error = %e, "dequeued task is not pending");
            return;
        }
        self.store.set(task.clone());
        info!(worker_id, task_id = %task.id(), "processing task");

        let outcome = self.execute(&task).await;
        let now = self.clock.now();
        let committed = match outcome {
            Ok(()) => task.complete(now),
            Err(message) => task.fail(message, now),
        };
        if let Err(e) = committed {
            error!(worker_id, task_id = %task.id(), error = %e, "status commit rejected");
            return;
        }
        self.store.set(task.clone());

        match task.status() {
            TaskStatus::Failed => {
                warn!(worker_id, task_id = %task.id(), error = task.error().unwrap_or_default(), "task failed")
            }
            _ => info!(worker_id, task_id = %task.id(), "completed task"),
        }
    }

    /// Run the work unit on its own tokio task so a panic fails the task
    /// instead of killing this worker.
    async fn execute(&self, task: &Task) -> Result<(), String> {
        let executor = Arc::clone(&self.executor);
        let work = task.clone();
        let handle = tokio::spawn(async move { executor.execute(&work).await });

        match handle.await {
            Ok(result) => result.map_err(|e| e.message().to_string()),
            Err(e) if e.is_panic() => {
                error!(worker_id = self.worker_id, task_id = %task.id(), "work unit panicked");
                Err("work unit panicked".to_string())
            }
            Err(e) => Err(format!("work unit aborted: {e}")),
        }
    }
}

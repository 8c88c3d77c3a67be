//! Bounded in-memory task queue.

use std::collections::VecDeque;

use tokio::sync::{Mutex, Notify};
use tracing::{error, info};

use crate::domain::{BobbinError, Task};

/// Queue state guarded by one lock.
struct QueueState {
    items: VecDeque<Task>,
    closed: bool,
}

/// Bounded FIFO channel between ingestion and workers.
///
/// Design:
/// - 満杯なら `enqueue` が待つ（backpressure。reject はしない）
/// - 空なら `dequeue` が待つ。close 後は残りを drain してから `None`
/// - Waiters register on the `Notify` before checking the state, so a wakeup
///   sent between the check and the await is not lost.
/// - `dequeue` is cancel-safe: an item is popped and returned in the same poll.
pub struct TaskQueue {
    state: Mutex<QueueState>,
    capacity: usize,
    /// Signalled when an item is pushed (or on close).
    not_empty: Notify,
    /// Signalled when an item is popped (or on close).
    not_full: Notify,
}

impl TaskQueue {
    pub fn new(capacity: usize) -> Result<Self, BobbinError> {
        if capacity == 0 {
            return Err(BobbinError::InvalidCapacity);
        }
        Ok(Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            capacity,
            not_empty: Notify::new(),
            not_full: Notify::new(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append `task`, waiting while the queue is full.
    ///
    /// Fails with `QueueClosed` if the queue is closed, including while this
    /// call is waiting for space.
    pub async fn enqueue(&self, task: Task) -> Result<(), BobbinError> {
        loop {
            let space = self.not_full.notified();
            tokio::pin!(space);
            space.as_mut().enable();

            {
                let mut state = self.state.lock().await;
                if state.closed {
                    error!(task_id = %task.id(), "enqueue on a closed queue");
                    return Err(BobbinError::QueueClosed);
                }
                if state.items.len() < self.capacity {
                    state.items.push_back(task);
                    drop(state);
                    self.not_empty.notify_one();
                    return Ok(());
                }
            }

            space.await;
        }
    }

    /// Remove the head, waiting while the queue is empty.
    ///
    /// `None` means the queue is closed and fully drained.
    pub async fn dequeue(&self) -> Option<Task> {
        loop {
            let arrival = self.not_empty.notified();
            tokio::pin!(arrival);
            arrival.as_mut().enable();

            {
                let mut state = self.state.lock().await;
                if let Some(task) = state.items.pop_front() {
                    drop(state);
                    self.not_full.notify_one();
                    return Some(task);
                }
                if state.closed {
                    return None;
                }
            }

            arrival.await;
        }
    }

    /// Stop accepting items. Buffered items stay dequeueable. Idempotent.
    pub async fn close(&self) {
        {
            let mut state = self.state.lock().await;
            if state.closed {
                return;
            }
            state.closed = true;
            info!(buffered = state.items.len(), "task queue closed");
        }
        // 待っている producer / consumer を全員起こして closed を見せる
        self.not_empty.notify_waiters();
        self.not_full.notify_waiters();
    }

    pub async fn is_closed(&self) -> bool {
        self.state.lock().await.closed
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use chrono::Utc;
    use std::sync::Arc;
    use std::time::Duration;

    fn task(id: &str) -> Task {
        Task::new(TaskId::new(id), format!("payload-{id}"), Utc::now())
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(TaskQueue::new(0), Err(BobbinError::InvalidCapacity)));
    }

    #[tokio::test]
    async fn dequeues_in_enqueue_order() {
        let queue = TaskQueue::new(10).unwrap();
        for i in 1..=5 {
            queue.enqueue(task(&i.to_string())).await.unwrap();
        }
        assert_eq!(queue.len().await, 5);

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(queue.dequeue().await.unwrap().id().to_string());
        }
        assert_eq!(seen, vec!["1", "2", "3", "4", "5"]);
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn full_queue_blocks_until_dequeue() {
        let queue = Arc::new(TaskQueue::new(1).unwrap());
        queue.enqueue(task("1")).await.unwrap();

        let producer = tokio::spawn({
            let queue = queue.clone();
            async move { queue.enqueue(task("2")).await }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!producer.is_finished(), "second enqueue should be blocked");
        assert_eq!(queue.len().await, 1);

        let first = queue.dequeue().await.unwrap();
        assert_eq!(first.id().as_str(), "1");

        tokio::time::timeout(Duration::from_secs(1), producer)
            .await
            .expect("producer should be released")
            .unwrap()
            .unwrap();
        assert_eq!(queue.dequeue().await.unwrap().id().as_str(), "2");
    }

    #[tokio::test]
    async fn empty_queue_blocks_until_enqueue() {
        let queue = Arc::new(TaskQueue::new(4).unwrap());
        let consumer = tokio::spawn({
            let queue = queue.clone();
            async move { queue.dequeue().await }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!consumer.is_finished());

        queue.enqueue(task("1")).await.unwrap();
        let got = tokio::time::timeout(Duration::from_secs(1), consumer)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got.unwrap().id().as_str(), "1");
    }

    #[tokio::test]
    async fn close_drains_buffered_items_first() {
        let queue = TaskQueue::new(4).unwrap();
        queue.enqueue(task("1")).await.unwrap();
        queue.enqueue(task("2")).await.unwrap();
        queue.close().await;

        assert_eq!(queue.dequeue().await.unwrap().id().as_str(), "1");
        assert_eq!(queue.dequeue().await.unwrap().id().as_str(), "2");
        assert!(queue.dequeue().await.is_none());
        assert!(queue.is_closed().await);
    }

    #[tokio::test]
    async fn enqueue_after_close_fails() {
        let queue = TaskQueue::new(4).unwrap();
        queue.close().await;
        let err = queue.enqueue(task("1")).await.unwrap_err();
        assert!(matches!(err, BobbinError::QueueClosed));
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn close_releases_blocked_producer_with_error() {
        let queue = Arc::new(TaskQueue::new(1).unwrap());
        queue.enqueue(task("1")).await.unwrap();

        let producer = tokio::spawn({
            let queue = queue.clone();
            async move { queue.enqueue(task("2")).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;

        queue.close().await;
        let result = tokio::time::timeout(Duration::from_secs(1), producer)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(result, Err(BobbinError::QueueClosed)));
    }

    #[tokio::test]
    async fn close_wakes_every_blocked_consumer() {
        let queue = Arc::new(TaskQueue::new(4).unwrap());
        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let queue = queue.clone();
                tokio::spawn(async move { queue.dequeue().await })
            })
            .collect();
        tokio::time::sleep(Duration::from_millis(50)).await;

        queue.close().await;
        for consumer in consumers {
            let got = tokio::time::timeout(Duration::from_secs(1), consumer)
                .await
                .unwrap()
                .unwrap();
            assert!(got.is_none());
        }
    }

    #[tokio::test]
    async fn cancelled_dequeue_does_not_lose_items() {
        let queue = TaskQueue::new(4).unwrap();

        // 空のまま timeout で future を drop する
        let timed_out = tokio::time::timeout(Duration::from_millis(20), queue.dequeue()).await;
        assert!(timed_out.is_err());

        queue.enqueue(task("1")).await.unwrap();
        assert_eq!(queue.dequeue().await.unwrap().id().as_str(), "1");
    }

    #[tokio::test]
    async fn close_is_idempotent() {
        let queue = TaskQueue::new(1).unwrap();
        queue.close().await;
        queue.close().await;
        assert!(queue.is_closed().await);
    }
}

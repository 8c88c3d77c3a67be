//! WorkerPool - ワーカー群と monitor の起動・停止

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::{Monitor, WorkerLoop};
use crate::domain::BobbinError;
use crate::impls::LogReporter;
use crate::ports::{Clock, StatsReporter, SystemClock, TaskExecutor, TaskStore};
use crate::queue::TaskQueue;

/// Default monitor period.
pub const DEFAULT_MONITOR_INTERVAL: Duration = Duration::from_secs(5);

/// Owns N worker loops plus one monitor loop.
///
/// - `start(n)` で spawn（一度だけ）
/// - `stop()` で stop signal を broadcast → queue close → 全 loop の終了を待つ
/// - stop は single-shot。二回目は `PoolAlreadyStopped`
///
/// # 使用例
/// ```ignore
/// let pool = WorkerPool::new(queue, store, Arc::new(SimulatedWork::default()));
/// pool.start(2).await?;
/// // ...
/// pool.stop().await?;
/// ```
pub struct WorkerPool {
    queue: Arc<TaskQueue>,
    store: Arc<dyn TaskStore>,
    executor: Arc<dyn TaskExecutor>,
    reporter: Arc<dyn StatsReporter>,
    clock: Arc<dyn Clock>,
    monitor_interval: Duration,
    shutdown_tx: watch::Sender<bool>,
    joins: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
    stopped: AtomicBool,
    workers: AtomicUsize,
}

impl WorkerPool {
    pub fn new(
        queue: Arc<TaskQueue>,
        store: Arc<dyn TaskStore>,
        executor: Arc<dyn TaskExecutor>,
    ) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            queue,
            store,
            executor,
            reporter: Arc::new(LogReporter),
            clock: Arc::new(SystemClock),
            monitor_interval: DEFAULT_MONITOR_INTERVAL,
            shutdown_tx,
            joins: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            workers: AtomicUsize::new(0),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn StatsReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_monitor_interval(mut self, interval: Duration) -> Self {
        self.monitor_interval = interval;
        self
    }

    /// Spawn `n` workers and the monitor.
    pub async fn start(&self, n: usize) -> Result<(), BobbinError> {
        if n == 0 {
            return Err(BobbinError::NoWorkers);
        }
        if self.monitor_interval.is_zero() {
            return Err(BobbinError::InvalidMonitorInterval);
        }

        // stop と並行しても取りこぼさないよう、joins の lock を持ったまま判定・spawn する
        let mut joins = self.joins.lock().await;
        if self.stopped.load(Ordering::SeqCst) {
            error!("start called on a stopped worker pool");
            return Err(BobbinError::PoolAlreadyStopped);
        }
        if self.started.swap(true, Ordering::SeqCst) {
            error!("start called twice on the worker pool");
            return Err(BobbinError::PoolAlreadyStarted);
        }

        joins.reserve(n + 1);
        for worker_id in 0..n {
            let worker = WorkerLoop::new(
                worker_id,
                Arc::clone(&self.queue),
                Arc::clone(&self.store),
                Arc::clone(&self.executor),
                Arc::clone(&self.clock),
            );
            joins.push(tokio::spawn(worker.run(self.shutdown_tx.subscribe())));
        }

        let monitor = Monitor::new(
            Arc::clone(&self.store),
            Arc::clone(&self.reporter),
            self.monitor_interval,
        );
        joins.push(tokio::spawn(monitor.run(self.shutdown_tx.subscribe())));

        self.workers.store(n, Ordering::SeqCst);
        info!(workers = n, monitor_interval_ms = self.monitor_interval.as_millis() as u64, "worker pool started");
        Ok(())
    }

    /// Broadcast stop, close the queue and wait for every loop to exit.
    ///
    /// In-flight tasks finish before their worker exits. Buffered tasks that no
    /// worker has dequeued yet stay `Pending`.
    pub async fn stop(&self) -> Result<(), BobbinError> {
        if self.stopped.swap(true, Ordering::SeqCst) {
            error!("stop called twice on the worker pool");
            return Err(BobbinError::PoolAlreadyStopped);
        }

        info!("stopping worker pool");
        self.shutdown_tx.send_replace(true);
        self.queue.close().await;

        let handles: Vec<_> = self.joins.lock().await.drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "worker loop ended abnormally");
            }
        }

        self.workers.store(0, Ordering::SeqCst);
        info!("all workers stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.started.load(Ordering::SeqCst) && !self.stopped.load(Ordering::SeqCst)
    }

    /// Number of live worker loops (monitor excluded).
    pub fn worker_count(&self) -> usize {
        self.workers.load(Ordering::SeqCst)
    }
}

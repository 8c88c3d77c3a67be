//! Monitor - 定期的に統計を集計して報告

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::Stats;
use crate::ports::{StatsReporter, TaskStore};

/// Reads aggregate counts from the store every `interval` and hands them to a reporter.
///
/// # フロー
/// 1. interval ごとに `TaskStore::stats()`
/// 2. `StatsReporter::report()`
/// 3. stop signal で終了（tick 待ちの途中でも即座に抜ける）
pub struct Monitor {
    store: Arc<dyn TaskStore>,
    reporter: Arc<dyn StatsReporter>,
    interval: Duration,
}

impl Monitor {
    pub fn new(
        store: Arc<dyn TaskStore>,
        reporter: Arc<dyn StatsReporter>,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            reporter,
            interval,
        }
    }

    /// Compute and report one snapshot.
    pub fn tick(&self) -> Stats {
        let stats = self.store.stats();
        self.reporter.report(&stats);
        stats
    }

    /// Run until the stop signal flips (or its sender is dropped).
    ///
    /// The first report happens one full interval after start.
    pub async fn run(self, mut shutdown_rx: watch::Receiver<bool>) {
        if *shutdown_rx.borrow() {
            return;
        }

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        debug!(interval_ms = self.interval.as_millis() as u64, "monitor started");

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    info!("monitor received stop signal");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick();
                }
            }
        }
    }
}

//! LogReporter - 統計を tracing に出す

use tracing::info;

use crate::domain::Stats;
use crate::ports::StatsReporter;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl StatsReporter for LogReporter {
    fn report(&self, stats: &Stats) {
        info!(
            submitted = stats.submitted,
            pending = stats.pending,
            in_progress = stats.in_progress,
            completed = stats.completed,
            failed = stats.failed,
            "monitor stats"
        );
    }
}

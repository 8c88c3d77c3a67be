//! StatsReporter port - Monitor の出力先

use crate::domain::Stats;

/// Receives each snapshot the monitor computes.
///
/// # 実装
/// - LogReporter: tracing に出すだけ（デフォルト）
pub trait StatsReporter: Send + Sync {
    fn report(&self, stats: &Stats);
}

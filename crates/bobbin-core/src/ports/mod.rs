//! Ports - 抽象化レイヤー
//!
//! 各 trait は差し替え可能な境界（ストア、実処理、統計の出力先、時刻）を定義します。

pub mod clock;
pub mod executor;
pub mod reporter;
pub mod task_store;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::executor::{ExecutionError, TaskExecutor};
pub use self::reporter::StatsReporter;
pub use self::task_store::TaskStore;

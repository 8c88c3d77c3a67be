//! App - アプリケーション層
//!
//! ports を組み合わせてタスクの受付・実行・監視を行います。
//!
//! # 主要コンポーネント
//! - **TaskService**: ingestion（create / list / get / stats）
//! - **WorkerPool**: WorkerLoop × N と Monitor の起動・停止
//! - **WorkerLoop**: dequeue → InProgress → execute → Done / Failed
//! - **Monitor**: 定期的な統計レポート

pub mod monitor;
pub mod service;
pub mod worker_loop;
pub mod worker_pool;

pub use self::monitor::Monitor;
pub use self::service::TaskService;
pub use self::worker_loop::WorkerLoop;
pub use self::worker_pool::{DEFAULT_MONITOR_INTERVAL, WorkerPool};

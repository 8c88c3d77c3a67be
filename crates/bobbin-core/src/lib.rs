//! bobbin-core
//!
//! Task ingestion and execution core.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TaskId, Task, TaskStatus, Stats, BobbinError）
//! - **ports**: 抽象化レイヤー（TaskStore, TaskExecutor, StatsReporter, Clock）
//! - **store**: 汎用の並行 key-value Repository
//! - **queue**: bounded FIFO の TaskQueue（backpressure + close）
//! - **impls**: ports の実装（InMemoryTaskStore, SimulatedWork, LogReporter）
//! - **app**: TaskService, WorkerPool, WorkerLoop, Monitor
//! - **config**: 環境変数からの設定

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod queue;
pub mod store;

pub use app::{Monitor, TaskService, WorkerPool};
pub use config::Config;
pub use domain::{BobbinError, Stats, Task, TaskId, TaskStatus};
pub use queue::TaskQueue;

//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **InMemoryTaskStore**: Repository ベースの TaskStore
//! - **SimulatedWork**: 一定時間 sleep するだけの TaskExecutor
//! - **LogReporter**: tracing に出す StatsReporter

pub mod log_reporter;
pub mod memory_store;
pub mod simulated;

pub use self::log_reporter::LogReporter;
pub use self::memory_store::InMemoryTaskStore;
pub use self::simulated::SimulatedWork;

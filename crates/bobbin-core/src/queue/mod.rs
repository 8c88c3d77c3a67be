//! Queue module: bounded FIFO between ingestion and the worker pool.

mod memory;

pub use memory::TaskQueue;

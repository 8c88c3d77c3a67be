//! Domain model (ids, task, status, stats, errors).

pub mod errors;
pub mod ids;
pub mod state;
pub mod stats;
pub mod task;

pub use self::errors::BobbinError;
pub use self::ids::{TaskId, TaskIdGenerator};
pub use self::state::TaskStatus;
pub use self::stats::Stats;
pub use self::task::Task;

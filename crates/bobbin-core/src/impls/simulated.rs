//! SimulatedWork - 実処理のプレースホルダー

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Task;
use crate::ports::{ExecutionError, TaskExecutor};

/// Sleeps for a fixed duration and succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedWork {
    duration: Duration,
}

impl SimulatedWork {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for SimulatedWork {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl TaskExecutor for SimulatedWork {
    async fn execute(&self, task: &Task) -> Result<(), ExecutionError> {
        debug!(task_id = %task.id(), duration_ms = self.duration.as_millis() as u64, "simulating work");
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}

//! Aggregate counts derived from the task store.

use serde::{Deserialize, Serialize};

use super::{Task, TaskStatus};

/// Stats は保存しない。毎回 TaskStore の snapshot から計算する。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub submitted: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub failed: usize,
}

impl Stats {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut stats = Stats::default();
        for task in tasks {
            stats.record(task.status());
        }
        stats
    }

    /// Count one task in `status`.
    pub fn record(&mut self, status: TaskStatus) {
        self.submitted += 1;
        match status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.in_progress += 1,
            TaskStatus::Done => self.completed += 1,
            TaskStatus::Failed => self.failed += 1,
        }
    }

    /// `submitted == pending + in_progress + completed + failed`
    pub fn is_consistent(&self) -> bool {
        self.submitted == self.pending + self.in_progress + self.completed + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskId;
    use chrono::Utc;

    fn task_in(id: &str, status: TaskStatus) -> Task {
        let now = Utc::now();
        let mut task = Task::new(TaskId::new(id), "p", now);
        match status {
            TaskStatus::Pending => {}
            TaskStatus::InProgress => task.start(now).unwrap(),
            TaskStatus::Done => {
                task.start(now).unwrap();
                task.complete(now).unwrap();
            }
            TaskStatus::Failed => {
                task.start(now).unwrap();
                task.fail("err", now).unwrap();
            }
        }
        task
    }

    #[test]
    fn empty_store_has_zero_counts() {
        let stats = Stats::from_tasks(&Vec::<Task>::new());
        assert_eq!(stats, Stats::default());
        assert!(stats.is_consistent());
    }

    #[test]
    fn counts_each_status() {
        let tasks = vec![
            task_in("1", TaskStatus::Pending),
            task_in("2", TaskStatus::InProgress),
            task_in("3", TaskStatus::Done),
            task_in("4", TaskStatus::Done),
            task_in("5", TaskStatus::Failed),
        ];
        let stats = Stats::from_tasks(&tasks);

        assert_eq!(stats.submitted, 5);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.failed, 1);
        assert!(stats.is_consistent());
    }

    #[test]
    fn json_keeps_original_field_names() {
        let value = serde_json::to_value(Stats::default()).unwrap();
        for key in ["submitted", "completed", "in_progress", "pending", "failed"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}

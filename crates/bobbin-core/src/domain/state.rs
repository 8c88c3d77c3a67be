//! Task lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// TaskStatus はタスクの状態を表現
///
/// State transitions:
/// - Pending -> InProgress -> Done
/// - Pending -> InProgress -> Failed (the work unit returned an error)
///
/// Forward only. No retry edge leads back out of `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Stored and queued, not yet picked up.
    Pending,

    /// Dequeued by a worker, work unit running.
    InProgress,

    /// Work unit finished successfully.
    Done,

    /// Work unit returned an error.
    Failed,
}

impl TaskStatus {
    /// Is this a terminal state (no further transitions)?
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Failed)
    }

    /// Whether `self -> next` is an edge of the lifecycle.
    pub fn can_transition_to(self, next: TaskStatus) -> bool {
        matches!(
            (self, next),
            (TaskStatus::Pending, TaskStatus::InProgress)
                | (TaskStatus::InProgress, TaskStatus::Done)
                | (TaskStatus::InProgress, TaskStatus::Failed)
        )
    }

    /// Wire name, same as the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
            TaskStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use TaskStatus::*;

    #[rstest]
    #[case(Pending, InProgress, true)]
    #[case(InProgress, Done, true)]
    #[case(InProgress, Failed, true)]
    #[case(Pending, Done, false)]
    #[case(Pending, Failed, false)]
    #[case(InProgress, Pending, false)]
    #[case(Done, InProgress, false)]
    #[case(Done, Pending, false)]
    #[case(Failed, InProgress, false)]
    #[case(Done, Done, false)]
    fn transitions(#[case] from: TaskStatus, #[case] to: TaskStatus, #[case] allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    #[case(Pending, "\"PENDING\"")]
    #[case(InProgress, "\"IN_PROGRESS\"")]
    #[case(Done, "\"DONE\"")]
    #[case(Failed, "\"FAILED\"")]
    fn wire_names_match_display(#[case] status: TaskStatus, #[case] json: &str) {
        assert_eq!(serde_json::to_string(&status).unwrap(), json);
        assert_eq!(format!("\"{status}\""), json);
    }

    #[test]
    fn only_done_and_failed_are_terminal() {
        assert!(!Pending.is_terminal());
        assert!(!InProgress.is_terminal());
        assert!(Done.is_terminal());
        assert!(Failed.is_terminal());
    }
}

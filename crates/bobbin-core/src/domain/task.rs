//! Task record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BobbinError, TaskId, TaskStatus};

/// A submitted unit of work.
///
/// Design:
/// - `status` は `advance` 経由でしか変わらない（逆戻り・飛び越し不可）
/// - The payload is opaque to the core.
/// - Workers mutate their own copy and publish it with `TaskStore::set`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    payload: String,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Task {
    /// New task in `Pending`.
    pub fn new(id: TaskId, payload: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            payload: payload.into(),
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
            error: None,
        }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Error message of a `Failed` task.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Move to `next`, rejecting anything that is not a lifecycle edge.
    pub fn advance(&mut self, next: TaskStatus, now: DateTime<Utc>) -> Result<(), BobbinError> {
        if !self.status.can_transition_to(next) {
            return Err(BobbinError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Pending -> InProgress.
    pub fn start(&mut self, now: DateTime<Utc>) -> Result<(), BobbinError> {
        self.advance(TaskStatus::InProgress, now)
    }

    /// InProgress -> Done.
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<(), BobbinError> {
        self.advance(TaskStatus::Done, now)
    }

    /// InProgress -> Failed, keeping the error message.
    pub fn fail(&mut self, error: impl Into<String>, now: DateTime<Utc>) -> Result<(), BobbinError> {
        self.advance(TaskStatus::Failed, now)?;
        self.error = Some(error.into());
        Ok(())
    }
}

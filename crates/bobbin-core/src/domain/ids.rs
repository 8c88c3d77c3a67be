//! Task identifiers.
//!
//! ID は ingestion counter から払い出す文字列。プロセスの生存期間中は再利用しない。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a submitted task.
///
/// The string form of a counter value (`"1"`, `"2"`, ...). Lookups accept any
/// string, so an unknown id is just a miss, not a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Issues `TaskId`s from an atomic counter.
///
/// # Thread Safety
/// - `fetch_add` なので lock なしで複数の ingestion から同時に呼べる
/// - read-then-write にすると同じ ID が二重に出るので使わない
#[derive(Debug, Default)]
pub struct TaskIdGenerator {
    issued: AtomicU64,
}

impl TaskIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next identifier. The first one is `"1"`.
    pub fn next_id(&self) -> TaskId {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        TaskId(n.to_string())
    }

    /// How many identifiers have been handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued.load(Ordering::Relaxed)
    }
}

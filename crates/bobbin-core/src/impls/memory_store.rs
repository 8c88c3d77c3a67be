//! InMemoryTaskStore - `Repository<TaskId, Task>` を TaskStore port として公開

use crate::domain::{Stats, Task, TaskId};
use crate::ports::TaskStore;
use crate::store::Repository;

/// In-memory task registry. State is lost on restart.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: Repository<TaskId, Task>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for InMemoryTaskStore {
    fn set(&self, task: Task) {
        self.tasks.set(task.id().clone(), task);
    }

    fn get(&self, id: &TaskId) -> Option<Task> {
        self.tasks.get(id)
    }

    fn get_all(&self) -> Vec<Task> {
        self.tasks.get_all()
    }

    fn count(&self) -> usize {
        self.tasks.count()
    }

    fn remove(&self, id: &TaskId) -> Option<Task> {
        self.tasks.remove(id)
    }

    // get_all() のコピーを作らず、1 回の read lock で数える
    fn stats(&self) -> Stats {
        self.tasks.inspect(|tasks| Stats::from_tasks(tasks.values()))
    }
}

//! Footer counts derived from the current task list.

use super::task::Task;
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Total/completed/remaining counts. Recomputed on demand, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            completed,
            remaining: tasks.len() - completed,
        }
    }
}

impl Display for TaskSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total {} · Completed {} · Remaining {}",
            self.total, self.completed, self.remaining
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TaskSummary;
    use crate::model::task::Task;

    fn task(id: i64, completed: bool) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            completed,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn summary_counts_completed_and_remaining() {
        let tasks = vec![task(1, false), task(2, true), task(3, false)];
        let summary = TaskSummary::from_tasks(&tasks);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.remaining, 2);
        assert_eq!(
            summary.to_string(),
            "Total 3 · Completed 1 · Remaining 2"
        );
    }

    #[test]
    fn empty_list_has_zero_counts() {
        assert_eq!(TaskSummary::from_tasks(&[]), TaskSummary::default());
    }
}

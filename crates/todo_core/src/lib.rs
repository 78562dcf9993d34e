//! Core persistence and state layer for the to-do list.
//! This crate is the single source of truth for task invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{DbError, DbHandle, DbLocation};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::summary::TaskSummary;
pub use model::task::{NewTask, Task, TaskId, TaskPatch, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::error::{ErrorKind, TaskError};
pub use service::task_state::{StateView, TaskState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

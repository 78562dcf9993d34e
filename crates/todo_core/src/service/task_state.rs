//! Task state container.
//!
//! # Responsibility
//! - Hold the in-memory task list with `loading`/`error` flags for front ends.
//! - Run each mutation against the repository, then reload the full list.
//! - Convert every failure into a `TaskError` instead of propagating it.
//!
//! # Invariants
//! - After a successful operation `tasks` equals the full store contents.
//! - A failed operation leaves `tasks` unchanged and sets `error`.
//! - Every operation starts by clearing the previous error.
//! - Operations take `&mut self`, so they never overlap on one container.

use crate::model::summary::TaskSummary;
use crate::model::task::{
    now_epoch_ms, NewTask, Task, TaskId, TaskPatch, TaskValidationError,
};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::service::error::TaskError;
use log::{info, warn};

pub const TASK_NOT_FOUND_MESSAGE: &str = "Todo not found";

const LOAD_FALLBACK: &str = "Failed to load todos";
const ADD_FALLBACK: &str = "Failed to add todo";
const TOGGLE_FALLBACK: &str = "Failed to toggle todo";
const UPDATE_FALLBACK: &str = "Failed to update todo";
const DELETE_FALLBACK: &str = "Failed to delete todo";
const CLEAR_FALLBACK: &str = "Failed to clear todos";

/// Read-only snapshot passed to change listeners.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub tasks: &'a [Task],
    pub loading: bool,
    pub error: Option<&'a TaskError>,
}

type Listener = Box<dyn FnMut(StateView<'_>)>;

/// In-memory mediator between front-end actions and a task repository.
pub struct TaskState<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    loading: bool,
    error: Option<TaskError>,
    listeners: Vec<Listener>,
}

impl<R: TaskRepository> TaskState<R> {
    /// Creates an empty, idle container. Call `refresh` to load the store.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
            loading: false,
            error: None,
            listeners: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Latest failure; overwritten by the next operation.
    pub fn error(&self) -> Option<&TaskError> {
        self.error.as_ref()
    }

    pub fn summary(&self) -> TaskSummary {
        TaskSummary::from_tasks(&self.tasks)
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn into_repository(self) -> R {
        self.repo
    }

    /// Registers a callback run after every state transition.
    pub fn subscribe(&mut self, listener: impl FnMut(StateView<'_>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Reloads the full task list from the repository.
    pub fn refresh(&mut self) {
        self.begin();
        match self.repo.list_all() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.loading = false;
                self.notify();
            }
            Err(err) => self.fail("task_refresh", &err, LOAD_FALLBACK),
        }
    }

    /// Inserts a new open task with trimmed `text`, then refreshes.
    ///
    /// Blank text records a validation error without calling the repository.
    pub fn create(&mut self, text: &str) {
        let Some(text) = non_blank(text) else {
            self.reject_blank("task_create");
            return;
        };

        self.begin();
        match self.repo.insert(&NewTask::new(text, now_epoch_ms())) {
            Ok(id) => {
                info!("event=task_create module=state status=ok id={id}");
                self.refresh();
            }
            Err(err) => self.fail("task_create", &err, ADD_FALLBACK),
        }
    }

    /// Flips `completed` for a task found in the current in-memory list.
    ///
    /// The lookup uses the cached list, not the repository.
    pub fn toggle_completion(&mut self, id: TaskId) {
        self.begin();
        let Some(completed) = self
            .tasks
            .iter()
            .find(|task| task.id == id)
            .map(|task| task.completed)
        else {
            self.set_error("task_toggle", TaskError::not_found(TASK_NOT_FOUND_MESSAGE));
            return;
        };

        match self.repo.update(id, &TaskPatch::completed(!completed)) {
            Ok(()) => {
                info!(
                    "event=task_toggle module=state status=ok id={id} completed={}",
                    !completed
                );
                self.refresh();
            }
            Err(err) => self.fail("task_toggle", &err, TOGGLE_FALLBACK),
        }
    }

    /// Replaces a task's text with trimmed `text`, then refreshes.
    pub fn rename(&mut self, id: TaskId, text: &str) {
        let Some(text) = non_blank(text) else {
            self.reject_blank("task_rename");
            return;
        };

        self.begin();
        match self.repo.update(id, &TaskPatch::text(text)) {
            Ok(()) => {
                info!("event=task_rename module=state status=ok id={id}");
                self.refresh();
            }
            Err(err) => self.fail("task_rename", &err, UPDATE_FALLBACK),
        }
    }

    /// Deletes a task, then refreshes. Missing ids are not an error.
    pub fn remove(&mut self, id: TaskId) {
        self.begin();
        match self.repo.remove(id) {
            Ok(()) => {
                info!("event=task_remove module=state status=ok id={id}");
                self.refresh();
            }
            Err(err) => self.fail("task_remove", &err, DELETE_FALLBACK),
        }
    }

    /// Deletes every task. The list is emptied without a reload.
    pub fn clear_all(&mut self) {
        self.begin();
        match self.repo.clear() {
            Ok(()) => {
                info!("event=task_clear module=state status=ok");
                self.tasks.clear();
                self.loading = false;
                self.notify();
            }
            Err(err) => self.fail("task_clear", &err, CLEAR_FALLBACK),
        }
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.notify();
    }

    fn reject_blank(&mut self, event: &str) {
        let error = TaskError::validation(TaskValidationError::EmptyText.to_string());
        self.set_error(event, error);
    }

    fn fail(&mut self, event: &str, err: &RepoError, fallback: &str) {
        self.set_error(event, TaskError::from_repo(err, fallback));
    }

    fn set_error(&mut self, event: &str, error: TaskError) {
        warn!(
            "event={event} module=state status=error error_kind={}",
            error.kind.as_str()
        );
        self.error = Some(error);
        self.loading = false;
        self.notify();
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }

        let mut listeners = std::mem::take(&mut self.listeners);
        let view = StateView {
            tasks: &self.tasks,
            loading: self.loading,
            error: self.error.as_ref(),
        };
        for listener in &mut listeners {
            listener(view);
        }
        self.listeners = listeners;
    }
}

fn non_blank(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

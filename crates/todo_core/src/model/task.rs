//! Task domain model.
//!
//! # Responsibility
//! - Define the persisted `Task` record and the `NewTask`/`TaskPatch` inputs.
//! - Validate text and timestamp invariants before persistence.
//! - Apply partial updates with merge semantics.
//!
//! # Invariants
//! - `text` is non-empty after trimming.
//! - `created_at` is immutable; `updated_at >= created_at`.
//! - `id` cannot be changed through a patch.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Store-assigned task identifier.
pub type TaskId = i64;

/// Persisted to-do item.
///
/// Serialized with camelCase keys (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds, set once at creation.
    pub created_at: i64,
    /// Unix epoch milliseconds, bumped by every mutation.
    pub updated_at: i64,
}

/// Task shape accepted by insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub text: String,
    pub completed: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Partial field update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

/// Validation errors for task invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyText,
    TimestampOrder { created_at: i64, updated_at: i64 },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "Todo text cannot be empty"),
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at ({updated_at}) must not be earlier than created_at ({created_at})"
            ),
        }
    }
}

impl Error for TaskValidationError {}

impl NewTask {
    /// Creates an open task with both timestamps set to `now_ms`.
    pub fn new(text: impl Into<String>, now_ms: i64) -> Self {
        Self {
            text: text.into(),
            completed: false,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.text, self.created_at, self.updated_at)
    }
}

impl Task {
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.text, self.created_at, self.updated_at)
    }

    /// Merges `patch` onto this task and bumps `updated_at`.
    ///
    /// `updated_at` becomes `now_ms`, or one past the previous value when the
    /// clock has not advanced, so each mutation strictly increases it.
    pub fn apply_patch(&mut self, patch: &TaskPatch, now_ms: i64) {
        if let Some(text) = &patch.text {
            self.text = text.clone();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now_ms.max(self.updated_at.saturating_add(1));
    }
}

impl TaskPatch {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            text: None,
            completed: Some(completed),
        }
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Clocks set before the epoch read as `0`.
pub fn now_epoch_ms() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    i64::try_from(elapsed).unwrap_or(i64::MAX)
}

fn validate_fields(text: &str, created_at: i64, updated_at: i64) -> Result<(), TaskValidationError> {
    if text.trim().is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    if updated_at < created_at {
        return Err(TaskValidationError::TimestampOrder {
            created_at,
            updated_at,
        });
    }
    Ok(())
}

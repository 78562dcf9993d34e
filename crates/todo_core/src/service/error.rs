//! Front-end facing error type for task state operations.

use crate::repo::task_repo::RepoError;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Closed classification of state operation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input rejected before any store call.
    Validation,
    /// Target task missing from the cache or the store.
    NotFound,
    /// Underlying storage unavailable, failing or holding invalid data.
    StorageFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::StorageFailure => "storage_failure",
        }
    }
}

/// Failure recorded by the task state container.
///
/// `message` is always human-readable and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskError {
    pub kind: ErrorKind,
    pub message: String,
}

impl TaskError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Classifies a repository error, using `fallback` when it has no message.
    pub fn from_repo(err: &RepoError, fallback: &str) -> Self {
        let kind = match err {
            RepoError::Validation(_) => ErrorKind::Validation,
            RepoError::NotFound(_) => ErrorKind::NotFound,
            RepoError::Db(_) | RepoError::InvalidData(_) | RepoError::Storage(_) => {
                ErrorKind::StorageFailure
            }
        };
        let message = err.to_string();
        if message.trim().is_empty() {
            Self::new(kind, fallback)
        } else {
            Self::new(kind, message)
        }
    }
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for TaskError {}

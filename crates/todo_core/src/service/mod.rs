//! Core use-case services.
//!
//! # Responsibility
//! - Mediate between front-end actions and the task repository.
//! - Keep front ends decoupled from storage details and error types.

pub mod error;
pub mod task_state;

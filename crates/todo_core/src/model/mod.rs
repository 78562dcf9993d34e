//! Domain model for the to-do list.
//!
//! # Responsibility
//! - Define the task record and its insert/patch shapes.
//! - Provide derived, non-persisted projections (summary counts).
//!
//! # Invariants
//! - Every persisted task has a store-assigned `TaskId`.
//! - `updated_at >= created_at` for every task.

pub mod summary;
pub mod task;

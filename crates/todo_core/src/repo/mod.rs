//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the task record store contract.
//! - Isolate SQLite query details from state orchestration.
//!
//! # Invariants
//! - Repository writes validate task invariants before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod task_repo;

//! Domain model for the task list.
//!
//! # Responsibility
//! - Define the canonical task record used by core business logic.
//! - Keep input normalization rules next to the data they protect.
//!
//! # Invariants
//! - Every persisted task is identified by a stable `TaskId`.
//! - Deletion is hard removal; there is no tombstone state.

pub mod task;

//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for task CRUD and observation.
//! - Delegate 1:1 to the store implementation.
//!
//! # Invariants
//! - No independent state, no caching, no error translation: store failures
//!   propagate unchanged.

use crate::model::task::{Task, TaskId};
use crate::store::task_store::{StoreResult, TaskStore};
use tokio::sync::watch;

/// Pass-through facade over a [`TaskStore`] implementation.
///
/// Exists so the store backing (SQLite, in-memory fixture) can change without
/// affecting callers.
pub struct TaskService<S: TaskStore> {
    store: S,
}

impl<S: TaskStore> TaskService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Subscribes to the live collection stream.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.store.subscribe()
    }

    /// Gets one task by id; absent is `Ok(None)`.
    pub fn get_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.store.get_by_id(id)
    }

    /// Persists a new task, returning the store-assigned id.
    pub fn insert(&self, task: &Task) -> StoreResult<TaskId> {
        self.store.insert(task)
    }

    /// Replaces the stored record matching the task's id.
    pub fn update(&self, task: &Task) -> StoreResult<()> {
        self.store.update(task)
    }

    /// Removes the record matching the task's id.
    pub fn delete(&self, task: &Task) -> StoreResult<()> {
        self.store.delete(task)
    }
}

//! Task list state controller.
//!
//! # Responsibility
//! - Mirror the store's latest emission into a UI-facing cached snapshot.
//! - Turn add/edit/toggle/delete intents into service calls.
//!
//! # Invariants
//! - The snapshot transitions only by wholesale replacement with a store
//!   emission; there is no incremental diffing.
//! - A degraded stream leaves the controller on an empty collection, never a
//!   dead subscription.

use crate::model::task::{Task, TaskId};
use crate::service::task_service::TaskService;
use crate::store::task_store::{StoreResult, TaskStore};
use log::debug;
use tokio::sync::watch;

/// View-model-style bridge between the store and the rendering layer.
///
/// Mutation methods return results the caller is free to ignore; nothing is
/// swallowed here.
pub struct TasksController<S: TaskStore> {
    service: TaskService<S>,
    tasks_rx: watch::Receiver<Vec<Task>>,
    current_tasks: Vec<Task>,
}

impl<S: TaskStore> TasksController<S> {
    /// Creates a controller subscribed to the service's collection stream.
    ///
    /// The cached snapshot starts at whatever the stream currently holds,
    /// which is the empty collection for a fresh or degraded store.
    pub fn new(service: TaskService<S>) -> Self {
        let mut tasks_rx = service.subscribe();
        let current_tasks = tasks_rx.borrow_and_update().clone();
        Self {
            service,
            tasks_rx,
            current_tasks,
        }
    }

    /// Read-only view of the cached snapshot.
    pub fn tasks(&self) -> &[Task] {
        &self.current_tasks
    }

    /// Applies the latest stream emission to the cached snapshot.
    ///
    /// Returns whether the snapshot was replaced. A closed publisher keeps
    /// the last snapshot in place: subscription teardown stops delivery, it
    /// does not erase state.
    pub fn refresh(&mut self) -> bool {
        match self.tasks_rx.has_changed() {
            Ok(true) => {
                self.current_tasks = self.tasks_rx.borrow_and_update().clone();
                true
            }
            Ok(false) => false,
            Err(_) => {
                debug!("event=task_refresh module=controller status=skip reason=publisher_gone");
                false
            }
        }
    }

    /// Creates a new task from raw intent input.
    ///
    /// Blank descriptions are normalized to absent. The title is forwarded
    /// as-is: suppression of blank titles happens at the intent boundary
    /// before this call, not here.
    pub fn add_task(&mut self, title: &str, description: Option<&str>) -> StoreResult<TaskId> {
        let task = Task::new(title, description);
        let id = self.service.insert(&task)?;
        self.refresh();
        Ok(id)
    }

    /// Forwards a full record (including unchanged `is_completed`) to the
    /// store.
    pub fn update_task(&mut self, task: &Task) -> StoreResult<()> {
        self.service.update(task)?;
        self.refresh();
        Ok(())
    }

    /// Persists a copy of the given task with the completion flag flipped.
    ///
    /// The caller-supplied value is the base, so a toggle racing a concurrent
    /// edit is last-write-wins on whichever record the caller held.
    pub fn toggle_task_completed(&mut self, task: &Task) -> StoreResult<()> {
        self.update_task(&task.toggled())
    }

    /// Removes the given task from the store.
    pub fn delete_task(&mut self, task: &Task) -> StoreResult<()> {
        self.service.delete(task)?;
        self.refresh();
        Ok(())
    }
}

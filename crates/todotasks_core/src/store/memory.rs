//! In-memory task store fixture.
//!
//! # Responsibility
//! - Mirror the production store contract without a persistent medium.
//! - Let tests inject storage unavailability to exercise recovery paths.
//!
//! # Invariants
//! - Id allocation is monotonic; deleted ids are never handed out again.
//! - Publish discipline matches [`SqliteTaskStore`]: full snapshot after
//!   every mutation, empty snapshot when the medium is marked unavailable.
//!
//! [`SqliteTaskStore`]: crate::store::task_store::SqliteTaskStore

use crate::model::task::{Task, TaskId};
use crate::store::task_store::{StoreError, StoreResult, TaskStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::watch;

struct MemoryState {
    tasks: Vec<Task>,
    next_id: TaskId,
}

/// Trait-compatible in-memory store for tests and previews.
pub struct MemoryTaskStore {
    state: Mutex<MemoryState>,
    tasks_tx: watch::Sender<Vec<Task>>,
    available: AtomicBool,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        let (tasks_tx, _) = watch::channel(Vec::new());
        Self {
            state: Mutex::new(MemoryState {
                tasks: Vec::new(),
                next_id: 1,
            }),
            tasks_tx,
            available: AtomicBool::new(true),
        }
    }

    /// Marks the backing medium unavailable (or available again).
    ///
    /// While unavailable every operation fails with
    /// [`StoreError::Unavailable`] and the stream holds an empty snapshot,
    /// matching the production recovery policy.
    pub fn fail_storage(&self, failed: bool) {
        self.available.store(!failed, Ordering::SeqCst);
        if failed {
            self.tasks_tx.send_replace(Vec::new());
        } else {
            self.publish();
        }
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "in-memory medium marked unavailable".to_string(),
            ))
        }
    }

    fn publish(&self) {
        let snapshot = match self.state.lock() {
            Ok(state) => state.tasks.clone(),
            Err(_) => Vec::new(),
        };
        self.tasks_tx.send_replace(snapshot);
    }

    fn lock_state(&self) -> StoreResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("in-memory state poisoned".to_string()))
    }
}

impl Default for MemoryTaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore for MemoryTaskStore {
    fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks_tx.subscribe()
    }

    fn get_by_id(&self, id: TaskId) -> StoreResult<Option<Task>> {
        self.check_available()?;
        let state = self.lock_state()?;
        Ok(state
            .tasks
            .iter()
            .find(|task| task.id == Some(id))
            .cloned())
    }

    fn insert(&self, task: &Task) -> StoreResult<TaskId> {
        self.check_available()?;
        let id = {
            let mut state = self.lock_state()?;
            let id = state.next_id;
            state.next_id += 1;
            let mut stored = task.clone();
            stored.id = Some(id);
            state.tasks.push(stored);
            id
        };
        self.publish();
        Ok(id)
    }

    fn update(&self, task: &Task) -> StoreResult<()> {
        self.check_available()?;
        if let Some(id) = task.id {
            let mut state = self.lock_state()?;
            if let Some(slot) = state.tasks.iter_mut().find(|stored| stored.id == Some(id)) {
                *slot = task.clone();
            }
        }
        self.publish();
        Ok(())
    }

    fn delete(&self, task: &Task) -> StoreResult<()> {
        self.check_available()?;
        if let Some(id) = task.id {
            let mut state = self.lock_state()?;
            state.tasks.retain(|stored| stored.id != Some(id));
        }
        self.publish();
        Ok(())
    }
}

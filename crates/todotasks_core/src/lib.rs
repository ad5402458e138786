//! Core domain logic for ToDoTasks.
//! This crate is the single source of truth for task persistence invariants.

pub mod controller;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use controller::intent::{submit_task_form, TaskForm};
pub use controller::tasks_controller::TasksController;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{is_blank_title, normalize_description, Task, TaskId};
pub use service::task_service::TaskService;
pub use store::memory::MemoryTaskStore;
pub use store::task_store::{SqliteTaskStore, StoreError, StoreResult, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

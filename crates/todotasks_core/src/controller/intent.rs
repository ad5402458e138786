//! UI-intent boundary for the add/edit task form.
//!
//! # Responsibility
//! - Route one form to either an add or an edit, selected by the presence of
//!   an existing task.
//! - Drop blank-title submissions before any store call is made.
//!
//! # Invariants
//! - A blank title never produces a store call; the intent is dropped
//!   silently, not erred.
//! - Edits preserve `id` and `is_completed` of the existing task.

use crate::controller::tasks_controller::TasksController;
use crate::model::task::{is_blank_title, Task};
use crate::store::task_store::{StoreResult, TaskStore};
use log::debug;

/// Raw input of the add/edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    /// Title field as typed, unvalidated.
    pub title: String,
    /// Description field as typed; blank means absent.
    pub description: String,
    /// Set when the form edits an existing task instead of adding one.
    pub existing: Option<Task>,
}

impl TaskForm {
    /// Form for creating a new task.
    pub fn add(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            existing: None,
        }
    }

    /// Form for editing an existing task.
    pub fn edit(task: Task, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            existing: Some(task),
        }
    }
}

/// Submits a form through the controller.
///
/// Returns `Ok(false)` when the intent was dropped for a blank title,
/// `Ok(true)` when it was forwarded to the store.
pub fn submit_task_form<S: TaskStore>(
    controller: &mut TasksController<S>,
    form: &TaskForm,
) -> StoreResult<bool> {
    if is_blank_title(&form.title) {
        debug!("event=task_form module=intent status=skip reason=blank_title");
        return Ok(false);
    }

    match &form.existing {
        Some(task) => {
            let updated = task.edited(form.title.as_str(), Some(form.description.as_str()));
            controller.update_task(&updated)?;
        }
        None => {
            controller.add_task(form.title.as_str(), Some(form.description.as_str()))?;
        }
    }

    Ok(true)
}

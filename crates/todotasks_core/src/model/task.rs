//! Task domain model.
//!
//! # Responsibility
//! - Define the single persisted entity and its construction defaults.
//! - Normalize free-text input before it reaches the persistence boundary.
//!
//! # Invariants
//! - `id` is assigned once by the store and never reassigned afterwards.
//! - `description` is `None` rather than an empty or whitespace-only string.
//! - `is_completed` starts `false` and is flipped only via `toggled`.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned by the store on first persist.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = i64;

/// The single persisted entity of the task list.
///
/// `id` is `None` for records that have not been persisted yet; the store
/// assigns it on insert and ignores any value the caller set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned primary key. `None` before first persist.
    #[serde(default)]
    pub id: Option<TaskId>,
    /// Required display title.
    pub title: String,
    /// Optional free-text detail. Never stored as an empty string.
    pub description: Option<String>,
    /// Completion flag, flipped by exactly one operation.
    pub is_completed: bool,
}

impl Task {
    /// Creates an unpersisted task with construction defaults.
    ///
    /// # Invariants
    /// - `id` starts as `None` (store-assigned).
    /// - `description` is normalized: blank input becomes `None`.
    /// - `is_completed` starts as `false`.
    pub fn new(title: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: normalize_description(description),
            is_completed: false,
        }
    }

    /// Returns a copy with the completion flag flipped.
    ///
    /// The copy is based on this value, not a re-fetch, so a toggle racing a
    /// concurrent edit is last-write-wins on whichever value the caller held.
    pub fn toggled(&self) -> Self {
        Self {
            is_completed: !self.is_completed,
            ..self.clone()
        }
    }

    /// Returns a copy with new title/description, preserving `id` and
    /// `is_completed`.
    pub fn edited(&self, title: impl Into<String>, description: Option<&str>) -> Self {
        Self {
            id: self.id,
            title: title.into(),
            description: normalize_description(description),
            is_completed: self.is_completed,
        }
    }
}

/// Normalizes optional free-text input: blank or whitespace-only becomes
/// `None`, everything else is kept verbatim.
pub fn normalize_description(description: Option<&str>) -> Option<String> {
    match description {
        Some(value) if !value.trim().is_empty() => Some(value.to_string()),
        _ => None,
    }
}

/// Returns whether a title is blank under the intent-boundary rule.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}

//! UI-facing state controller and intent boundary.
//!
//! # Responsibility
//! - Hold the cached task snapshot the rendering layer reads from.
//! - Translate user intents into service calls.
//!
//! # Invariants
//! - The cached snapshot is read-only for callers; every change round-trips
//!   through the store.
//! - Blank-title suppression lives in the intent boundary, not in the
//!   controller.

pub mod intent;
pub mod tasks_controller;

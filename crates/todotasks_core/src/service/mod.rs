//! Core use-case services.
//!
//! # Responsibility
//! - Present a stable seam between callers and the persistence boundary.
//! - Keep UI layers decoupled from storage details.

pub mod task_service;

//! Task persistence boundary.
//!
//! # Responsibility
//! - Own the authoritative task collection and its observation stream.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Every mutation re-emits the full current collection to subscribers.
//! - The observation stream degrades to an empty snapshot on read failure
//!   instead of terminating.

pub mod memory;
pub mod task_store;

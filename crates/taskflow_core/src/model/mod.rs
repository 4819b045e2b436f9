//! Task domain model.
//!
//! # Responsibility
//! - Define the task record, its variants and the ordered task container.
//! - Keep the persisted line format next to the type it encodes.
//!
//! # Invariants
//! - Every task is owned by exactly one `TaskList`.
//! - User-facing indices are 1-based; storage inside `TaskList` is 0-based.

pub mod task;
pub mod task_list;

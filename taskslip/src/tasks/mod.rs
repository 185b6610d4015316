//! Ordered task list persisted to a local snapshot file.
//!
//! Tasks are plain strings identified only by their position. Callers must
//! re-resolve indices against a freshly loaded list before every mutation;
//! an index from an earlier load may point at a different task.

pub mod store;

pub use store::TaskStore;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors that can occur during task operations.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task text is empty after trimming whitespace.
    #[error("task text cannot be empty")]
    EmptyInput,
    /// Index does not refer to an existing task.
    #[error("task index {index} out of range (list has {len} tasks)")]
    IndexOutOfRange {
        /// Index that was requested.
        index: usize,
        /// Length of the list at the time of the request.
        len: usize,
    },
    /// The task snapshot could not be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl TaskError {
    /// Returns `true` if the task snapshot exists but could not be parsed.
    #[must_use]
    pub const fn is_corrupt(&self) -> bool {
        matches!(self, Self::Storage(e) if e.is_corrupt())
    }
}

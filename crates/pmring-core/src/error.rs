//! Error types for the pmring submission layer

use core::fmt;

use crate::state::TaskState;

/// Result type for ring operations
pub type RingResult<T> = Result<T, RingError>;

/// Errors that can occur in ring/queue/task operations
///
/// All failures surface synchronously; nothing here is retried internally.
/// Retry policy belongs to whatever drives the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    /// Allocation failed (queue node or backing pool)
    NoMemory,

    /// Pop or peek on an empty queue
    Empty,

    /// Task is in the wrong state for the requested transition,
    /// e.g. destroying or re-starting an ongoing task
    InvalidState(TaskState),

    /// Operation on a torn-down or never-initialized handle
    Null,
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::NoMemory => write!(f, "allocation failed"),
            RingError::Empty => write!(f, "queue empty"),
            RingError::InvalidState(s) => write!(f, "invalid task state: {}", s),
            RingError::Null => write!(f, "handle is torn down or uninitialized"),
        }
    }
}

impl std::error::Error for RingError {}

//! I/O kind and task state types

use core::fmt;

/// Kind of a queued I/O operation
///
/// Each kind has its own pending queue on the controller so that a
/// drainer can apply per-class policy (e.g. flush before write) without
/// scanning a mixed queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum IoKind {
    /// Append bytes at the submission-time offset
    Write = 0,

    /// Read bytes from the submission-time offset
    Read = 1,

    /// Make previously written bytes durable on the medium
    Flush = 2,
}

impl IoKind {
    /// Number of kinds (one pending queue per kind)
    pub const COUNT: usize = 3;

    /// Label used for queue diagnostics
    pub const fn label(&self) -> &'static str {
        match self {
            IoKind::Write => "wr",
            IoKind::Read => "rd",
            IoKind::Flush => "fl",
        }
    }
}

impl From<u8> for IoKind {
    fn from(v: u8) -> Self {
        match v {
            0 => IoKind::Write,
            1 => IoKind::Read,
            _ => IoKind::Flush,
        }
    }
}

impl From<IoKind> for u8 {
    fn from(kind: IoKind) -> u8 {
        kind as u8
    }
}

impl fmt::Display for IoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoKind::Write => write!(f, "WRITE"),
            IoKind::Read => write!(f, "READ"),
            IoKind::Flush => write!(f, "FLUSH"),
        }
    }
}

/// Lifecycle state of a queued task
///
/// Transitions: `Ready` → `Ongoing` → `Success` | `Failed`.
/// The submission layer creates tasks `Ready`; an executor moves them
/// through the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TaskState {
    /// Queued, not yet picked up by an executor
    Ready = 0,

    /// An executor is working on it; cannot be destroyed
    Ongoing = 1,

    /// Terminal: completed
    Success = 2,

    /// Terminal: executor reported failure
    Failed = 3,
}

impl TaskState {
    /// Check if this state is terminal (executor finished)
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Success | TaskState::Failed)
    }

    /// Check if a task in this state may be destroyed
    ///
    /// Everything but `Ongoing`: a task under execution is retained.
    #[inline]
    pub const fn is_destroyable(&self) -> bool {
        !matches!(self, TaskState::Ongoing)
    }
}

impl From<u8> for TaskState {
    fn from(v: u8) -> Self {
        match v {
            0 => TaskState::Ready,
            1 => TaskState::Ongoing,
            2 => TaskState::Success,
            3 => TaskState::Failed,
            _ => TaskState::Ready, // Default for invalid values
        }
    }
}

impl From<TaskState> for u8 {
    fn from(state: TaskState) -> u8 {
        state as u8
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Ready => write!(f, "READY"),
            TaskState::Ongoing => write!(f, "ONGOING"),
            TaskState::Success => write!(f, "SUCCESS"),
            TaskState::Failed => write!(f, "FAILED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_predicates() {
        assert!(!TaskState::Ready.is_terminal());
        assert!(!TaskState::Ongoing.is_terminal());
        assert!(TaskState::Success.is_terminal());
        assert!(TaskState::Failed.is_terminal());

        assert!(TaskState::Ready.is_destroyable());
        assert!(!TaskState::Ongoing.is_destroyable());
        assert!(TaskState::Success.is_destroyable());
        assert!(TaskState::Failed.is_destroyable());
    }

    #[test]
    fn test_state_roundtrip() {
        for s in [
            TaskState::Ready,
            TaskState::Ongoing,
            TaskState::Success,
            TaskState::Failed,
        ] {
            let raw: u8 = s.into();
            assert_eq!(TaskState::from(raw), s);
        }
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(IoKind::Write.label(), "wr");
        assert_eq!(IoKind::Read.label(), "rd");
        assert_eq!(IoKind::Flush.label(), "fl");
        assert_eq!(format!("{}", IoKind::Flush), "FLUSH");
    }
}

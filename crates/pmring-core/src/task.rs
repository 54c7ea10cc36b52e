//! The per-operation I/O task and its lifecycle
//!
//! A task is built by the controller at submission time with the kind,
//! the submission-time logical offset, and the request size. It starts
//! `Ready` and is owned by whichever queue currently holds it; ownership
//! transfers to the drainer on pop. Moving bytes is not this layer's job:
//! the execute/completion hooks are seams for an executor, never invoked
//! here.

use core::fmt;

use crate::error::{RingError, RingResult};
use crate::state::{IoKind, TaskState};

/// Hook invoked by an executor with the task it is working on
pub type TaskHook = Box<dyn FnMut(&mut IoTask) + Send>;

/// One pending I/O operation
pub struct IoTask {
    kind: IoKind,
    state: TaskState,

    /// Logical position snapshotted at submission, monotonically
    /// non-decreasing per queue; wraparound into the physical pool is
    /// the executor's concern
    offset: u64,

    /// Requested byte count
    size: usize,

    /// Caller-supplied bytes for a write (empty for read/flush)
    data: Option<Box<[u8]>>,

    /// Executor seam: performs the byte-level effect
    execute: Option<TaskHook>,

    /// Executor seam: fired after the task reaches a terminal state
    callback: Option<TaskHook>,
}

impl IoTask {
    /// Build a `Ready` task with no data and no hooks
    pub fn new(kind: IoKind, offset: u64, size: usize) -> Self {
        IoTask {
            kind,
            state: TaskState::Ready,
            offset,
            size,
            data: None,
            execute: None,
            callback: None,
        }
    }

    /// Attach the caller's payload bytes
    pub fn with_data(mut self, data: Box<[u8]>) -> Self {
        self.data = Some(data);
        self
    }

    /// Install the execute hook (executor seam)
    pub fn with_execute(mut self, hook: TaskHook) -> Self {
        self.execute = Some(hook);
        self
    }

    /// Install the completion hook (executor seam)
    pub fn with_callback(mut self, hook: TaskHook) -> Self {
        self.callback = Some(hook);
        self
    }

    #[inline]
    pub fn kind(&self) -> IoKind {
        self.kind
    }

    #[inline]
    pub fn state(&self) -> TaskState {
        self.state
    }

    #[inline]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Borrow the caller's payload bytes, if any
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Mark the task as picked up by an executor
    ///
    /// Legal only from `Ready`. Once ongoing the task cannot be
    /// cancelled or destroyed.
    pub fn begin(&mut self) -> RingResult<()> {
        if self.state != TaskState::Ready {
            return Err(RingError::InvalidState(self.state));
        }
        self.state = TaskState::Ongoing;
        Ok(())
    }

    /// Record the executor's outcome
    ///
    /// Legal only from `Ongoing`; moves to `Success` or `Failed`.
    pub fn complete(&mut self, ok: bool) -> RingResult<()> {
        if self.state != TaskState::Ongoing {
            return Err(RingError::InvalidState(self.state));
        }
        self.state = if ok {
            TaskState::Success
        } else {
            TaskState::Failed
        };
        Ok(())
    }

    /// Take the execute hook, leaving `None` behind (executor side)
    pub fn take_execute(&mut self) -> Option<TaskHook> {
        self.execute.take()
    }

    /// Take the completion hook, leaving `None` behind (executor side)
    pub fn take_callback(&mut self) -> Option<TaskHook> {
        self.callback.take()
    }

    /// Destroy the task, releasing data and hooks
    ///
    /// Refused while `Ongoing`: the task is handed back intact so the
    /// executor can finish with it. Ownership makes double-destroy
    /// unrepresentable.
    pub fn destroy(self) -> Result<(), IoTask> {
        if self.state == TaskState::Ongoing {
            crate::rb_warn!("refusing to destroy ongoing {} task at offset {}", self.kind, self.offset);
            return Err(self);
        }
        Ok(())
    }
}

impl fmt::Debug for IoTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IoTask")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("offset", &self.offset)
            .field("size", &self.size)
            .field("data_len", &self.data.as_ref().map(|d| d.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_is_ready() {
        let task = IoTask::new(IoKind::Write, 0, 128);
        assert_eq!(task.state(), TaskState::Ready);
        assert_eq!(task.kind(), IoKind::Write);
        assert_eq!(task.offset(), 0);
        assert_eq!(task.size(), 128);
        assert!(task.data().is_none());
    }

    #[test]
    fn test_lifecycle_happy_path() {
        let mut task = IoTask::new(IoKind::Read, 64, 32);
        task.begin().unwrap();
        assert_eq!(task.state(), TaskState::Ongoing);
        task.complete(true).unwrap();
        assert_eq!(task.state(), TaskState::Success);
        assert!(task.destroy().is_ok());
    }

    #[test]
    fn test_failed_outcome() {
        let mut task = IoTask::new(IoKind::Flush, 0, 0);
        task.begin().unwrap();
        task.complete(false).unwrap();
        assert_eq!(task.state(), TaskState::Failed);
        assert!(task.destroy().is_ok());
    }

    #[test]
    fn test_illegal_transitions() {
        let mut task = IoTask::new(IoKind::Write, 0, 8);

        // complete before begin
        assert_eq!(
            task.complete(true),
            Err(RingError::InvalidState(TaskState::Ready))
        );

        task.begin().unwrap();
        // begin twice
        assert_eq!(
            task.begin(),
            Err(RingError::InvalidState(TaskState::Ongoing))
        );
    }

    #[test]
    fn test_destroy_refused_while_ongoing() {
        let mut task = IoTask::new(IoKind::Write, 0, 8);
        task.begin().unwrap();

        // Handed back intact
        let mut task = task.destroy().unwrap_err();
        assert_eq!(task.state(), TaskState::Ongoing);

        // Destroyable from both terminal states and from Ready
        task.complete(true).unwrap();
        assert!(task.destroy().is_ok());

        let ready = IoTask::new(IoKind::Read, 0, 8);
        assert!(ready.destroy().is_ok());
    }

    #[test]
    fn test_data_attachment() {
        let task = IoTask::new(IoKind::Write, 0, 4).with_data(vec![1, 2, 3, 4].into_boxed_slice());
        assert_eq!(task.data(), Some(&[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn test_hooks_are_held_not_invoked() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let fired = Arc::new(AtomicBool::new(false));
        let fired2 = Arc::clone(&fired);

        let mut task = IoTask::new(IoKind::Write, 0, 4)
            .with_execute(Box::new(move |_| fired2.store(true, Ordering::Relaxed)));

        // The submission layer never runs the hook
        assert!(!fired.load(Ordering::Relaxed));

        // An executor would take and run it
        let mut hook = task.take_execute().unwrap();
        hook(&mut task);
        assert!(fired.load(Ordering::Relaxed));
        assert!(task.take_execute().is_none());
    }
}

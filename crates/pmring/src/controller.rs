//! Submission controller: one ring, three pending queues
//!
//! The controller is the producer-facing surface. A submit call
//! snapshots the ring's current logical offset, builds a `Ready` task
//! of the matching kind, and appends it to that kind's queue. Three
//! independent queues (rather than one tagged queue) let a drainer
//! apply per-class policy, e.g. always drain flush before write,
//! without scanning a mixed queue.
//!
//! One thread submits, one thread drains. Queue structure access goes
//! through a short-held spinlock; occupancy observers only ever hold it
//! for a counter read.

use pmring_core::error::{RingError, RingResult};
use pmring_core::queue::FifoQueue;
use pmring_core::spinlock::SpinLock;
use pmring_core::state::IoKind;
use pmring_core::task::IoTask;
use pmring_core::traits::IoSubmit;
use pmring_core::{rb_debug, rb_info};

use crate::config::RingConfig;
use crate::geometry::RingBuffer;

/// Live controller state; dropped as a unit on teardown
struct Inner {
    ring: RingBuffer,

    /// Pending queues, indexed by `IoKind`
    queues: [SpinLock<FifoQueue<IoTask>>; IoKind::COUNT],
}

/// Controller owning one ring buffer and its three pending queues
pub struct RingController {
    inner: Option<Inner>,
}

impl RingController {
    /// Build a controller: pool allocation plus three empty queues
    ///
    /// Fails with `NoMemory` if the pool cannot be allocated; everything
    /// built so far unwinds by ownership, nothing leaks.
    pub fn new(config: RingConfig) -> RingResult<Self> {
        let ring = RingBuffer::new(config.capacity, &config.name)?;
        rb_info!(
            "controller up: ring '{}', {} bytes",
            ring.name(),
            ring.capacity()
        );

        Ok(RingController {
            inner: Some(Inner {
                ring,
                queues: [
                    SpinLock::new(FifoQueue::new()),
                    SpinLock::new(FifoQueue::new()),
                    SpinLock::new(FifoQueue::new()),
                ],
            }),
        })
    }

    fn live(&self) -> RingResult<&Inner> {
        self.inner.as_ref().ok_or(RingError::Null)
    }

    /// Snapshot the offset, build the task, enqueue it
    fn submit(&self, kind: IoKind, size: usize, data: Option<&[u8]>) -> RingResult<()> {
        let inner = self.live()?;

        let offset = inner.ring.current_offset();
        let mut task = IoTask::new(kind, offset, size);
        if let Some(bytes) = data {
            let mut owned = Vec::new();
            owned
                .try_reserve_exact(bytes.len())
                .map_err(|_| RingError::NoMemory)?;
            owned.extend_from_slice(bytes);
            task = task.with_data(owned.into_boxed_slice());
        }

        // On push failure the task is dropped inside push; nothing else
        // has changed, so the request just vanishes with the error.
        inner.queues[kind as usize].lock().push(task)?;

        rb_debug!("queued {} size {} at offset {}", kind, size, offset);
        Ok(())
    }

    /// Pending-task count for one kind (observer-safe)
    pub fn pending(&self, kind: IoKind) -> RingResult<usize> {
        Ok(self.live()?.queues[kind as usize].lock().len())
    }

    /// Pending writes (observer-safe; 0 after teardown)
    pub fn write_pending(&self) -> usize {
        self.pending(IoKind::Write).unwrap_or(0)
    }

    /// Pending reads (observer-safe; 0 after teardown)
    pub fn read_pending(&self) -> usize {
        self.pending(IoKind::Read).unwrap_or(0)
    }

    /// Pending flushes (observer-safe; 0 after teardown)
    pub fn flush_pending(&self) -> usize {
        self.pending(IoKind::Flush).unwrap_or(0)
    }

    /// Pop the oldest pending task of one kind (drainer side)
    ///
    /// Ownership of the task moves to the caller. `Empty` when that
    /// queue has nothing pending, `Null` after teardown.
    pub fn take_next(&self, kind: IoKind) -> RingResult<IoTask> {
        self.live()?.queues[kind as usize].lock().pop()
    }

    /// Inspect the oldest pending task of one kind without removing it
    pub fn peek_next<R>(&self, kind: IoKind, f: impl FnOnce(&IoTask) -> R) -> RingResult<R> {
        let inner = self.live()?;
        let queue = inner.queues[kind as usize].lock();
        queue.peek().map(f)
    }

    /// Borrow the ring geometry (cursor observers, executor side)
    pub fn ring(&self) -> RingResult<&RingBuffer> {
        Ok(&self.live()?.ring)
    }

    /// Drain and release the queues and the ring
    ///
    /// Idempotent: a second call finds nothing and is a no-op. Pending
    /// tasks are destroyed; none of them can be `Ongoing`, since an
    /// ongoing task is by definition already popped by its executor.
    pub fn teardown(&mut self) {
        let Some(inner) = self.inner.take() else {
            return;
        };

        for (kind, slot) in inner.queues.into_iter().enumerate() {
            let mut queue = slot.into_inner();
            let mut dropped = 0usize;
            while let Ok(task) = queue.pop() {
                // Destroy can only refuse Ongoing tasks; queued tasks
                // are Ready, so the refusal arm is unreachable here.
                let _ = task.destroy();
                dropped += 1;
            }
            if dropped > 0 {
                rb_debug!(
                    "teardown dropped {} pending {} task(s)",
                    dropped,
                    IoKind::from(kind as u8)
                );
            }
        }

        rb_info!("controller down: ring '{}'", inner.ring.name());
        // inner.ring (pool included) drops here
    }
}

impl IoSubmit for RingController {
    fn submit_write(&self, size: usize, data: &[u8]) -> RingResult<()> {
        self.submit(IoKind::Write, size, Some(data))
    }

    fn submit_read(&self, size: usize) -> RingResult<()> {
        self.submit(IoKind::Read, size, None)
    }

    fn submit_flush(&self, size: usize) -> RingResult<()> {
        self.submit(IoKind::Flush, size, None)
    }
}

impl Drop for RingController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmring_core::state::TaskState;

    fn controller() -> RingController {
        RingController::new(RingConfig::default()).unwrap()
    }

    #[test]
    fn test_submit_targets_own_queue() {
        let ctrl = controller();

        ctrl.submit_write(128, &[0u8; 128]).unwrap();
        assert_eq!(ctrl.write_pending(), 1);
        assert_eq!(ctrl.read_pending(), 0);
        assert_eq!(ctrl.flush_pending(), 0);

        ctrl.submit_read(64).unwrap();
        assert_eq!(ctrl.write_pending(), 1);
        assert_eq!(ctrl.read_pending(), 1);
        assert_eq!(ctrl.flush_pending(), 0);

        ctrl.submit_flush(64).unwrap();
        assert_eq!(ctrl.flush_pending(), 1);
    }

    #[test]
    fn test_offset_snapshot_at_submission() {
        let ctrl = controller();

        ctrl.submit_write(128, &[7u8; 128]).unwrap();
        ctrl.submit_read(64).unwrap();

        // Submission never advances cursors, so both tasks carry the
        // same snapshot
        let wr = ctrl.take_next(IoKind::Write).unwrap();
        let rd = ctrl.take_next(IoKind::Read).unwrap();
        assert_eq!(wr.offset(), rd.offset());
        assert_eq!(wr.offset(), 0);
        assert_eq!(wr.size(), 128);
        assert_eq!(rd.size(), 64);
        assert_eq!(wr.state(), TaskState::Ready);
        assert_eq!(wr.data().map(|d| d.len()), Some(128));
        assert!(rd.data().is_none());
    }

    #[test]
    fn test_snapshot_tracks_tail() {
        let ctrl = controller();

        ctrl.submit_write(16, &[1u8; 16]).unwrap();
        // An executor would advance tail after moving bytes
        ctrl.ring().unwrap().advance_tail(16);
        ctrl.submit_write(16, &[2u8; 16]).unwrap();

        let first = ctrl.take_next(IoKind::Write).unwrap();
        let second = ctrl.take_next(IoKind::Write).unwrap();
        assert_eq!(first.offset(), 0);
        assert_eq!(second.offset(), 16);
    }

    #[test]
    fn test_fifo_within_one_kind() {
        let ctrl = controller();
        for i in 0..10u8 {
            ctrl.submit_write(1, &[i]).unwrap();
        }
        for i in 0..10u8 {
            let task = ctrl.take_next(IoKind::Write).unwrap();
            assert_eq!(task.data(), Some(&[i][..]));
        }
        assert!(matches!(
            ctrl.take_next(IoKind::Write),
            Err(RingError::Empty)
        ));
    }

    #[test]
    fn test_peek_next() {
        let ctrl = controller();
        ctrl.submit_flush(32).unwrap();

        let size = ctrl.peek_next(IoKind::Flush, |t| t.size()).unwrap();
        assert_eq!(size, 32);
        assert_eq!(ctrl.flush_pending(), 1);
    }

    #[test]
    fn test_teardown_idempotent() {
        let mut ctrl = controller();
        ctrl.submit_write(8, &[0u8; 8]).unwrap();
        ctrl.submit_flush(8).unwrap();

        ctrl.teardown();
        ctrl.teardown(); // No-op, must not fault

        assert_eq!(ctrl.submit_read(8), Err(RingError::Null));
        assert!(matches!(ctrl.take_next(IoKind::Read), Err(RingError::Null)));
        assert_eq!(ctrl.write_pending(), 0);
    }

    #[test]
    fn test_spsc_submit_and_drain() {
        use std::sync::Arc;
        use std::thread;

        let ctrl = Arc::new(controller());
        const N: usize = 1000;

        let producer = {
            let ctrl = Arc::clone(&ctrl);
            thread::spawn(move || {
                for i in 0..N {
                    ctrl.submit_write(8, &(i as u64).to_le_bytes()).unwrap();
                }
            })
        };

        // Single drainer, popping in FIFO order while the producer runs
        let drainer = {
            let ctrl = Arc::clone(&ctrl);
            thread::spawn(move || {
                let mut seen = 0u64;
                while seen < N as u64 {
                    match ctrl.take_next(IoKind::Write) {
                        Ok(task) => {
                            let bytes = task.data().unwrap();
                            let v = u64::from_le_bytes(bytes.try_into().unwrap());
                            assert_eq!(v, seen);
                            seen += 1;
                        }
                        Err(RingError::Empty) => std::hint::spin_loop(),
                        Err(e) => panic!("drain failed: {}", e),
                    }
                }
            })
        };

        producer.join().unwrap();
        drainer.join().unwrap();
        assert_eq!(ctrl.write_pending(), 0);
    }
}

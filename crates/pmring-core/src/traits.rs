//! Capability traits for the submission layer
//!
//! The original design carried function-pointer operation tables; here
//! each table is a trait. Components depend on these traits, never on
//! concrete types, so a queue or controller implementation can be swapped
//! without touching its users.

use crate::error::RingResult;
use crate::state::IoKind;
use crate::task::IoTask;

/// FIFO queue capability
///
/// **Contract:**
/// - Pop order equals push order.
/// - `len()` equals the number of held payloads after every operation
///   and is safe to call from observer threads.
/// - `pop()`/`peek()` on an empty queue fail with `Empty` and leave the
///   queue unchanged.
/// - Structure mutation is single-producer/single-consumer; the caller
///   serializes `push` against `pop`.
pub trait Fifo<T> {
    /// Append a payload; ownership moves into the queue.
    fn push(&mut self, payload: T) -> RingResult<()>;

    /// Remove the oldest payload; ownership moves to the caller.
    fn pop(&mut self) -> RingResult<T>;

    /// Borrow the oldest payload without removing it.
    fn peek(&self) -> RingResult<&T>;

    /// Published occupancy.
    fn len(&self) -> usize;

    /// Emptiness via the published occupancy.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Submission capability exposed to the orchestration layer
///
/// **Contract:**
/// - Each submit snapshots the ring's current logical offset, builds a
///   `Ready` task of the matching kind, and enqueues it on that kind's
///   queue only.
/// - On failure the orphaned task is released and the error propagated;
///   no other state changes.
/// - Never blocks; never retries.
pub trait IoSubmit {
    /// Queue a write of `data` at the current logical offset.
    fn submit_write(&self, size: usize, data: &[u8]) -> RingResult<()>;

    /// Queue a read of `size` bytes from the current logical offset.
    fn submit_read(&self, size: usize) -> RingResult<()>;

    /// Queue a flush covering `size` bytes.
    fn submit_flush(&self, size: usize) -> RingResult<()>;
}

/// Contract for the (out-of-scope) execution step
///
/// An executor drains the controller's queues and performs the byte-level
/// effect of each task against the pool. No implementation lives in this
/// workspace; any implementor must honor:
///
/// - Reject a task whose `size` exceeds the pool capacity *before*
///   advancing any cursor — the geometry layer does no bounds checking.
/// - Map the task's monotonic logical offset into the physical pool
///   (wraparound, e.g. `offset % capacity`); cursors themselves keep
///   strictly increasing so they stay usable as ordering keys.
/// - Drive the task `Ready → Ongoing` via `begin()` before touching
///   bytes, and `Ongoing → Success | Failed` via `complete()` after.
/// - Advance `head`/`tail` only by non-negative deltas.
/// - Fire the task's completion hook, if installed, after the terminal
///   transition.
pub trait IoExecutor {
    /// Perform one task's byte-level effect. `kind` is redundant with
    /// `task.kind()` but lets an implementor dispatch without inspection.
    fn execute(&mut self, kind: IoKind, task: &mut IoTask) -> RingResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::FifoQueue;

    // A controller holds any conforming queue; exercise the seam with
    // the default implementation behind the trait.
    fn drain<Q: Fifo<u32>>(q: &mut Q) -> Vec<u32> {
        let mut out = Vec::new();
        while let Ok(v) = q.pop() {
            out.push(v);
        }
        out
    }

    #[test]
    fn test_fifo_via_trait_object() {
        let mut q = FifoQueue::new();
        Fifo::push(&mut q, 1).unwrap();
        Fifo::push(&mut q, 2).unwrap();
        Fifo::push(&mut q, 3).unwrap();

        assert_eq!(Fifo::len(&q), 3);
        assert_eq!(drain(&mut q), vec![1, 2, 3]);
        assert!(Fifo::is_empty(&q));
    }
}

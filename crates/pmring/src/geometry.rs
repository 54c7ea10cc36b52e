//! Ring-buffer geometry: cursors and the backing pool
//!
//! A pure cursor/lock primitive, not a safety boundary. Cursors are
//! logical sequence numbers that only ever grow; mapping them back into
//! the fixed-size pool (wraparound) belongs to the executor, which is
//! also the layer that must reject over-capacity requests before any
//! cursor moves. Keeping the cursors monotonic makes the submission-time
//! offset usable as an ordering key across the pending queues.

use pmring_core::constants::RING_NAME_LEN;
use pmring_core::error::{RingError, RingResult};
use pmring_core::spinlock::SpinLock;
use pmring_core::rb_debug;

/// Head/tail cursor pair, guarded by one lock
#[derive(Debug, Default, Clone, Copy)]
struct Cursors {
    /// Oldest live byte (consumer side)
    head: u64,

    /// Next logical position (producer side)
    tail: u64,
}

/// Fixed-capacity byte pool with monotonic cursors
///
/// The pool stands in for the persistent medium; on a host without PM
/// it is plain DRAM. Allocated once at construction, never resized.
pub struct RingBuffer {
    name: String,
    capacity: usize,
    cursors: SpinLock<Cursors>,
    pool: Box<[u8]>,
}

impl RingBuffer {
    /// Allocate the pool and zero the cursors
    ///
    /// Fails with `NoMemory` if the pool allocation fails; nothing is
    /// left behind in that case (ownership unwinds the partial build).
    pub fn new(capacity: usize, name: &str) -> RingResult<Self> {
        let mut pool = Vec::new();
        pool.try_reserve_exact(capacity)
            .map_err(|_| RingError::NoMemory)?;
        pool.resize(capacity, 0u8);

        let mut end = name.len().min(RING_NAME_LEN);
        while !name.is_char_boundary(end) {
            end -= 1;
        }

        rb_debug!("ring '{}' initialized, pool {} bytes", &name[..end], capacity);

        Ok(RingBuffer {
            name: name[..end].to_string(),
            capacity,
            cursors: SpinLock::new(Cursors::default()),
            pool: pool.into_boxed_slice(),
        })
    }

    /// Diagnostic name label (at most `RING_NAME_LEN` bytes)
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pool capacity in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Next logical position, snapshotted under the lock
    ///
    /// This is the offset stamped onto tasks at submission time.
    pub fn current_offset(&self) -> u64 {
        self.cursors.lock().tail
    }

    /// Consumer-side cursor
    pub fn head(&self) -> u64 {
        self.cursors.lock().head
    }

    /// Producer-side cursor
    pub fn tail(&self) -> u64 {
        self.cursors.lock().tail
    }

    /// Advance the consumer cursor. No bounds check: over-capacity
    /// deltas are the executor's configuration error to reject.
    pub fn advance_head(&self, delta: u64) {
        self.cursors.lock().head += delta;
    }

    /// Advance the producer cursor
    pub fn advance_tail(&self, delta: u64) {
        self.cursors.lock().tail += delta;
    }

    /// Borrow the backing pool (executor side)
    pub fn pool(&self) -> &[u8] {
        &self.pool
    }

    /// Mutably borrow the backing pool (executor side)
    pub fn pool_mut(&mut self) -> &mut [u8] {
        &mut self.pool
    }
}

impl core::fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let c = *self.cursors.lock();
        f.debug_struct("RingBuffer")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("head", &c.head)
            .field("tail", &c.tail)
            .finish()
    }
}

//! # pmring-core
//!
//! Core types and traits for the pmring queued-submission layer.
//!
//! This crate is platform-agnostic: it knows nothing about the backing
//! medium, only about tasks, queues, and the locking primitive the ring
//! layer builds on. The ring geometry and the submission controller live
//! in the `pmring` crate.
//!
//! ## Modules
//!
//! - `state` - I/O kind and task state enums
//! - `task` - The per-operation task object and its lifecycle
//! - `queue` - Generic FIFO queue of pending tasks
//! - `traits` - Capability traits (queue, submission, executor contract)
//! - `error` - Error types
//! - `spinlock` - Internal spinlock primitive
//! - `rblog` - Kernel-style diagnostic print macros

#![allow(dead_code)]

pub mod error;
pub mod queue;
pub mod rblog;
pub mod spinlock;
pub mod state;
pub mod task;
pub mod traits;

// Re-exports for convenience
pub use error::{RingError, RingResult};
pub use queue::FifoQueue;
pub use spinlock::SpinLock;
pub use state::{IoKind, TaskState};
pub use task::IoTask;
pub use traits::{Fifo, IoExecutor, IoSubmit};

/// Constants shared by the ring layer
pub mod constants {
    /// Default pool capacity in bytes (4 KB)
    pub const DEFAULT_POOL_CAPACITY: usize = 4 * 1024;

    /// Maximum length in bytes of a ring buffer's diagnostic name label
    pub const RING_NAME_LEN: usize = 32;

    /// Cache line size for alignment
    pub const CACHE_LINE_SIZE: usize = 64;
}

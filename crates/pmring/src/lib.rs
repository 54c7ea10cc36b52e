//! # pmring
//!
//! Ring-buffer geometry and the submission controller.
//!
//! This crate composes the pieces from `pmring-core` into the
//! producer-facing surface: a fixed-capacity byte pool with monotonic
//! head/tail cursors, fronted by a controller that turns write/read/flush
//! requests into `Ready` tasks on per-kind pending queues. Draining those
//! queues and moving bytes is an executor's job (see
//! `pmring_core::traits::IoExecutor`); nothing here blocks or retries.
//!
//! One controller instance is meant to be driven by a single submitting
//! thread and drained by a single executing thread.
//!
//! ## Modules
//!
//! - `config` - Controller configuration
//! - `geometry` - Ring-buffer cursors and pool
//! - `controller` - Submission controller and teardown

pub mod config;
pub mod controller;
pub mod geometry;

// Re-exports for convenience
pub use config::RingConfig;
pub use controller::RingController;
pub use geometry::RingBuffer;

pub use pmring_core::{IoKind, IoSubmit, IoTask, RingError, RingResult, TaskState};

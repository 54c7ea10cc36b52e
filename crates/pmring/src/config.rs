//! Controller configuration

use pmring_core::constants::{DEFAULT_POOL_CAPACITY, RING_NAME_LEN};

/// Configuration for a ring buffer controller
#[derive(Debug, Clone)]
pub struct RingConfig {
    /// Byte capacity of the backing pool (fixed for the ring's lifetime)
    pub capacity: usize,

    /// Diagnostic name label, capped at `RING_NAME_LEN` bytes
    pub name: String,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_POOL_CAPACITY,
            name: "pmring".to_string(),
        }
    }
}

impl RingConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pool capacity in bytes
    pub fn capacity(mut self, bytes: usize) -> Self {
        self.capacity = bytes;
        self
    }

    /// Set the diagnostic name label
    ///
    /// Truncated to `RING_NAME_LEN` bytes at a char boundary when the
    /// ring is built.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The name as it will appear on the ring, truncation applied
    pub fn effective_name(&self) -> &str {
        let mut end = self.name.len().min(RING_NAME_LEN);
        while !self.name.is_char_boundary(end) {
            end -= 1;
        }
        &self.name[..end]
    }
}

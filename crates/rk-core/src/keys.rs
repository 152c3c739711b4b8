//! Monotonic row key allocation.

use rk_common::{Error, Result, RowKey};

/// Hands out strictly increasing [`RowKey`]s for one output-table session.
///
/// Not shared between threads: advancing takes `&mut self`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAllocator {
    // None once u64::MAX has been issued.
    next: Option<u64>,
}

impl KeyAllocator {
    /// Allocator starting at key 0.
    pub fn new() -> Self {
        Self::with_base(0)
    }

    pub fn with_base(base: u64) -> Self {
        Self { next: Some(base) }
    }

    /// Return the current key and advance.
    ///
    /// Fails with [`Error::KeysExhausted`] once `u64::MAX` has been handed
    /// out; the sequence never wraps back to keys already issued.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<RowKey> {
        let current = self.next.ok_or(Error::KeysExhausted)?;
        self.next = current.checked_add(1);
        Ok(RowKey(current))
    }

    /// The key the next call to [`KeyAllocator::next`] returns, if any.
    pub fn peek(&self) -> Option<RowKey> {
        self.next.map(RowKey)
    }

    /// Restart the sequence at `base`.
    ///
    /// Nothing checks `base` against keys already handed out; reseeding below
    /// an issued key produces duplicates.
    pub fn reseed(&mut self, base: u64) {
        self.next = Some(base);
    }
}

impl Default for KeyAllocator {
    fn default() -> Self {
        Self::new()
    }
}

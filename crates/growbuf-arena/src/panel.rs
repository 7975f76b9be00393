//! Fixed-capacity storage panels.
//!
//! A [`Panel`] is one contiguous allocation with a fill cursor. Panels never
//! grow: when one is full the chain appends another.

use growbuf_core::Element;

/// A single contiguous, fixed-capacity storage block.
///
/// Panels are the fundamental storage unit of a buffer. The backing slice
/// is allocated to full capacity at creation; `filled` counts the leading
/// slots that hold written data. Slots past `filled` hold whatever was last
/// stored there (initially `T::default()`).
#[derive(Debug)]
pub struct Panel<T> {
    /// Backing storage. Its length is the panel's capacity.
    storage: Box<[T]>,
    /// Number of leading slots holding valid data.
    filled: usize,
}

impl<T: Element> Panel<T> {
    /// Wrap freshly allocated storage as an empty panel.
    pub fn new(storage: Box<[T]>) -> Self {
        Self { storage, filled: 0 }
    }

    /// Wrap storage whose every slot already holds valid data.
    pub fn full(storage: Box<[T]>) -> Self {
        let filled = storage.len();
        Self { storage, filled }
    }

    /// Total capacity in elements.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of slots holding valid data.
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// Remaining free slots.
    pub fn remaining(&self) -> usize {
        self.storage.len() - self.filled
    }

    /// Whether every slot holds valid data.
    pub fn is_full(&self) -> bool {
        self.filled == self.storage.len()
    }

    /// Write `value` into the next free slot.
    ///
    /// # Panics
    ///
    /// Panics if the panel is full.
    pub fn push(&mut self, value: T) {
        self.storage[self.filled] = value;
        self.filled += 1;
    }

    /// Copy as many leading elements of `values` as fit, returning the count.
    pub fn fill_from(&mut self, values: &[T]) -> usize {
        let take = values.len().min(self.remaining());
        self.storage[self.filled..self.filled + take].copy_from_slice(&values[..take]);
        self.filled += take;
        take
    }

    /// Fill up to `count` free slots with values produced by `next`,
    /// returning how many were written.
    pub fn fill_with(&mut self, count: usize, mut next: impl FnMut() -> T) -> usize {
        let take = count.min(self.remaining());
        for slot in &mut self.storage[self.filled..self.filled + take] {
            *slot = next();
        }
        self.filled += take;
        take
    }

    /// Set the fill count without touching slot contents.
    ///
    /// Growing exposes slots whose values are whatever they last held.
    pub(crate) fn set_filled(&mut self, filled: usize) {
        debug_assert!(
            filled <= self.storage.len(),
            "filled {filled} exceeds capacity {}",
            self.storage.len()
        );
        self.filled = filled;
    }

    /// Read the slot at `offset`, filled or not.
    ///
    /// # Panics
    ///
    /// Panics if `offset >= capacity()`.
    pub fn slot(&self, offset: usize) -> T {
        self.storage[offset]
    }

    /// The filled prefix as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.storage[..self.filled]
    }

    /// Memory usage of the backing storage in bytes.
    pub fn memory_bytes(&self) -> usize {
        std::mem::size_of_val(&*self.storage)
    }

    /// Release the backing storage.
    pub fn into_storage(self) -> Box<[T]> {
        self.storage
    }
}

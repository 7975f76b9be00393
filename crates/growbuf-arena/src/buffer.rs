//! The growable, append-only buffer.
//!
//! [`GrowableBuffer`] accumulates elements of unknown final count with
//! amortized O(1) append, growing a [`PanelChain`] geometrically, and
//! compacts into one contiguous panel on [`snapshot`](GrowableBuffer::snapshot).

use tracing::debug;

use growbuf_core::{Allocate, AllocationError, Element, Numeric};

use crate::chain::PanelChain;
use crate::config::GrowthConfig;
use crate::growth::{next_panel_capacity, required_reserve};
use crate::heap::HeapAllocator;

/// A contiguous-on-demand, append-only buffer of one element type.
///
/// Storage is a chain of fixed-capacity panels. Appending never moves
/// existing elements; when the reserved slots run out a new panel is
/// allocated, sized by the growth policy. Reads walk the chain, and
/// [`snapshot`](Self::snapshot) copies everything into one exactly-sized
/// panel once the build is complete.
///
/// Every mutating operation either completes or returns an
/// [`AllocationError`] before changing [`length`](Self::length) or
/// [`reserved`](Self::reserved).
///
/// Single-writer: mutation takes `&mut self`. Distinct buffers share no
/// state and may be used from separate threads.
#[derive(Debug)]
pub struct GrowableBuffer<T: Element, A: Allocate = HeapAllocator> {
    config: GrowthConfig,
    chain: PanelChain<T, A>,
}

impl<T: Element> GrowableBuffer<T> {
    /// Create an empty buffer whose first panel holds
    /// `config.initial_reservation()` elements.
    pub fn empty(config: GrowthConfig) -> Result<Self, AllocationError> {
        Self::empty_in(config, HeapAllocator)
    }

    /// Create an empty buffer whose first panel holds
    /// `max(config.initial_reservation(), min_reserve)` elements.
    pub fn empty_with_reserve(
        config: GrowthConfig,
        min_reserve: usize,
    ) -> Result<Self, AllocationError> {
        Self::empty_with_reserve_in(config, min_reserve, HeapAllocator)
    }

    /// Create a buffer of `length` copies of `value`, like NumPy's `full`.
    pub fn full(config: GrowthConfig, value: T, length: usize) -> Result<Self, AllocationError> {
        Self::full_in(config, value, length, HeapAllocator)
    }

    /// Create a buffer of `length` default values, like NumPy's `zeros`.
    pub fn zeros(config: GrowthConfig, length: usize) -> Result<Self, AllocationError> {
        Self::zeros_in(config, length, HeapAllocator)
    }
}

impl<T: Numeric> GrowableBuffer<T> {
    /// Create a buffer holding `0, 1, ..., length - 1`, like NumPy's `arange`.
    pub fn arange(config: GrowthConfig, length: usize) -> Result<Self, AllocationError> {
        Self::arange_in(config, length, HeapAllocator)
    }
}

impl<T: Numeric, A: Allocate> GrowableBuffer<T, A> {
    /// [`arange`](GrowableBuffer::arange) with an explicit allocation backend.
    pub fn arange_in(
        config: GrowthConfig,
        length: usize,
        allocator: A,
    ) -> Result<Self, AllocationError> {
        let mut buffer = Self::empty_with_reserve_in(config, length, allocator)?;
        let mut index = 0;
        buffer.chain.extend_with(length, || {
            let value = T::from_index(index);
            index += 1;
            value
        });
        Ok(buffer)
    }
}

impl<T: Element, A: Allocate> GrowableBuffer<T, A> {
    /// [`empty`](GrowableBuffer::empty) with an explicit allocation backend.
    pub fn empty_in(config: GrowthConfig, allocator: A) -> Result<Self, AllocationError> {
        Self::empty_with_reserve_in(config, 0, allocator)
    }

    /// [`empty_with_reserve`](GrowableBuffer::empty_with_reserve) with an
    /// explicit allocation backend.
    pub fn empty_with_reserve_in(
        config: GrowthConfig,
        min_reserve: usize,
        allocator: A,
    ) -> Result<Self, AllocationError> {
        let initial = config.initial_reservation().max(min_reserve);
        Ok(Self {
            config,
            chain: PanelChain::new(initial, allocator)?,
        })
    }

    /// [`full`](GrowableBuffer::full) with an explicit allocation backend.
    pub fn full_in(
        config: GrowthConfig,
        value: T,
        length: usize,
        allocator: A,
    ) -> Result<Self, AllocationError> {
        let mut buffer = Self::empty_with_reserve_in(config, length, allocator)?;
        buffer.chain.extend_with(length, || value);
        Ok(buffer)
    }

    /// [`zeros`](GrowableBuffer::zeros) with an explicit allocation backend.
    pub fn zeros_in(
        config: GrowthConfig,
        length: usize,
        allocator: A,
    ) -> Result<Self, AllocationError> {
        Self::full_in(config, T::default(), length, allocator)
    }

    /// The growth configuration this buffer was built with.
    pub fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// The allocation backend.
    pub fn allocator(&self) -> &A {
        self.chain.allocator()
    }

    /// Number of elements written (the logical length).
    pub fn length(&self) -> usize {
        self.chain.length()
    }

    /// Whether no elements have been written.
    pub fn is_empty(&self) -> bool {
        self.chain.length() == 0
    }

    /// Number of element slots allocated across all panels.
    ///
    /// Always at least [`length`](Self::length).
    pub fn reserved(&self) -> usize {
        self.chain.reserved()
    }

    /// Number of panels currently backing the buffer.
    pub fn panel_count(&self) -> usize {
        self.chain.panel_count()
    }

    /// Size of the written elements in bytes.
    pub fn nbytes(&self) -> usize {
        self.chain.length() * std::mem::size_of::<T>()
    }

    /// Append one element, allocating a new panel if every slot is taken.
    pub fn append(&mut self, value: T) -> Result<(), AllocationError> {
        if self.chain.length() == self.chain.reserved() {
            self.grow(required_reserve(self.chain.reserved(), 1)?)?;
        }
        self.chain.fill_tail(value);
        Ok(())
    }

    /// Append every element of `values` in order.
    ///
    /// Grows at most once, by enough for all of `values`.
    pub fn extend_from_slice(&mut self, values: &[T]) -> Result<(), AllocationError> {
        self.set_reserved(required_reserve(self.chain.length(), values.len())?)?;
        self.chain.extend_from_slice(values);
        Ok(())
    }

    /// Change the logical length, growing capacity first if needed.
    ///
    /// Shrinking keeps memory reserved. Slots exposed by growing hold
    /// unspecified values (not guaranteed to be zero) until written.
    pub fn set_length(&mut self, new_length: usize) -> Result<(), AllocationError> {
        self.set_reserved(new_length)?;
        self.chain.set_length(new_length);
        Ok(())
    }

    /// Ensure at least `min_reserved` slots are allocated.
    ///
    /// A request at or below [`reserved`](Self::reserved) changes nothing
    /// and allocates nothing. The length is never affected.
    pub fn set_reserved(&mut self, min_reserved: usize) -> Result<(), AllocationError> {
        if min_reserved > self.chain.reserved() {
            self.grow(min_reserved)?;
        }
        Ok(())
    }

    /// Discard all data and return to one fresh panel of
    /// `config.initial_reservation()` slots.
    pub fn clear(&mut self) -> Result<(), AllocationError> {
        self.chain.reset(self.config.initial_reservation())
    }

    /// Element at `index`, without negative indexing or bounds checks.
    ///
    /// O(panel count). The caller guarantees `index < length()`; debug
    /// builds assert it. Out-of-range reads are a caller bug: release
    /// builds may return an unspecified value or panic, but never wrap.
    pub fn get(&self, index: usize) -> T {
        self.chain.length_at(index)
    }

    /// The most recently appended element, if any.
    pub fn last(&self) -> Option<T> {
        self.chain.last()
    }

    /// Iterate over all elements in append order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.chain.iter()
    }

    /// Iterate over the filled part of each panel, in order.
    pub fn panels(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.chain.panels()
    }

    /// Copy all elements, in order, into a caller-owned slice.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != length()`.
    pub fn copy_into(&self, out: &mut [T]) {
        self.chain.copy_into(out);
    }

    /// Compact all panels into one contiguous panel and return its contents.
    ///
    /// Afterwards `panel_count() == 1` and `reserved() == length()`. The
    /// copy runs in O(length) and is meant to happen once per build;
    /// calling it again on a compact buffer makes no new allocation.
    pub fn snapshot(&mut self) -> Result<&[T], AllocationError> {
        self.chain.compact()
    }

    /// Move the contiguous storage out of the buffer, consuming it.
    ///
    /// Compacts first if needed; the returned slice holds exactly
    /// `length()` elements. The buffer cannot be used afterwards: build
    /// a new one for further work.
    #[deprecated(
        note = "legacy escape hatch slated for removal; read through `snapshot` instead"
    )]
    pub fn take_ownership(self) -> Result<Box<[T]>, AllocationError> {
        debug!(
            length = self.chain.length(),
            panels = self.chain.panel_count(),
            "transferring buffer storage ownership"
        );
        self.chain.into_storage()
    }

    /// Append a panel sized by the growth policy so that at least
    /// `min_required` slots are reserved.
    fn grow(&mut self, min_required: usize) -> Result<(), AllocationError> {
        let capacity = next_panel_capacity(
            &self.config,
            self.chain.tail_capacity(),
            self.chain.reserved(),
            min_required,
        );
        self.chain.append_panel(capacity)
    }
}

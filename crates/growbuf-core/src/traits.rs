//! The allocation backend capability.

use crate::element::Element;
use crate::error::AllocationError;

/// Source of panel storage.
///
/// Implemented by allocation backends (host heap, device memory, pooled
/// memory, test doubles). A buffer calls [`allocate`](Allocate::allocate)
/// whenever it needs a new panel or a compaction target, and hands every
/// storage block back through [`deallocate`](Allocate::deallocate) when the
/// panel is discarded.
///
/// Storage is returned fully initialised: every slot holds `T::default()`.
/// Callers never observe uninitialised memory.
pub trait Allocate {
    /// Allocate storage for exactly `count` elements of `T`.
    ///
    /// The returned slice has `len() == count`. A request for zero
    /// elements is valid and may return an empty slice.
    fn allocate<T: Element>(&self, count: usize) -> Result<Box<[T]>, AllocationError>;

    /// Return storage previously obtained from [`allocate`](Allocate::allocate).
    ///
    /// The default implementation drops the block.
    fn deallocate<T: Element>(&self, storage: Box<[T]>) {
        drop(storage);
    }
}

impl<A: Allocate> Allocate for &A {
    fn allocate<T: Element>(&self, count: usize) -> Result<Box<[T]>, AllocationError> {
        (**self).allocate(count)
    }

    fn deallocate<T: Element>(&self, storage: Box<[T]>) {
        (**self).deallocate(storage);
    }
}

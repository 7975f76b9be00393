//! Host-heap allocation backend.

use growbuf_core::{Allocate, AllocationError, Element};

/// Allocates panels from the global Rust allocator.
///
/// Every slot is initialised to `T::default()`, which costs O(count) even
/// for zero-sized element types. Requests are rejected up front with
/// [`AllocationError::CapacityOverflow`] when their byte size exceeds
/// `isize::MAX`; zero-sized types count one byte per slot for this check,
/// so their panels are bounded the same way. An allocator refusal becomes
/// [`AllocationError::OutOfMemory`] instead of aborting the process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapAllocator;

impl Allocate for HeapAllocator {
    fn allocate<T: Element>(&self, count: usize) -> Result<Box<[T]>, AllocationError> {
        let element_size = std::mem::size_of::<T>();
        let fits = count
            .checked_mul(element_size.max(1))
            .is_some_and(|bytes| bytes <= isize::MAX as usize);
        if !fits {
            return Err(AllocationError::CapacityOverflow { requested: count });
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(count)
            .map_err(|_| AllocationError::OutOfMemory {
                requested: count,
                element_size,
            })?;
        storage.resize(count, T::default());
        Ok(storage.into_boxed_slice())
    }
}

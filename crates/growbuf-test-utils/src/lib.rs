//! Test utilities and allocator doubles for growbuf development.
//!
//! Provides [`CountingAllocator`], an [`Allocate`] implementation that
//! records every request and can be told to fail, so tests can observe
//! allocation counts and exercise the error paths.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use growbuf_core::{Allocate, AllocationError, Element};

/// Shared counters behind a [`CountingAllocator`] and its clones.
#[derive(Debug, Default)]
struct Stats {
    allocations: AtomicUsize,
    deallocations: AtomicUsize,
    elements_released: AtomicUsize,
    failures: AtomicUsize,
    /// Successful allocations left before failing; `usize::MAX` is unlimited.
    budget: AtomicUsize,
    failing: AtomicBool,
    requests: Mutex<Vec<usize>>,
}

/// Allocator double that counts requests and injects failures.
///
/// Clones share one set of counters, so a test can keep a handle while
/// the buffer under test owns another:
///
/// ```
/// use growbuf_core::Allocate;
/// use growbuf_test_utils::CountingAllocator;
///
/// let alloc = CountingAllocator::new();
/// let probe = alloc.clone();
/// let storage: Box<[u32]> = alloc.allocate(8).unwrap();
/// assert_eq!(probe.allocations(), 1);
/// assert_eq!(probe.requests(), vec![8]);
/// alloc.deallocate(storage);
/// assert_eq!(probe.live(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct CountingAllocator {
    stats: Arc<Stats>,
}

impl CountingAllocator {
    /// An allocator that always succeeds.
    pub fn new() -> Self {
        let stats = Stats {
            budget: AtomicUsize::new(usize::MAX),
            ..Stats::default()
        };
        Self {
            stats: Arc::new(stats),
        }
    }

    /// An allocator that succeeds `successes` times, then fails every request.
    pub fn failing_after(successes: usize) -> Self {
        let alloc = Self::new();
        alloc.stats.budget.store(successes, Ordering::SeqCst);
        alloc
    }

    /// Make every subsequent request fail (`true`) or follow the budget (`false`).
    pub fn set_failing(&self, failing: bool) {
        self.stats.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful allocations.
    pub fn allocations(&self) -> usize {
        self.stats.allocations.load(Ordering::SeqCst)
    }

    /// Number of storage blocks returned through `deallocate`.
    pub fn deallocations(&self) -> usize {
        self.stats.deallocations.load(Ordering::SeqCst)
    }

    /// Number of requests that were refused.
    pub fn failures(&self) -> usize {
        self.stats.failures.load(Ordering::SeqCst)
    }

    /// Blocks allocated but not yet returned.
    pub fn live(&self) -> usize {
        self.allocations() - self.deallocations()
    }

    /// Total elements across all blocks returned through `deallocate`.
    pub fn elements_released(&self) -> usize {
        self.stats.elements_released.load(Ordering::SeqCst)
    }

    /// Element counts of every successful allocation, in request order.
    pub fn requests(&self) -> Vec<usize> {
        self.stats
            .requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn take_budget(&self) -> bool {
        if self.stats.failing.load(Ordering::SeqCst) {
            return false;
        }
        self.stats
            .budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| match left {
                usize::MAX => Some(usize::MAX),
                0 => None,
                n => Some(n - 1),
            })
            .is_ok()
    }
}

impl Default for CountingAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl Allocate for CountingAllocator {
    fn allocate<T: Element>(&self, count: usize) -> Result<Box<[T]>, AllocationError> {
        if !self.take_budget() {
            self.stats.failures.fetch_add(1, Ordering::SeqCst);
            return Err(AllocationError::OutOfMemory {
                requested: count,
                element_size: std::mem::size_of::<T>(),
            });
        }
        self.stats.allocations.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.stats.requests.lock() {
            requests.push(count);
        }
        Ok(vec![T::default(); count].into_boxed_slice())
    }

    fn deallocate<T: Element>(&self, storage: Box<[T]>) {
        self.stats.deallocations.fetch_add(1, Ordering::SeqCst);
        self.stats
            .elements_released
            .fetch_add(storage.len(), Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_allocations_and_releases() {
        let alloc = CountingAllocator::new();
        let a: Box<[u8]> = alloc.allocate(4).unwrap();
        let b: Box<[u8]> = alloc.allocate(8).unwrap();
        assert_eq!(alloc.allocations(), 2);
        assert_eq!(alloc.live(), 2);
        alloc.deallocate(a);
        alloc.deallocate(b);
        assert_eq!(alloc.live(), 0);
        assert_eq!(alloc.elements_released(), 12);
    }

    #[test]
    fn failing_after_budget() {
        let alloc = CountingAllocator::failing_after(1);
        assert!(alloc.allocate::<u32>(1).is_ok());
        assert!(alloc.allocate::<u32>(1).is_err());
        assert_eq!(alloc.allocations(), 1);
        assert_eq!(alloc.failures(), 1);
        assert_eq!(alloc.requests(), vec![1]);
    }

    #[test]
    fn set_failing_toggles() {
        let alloc = CountingAllocator::new();
        alloc.set_failing(true);
        assert!(alloc.allocate::<u32>(1).is_err());
        alloc.set_failing(false);
        assert!(alloc.allocate::<u32>(1).is_ok());
    }

    #[test]
    fn clones_share_counters() {
        let alloc = CountingAllocator::new();
        let probe = alloc.clone();
        let _block: Box<[i64]> = alloc.allocate(3).unwrap();
        assert_eq!(probe.allocations(), 1);
    }
}

//! Ordered panel chains.
//!
//! A [`PanelChain`] is the storage history of one buffer: panels in append
//! order, each owning its allocation. Filled slots always form a prefix of
//! the chain. Every panel before the *current* panel is full and every
//! panel after it is empty, so positional lookup can walk capacities and
//! compaction can copy filled prefixes in order.

use smallvec::{smallvec, SmallVec};
use tracing::{debug, trace, warn};

use growbuf_core::{Allocate, AllocationError, Element};

use crate::panel::Panel;

/// Panels stored inline before the chain spills to the heap.
///
/// Geometric growth keeps chains short: eight doubling panels from a
/// 1024-element start already reserve over 250K elements.
pub const INLINE_PANELS: usize = 8;

/// A growable, ordered list of [`Panel`]s backed by an allocator.
///
/// Panels are appended at the tail and only ever removed all at once, by
/// [`reset`](PanelChain::reset) or [`compact`](PanelChain::compact).
/// Total length and capacity are cached so both are O(1). Every panel is
/// handed back to the allocator when it is discarded, including on drop.
#[derive(Debug)]
pub struct PanelChain<T: Element, A: Allocate> {
    panels: SmallVec<[Panel<T>; INLINE_PANELS]>,
    /// Index of the panel receiving the next write.
    current: usize,
    /// Sum of `filled` over all panels.
    length: usize,
    /// Sum of `capacity` over all panels.
    reserved: usize,
    allocator: A,
}

impl<T: Element, A: Allocate> PanelChain<T, A> {
    /// Create a chain with one empty panel of `initial_capacity` elements.
    pub fn new(initial_capacity: usize, allocator: A) -> Result<Self, AllocationError> {
        let storage = allocate_storage::<T, A>(&allocator, initial_capacity)?;
        trace!(capacity = initial_capacity, "allocated first panel");
        Ok(Self {
            panels: smallvec![Panel::new(storage)],
            current: 0,
            length: 0,
            reserved: initial_capacity,
            allocator,
        })
    }

    /// The backend this chain allocates from.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Total filled elements across all panels.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Total capacity across all panels.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// Number of panels in the chain.
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Capacity of the last panel.
    pub fn tail_capacity(&self) -> usize {
        self.panels.last().map_or(0, Panel::capacity)
    }

    /// Total memory usage across all panels in bytes.
    pub fn memory_bytes(&self) -> usize {
        self.panels.iter().map(Panel::memory_bytes).sum()
    }

    /// Allocate an empty panel of `capacity` elements and link it as the tail.
    ///
    /// On error the chain is unchanged.
    pub fn append_panel(&mut self, capacity: usize) -> Result<(), AllocationError> {
        let reserved = self
            .reserved
            .checked_add(capacity)
            .ok_or(AllocationError::CapacityOverflow {
                requested: capacity,
            })?;
        let storage = allocate_storage::<T, A>(&self.allocator, capacity)?;
        self.panels.push(Panel::new(storage));
        self.reserved = reserved;
        trace!(
            capacity,
            panels = self.panels.len(),
            reserved,
            "appended panel"
        );
        Ok(())
    }

    /// Write `value` into the next free slot.
    ///
    /// The caller must have grown the chain first so that
    /// `length() < reserved()`. Debug builds assert this; release builds
    /// panic on the out-of-range slot write.
    pub fn fill_tail(&mut self, value: T) {
        debug_assert!(
            self.length < self.reserved,
            "fill_tail without spare capacity (length {}, reserved {})",
            self.length,
            self.reserved
        );
        self.settle_cursor();
        self.panels[self.current].push(value);
        self.length += 1;
    }

    /// Copy `values` into free slots in order, spanning panels as needed.
    ///
    /// The caller must have reserved room for all of `values`.
    pub fn extend_from_slice(&mut self, values: &[T]) {
        debug_assert!(
            values.len() <= self.reserved - self.length,
            "extend_from_slice of {} without spare capacity ({} free)",
            values.len(),
            self.reserved - self.length
        );
        let mut rest = values;
        for panel in &mut self.panels[self.current..] {
            if rest.is_empty() {
                break;
            }
            let written = panel.fill_from(rest);
            rest = &rest[written..];
        }
        self.length += values.len() - rest.len();
        self.settle_cursor();
    }

    /// Write `count` values produced by `next` into free slots in order.
    ///
    /// The caller must have reserved room for `count` elements.
    pub fn extend_with(&mut self, count: usize, mut next: impl FnMut() -> T) {
        debug_assert!(
            count <= self.reserved - self.length,
            "extend_with of {count} without spare capacity ({} free)",
            self.reserved - self.length
        );
        let mut written = 0;
        for panel in &mut self.panels[self.current..] {
            if written == count {
                break;
            }
            written += panel.fill_with(count - written, &mut next);
        }
        self.length += written;
        self.settle_cursor();
    }

    /// Set the logical length to `new_length` without allocating.
    ///
    /// Shrinking keeps memory reserved; growing exposes slots whose
    /// contents are unspecified until written. The caller must ensure
    /// `new_length <= reserved()`.
    pub fn set_length(&mut self, new_length: usize) {
        debug_assert!(
            new_length <= self.reserved,
            "set_length({new_length}) beyond reserved {}",
            self.reserved
        );
        let mut rest = new_length;
        for panel in &mut self.panels {
            let take = rest.min(panel.capacity());
            panel.set_filled(take);
            rest -= take;
        }
        self.length = new_length - rest;
        self.current = self
            .panels
            .iter()
            .position(|p| !p.is_full())
            .unwrap_or(self.panels.len() - 1);
    }

    /// Read the element at logical position `index`.
    ///
    /// Walks panels in order, O(panel count). There is no bounds contract:
    /// debug builds assert `index < length()`; release builds return an
    /// unspecified slot value for `length() <= index < reserved()` and
    /// panic past `reserved()`. Never clamps or wraps.
    pub fn length_at(&self, index: usize) -> T {
        debug_assert!(
            index < self.length,
            "index {index} out of range for length {}",
            self.length
        );
        // Panels before the current one are full, so below `length` the
        // capacity offsets coincide with filled offsets.
        let mut offset = index;
        for panel in &self.panels {
            if offset < panel.capacity() {
                return panel.slot(offset);
            }
            offset -= panel.capacity();
        }
        panic!(
            "index {index} out of range for reserved {}",
            self.reserved
        );
    }

    /// The most recently written element, if any.
    pub fn last(&self) -> Option<T> {
        let current = &self.panels[self.current];
        if let Some(&value) = current.as_slice().last() {
            return Some(value);
        }
        // An empty current panel means its predecessor, if any, is full.
        self.current
            .checked_sub(1)
            .and_then(|prev| self.panels[prev].as_slice().last().copied())
    }

    /// Iterate over every filled element in append order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.panels
            .iter()
            .flat_map(|panel| panel.as_slice().iter().copied())
    }

    /// Iterate over each panel's filled prefix.
    pub fn panels(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.panels.iter().map(Panel::as_slice)
    }

    /// Copy every filled element, in order, into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != length()`.
    pub fn copy_into(&self, out: &mut [T]) {
        assert_eq!(
            out.len(),
            self.length,
            "destination length must equal buffer length"
        );
        let mut at = 0;
        for panel in &self.panels {
            let filled = panel.as_slice();
            out[at..at + filled.len()].copy_from_slice(filled);
            at += filled.len();
        }
    }

    /// Whether the chain is a single panel holding exactly `length()` elements.
    pub fn is_compact(&self) -> bool {
        self.panels.len() == 1 && self.panels[0].is_full()
    }

    /// Replace the chain with one panel of exactly `length()` elements.
    ///
    /// Copies every panel's filled prefix in order into a fresh allocation
    /// and releases all old panels. A chain that is already compact is left
    /// as is. On error the chain is unchanged.
    pub fn compact(&mut self) -> Result<&[T], AllocationError> {
        if !self.is_compact() {
            let mut storage = allocate_storage::<T, A>(&self.allocator, self.length)?;
            self.copy_into(&mut storage);
            let released = self.replace_panels(Panel::full(storage));
            debug!(length = self.length, panels_released = released, "compacted panels");
        }
        Ok(self.panels[0].as_slice())
    }

    /// Discard all panels and start over with one empty panel of
    /// `initial_capacity` elements. On error the chain is unchanged.
    pub fn reset(&mut self, initial_capacity: usize) -> Result<(), AllocationError> {
        let storage = allocate_storage::<T, A>(&self.allocator, initial_capacity)?;
        let released = self.replace_panels(Panel::new(storage));
        debug!(
            capacity = initial_capacity,
            panels_released = released,
            "reset panel chain"
        );
        Ok(())
    }

    /// Compact, then move the single storage block out of the chain.
    ///
    /// The returned slice holds exactly `length()` elements.
    pub fn into_storage(mut self) -> Result<Box<[T]>, AllocationError> {
        self.compact()?;
        let panels = std::mem::take(&mut self.panels);
        Ok(panels
            .into_iter()
            .next()
            .map_or_else(Box::default, Panel::into_storage))
    }

    /// Advance the cursor past full panels while a successor exists.
    fn settle_cursor(&mut self) {
        while self.panels[self.current].is_full() && self.current + 1 < self.panels.len() {
            self.current += 1;
        }
    }

    /// Swap in `panel` as the whole chain, returning the old panels to the
    /// allocator. Returns how many panels were released.
    fn replace_panels(&mut self, panel: Panel<T>) -> usize {
        self.length = panel.filled();
        self.reserved = panel.capacity();
        self.current = 0;
        let old = std::mem::replace(&mut self.panels, smallvec![panel]);
        let released = old.len();
        for panel in old {
            self.allocator.deallocate(panel.into_storage());
        }
        released
    }
}

impl<T: Element, A: Allocate> Drop for PanelChain<T, A> {
    fn drop(&mut self) {
        for panel in self.panels.drain(..) {
            self.allocator.deallocate(panel.into_storage());
        }
    }
}

fn allocate_storage<T: Element, A: Allocate>(
    allocator: &A,
    count: usize,
) -> Result<Box<[T]>, AllocationError> {
    allocator.allocate::<T>(count).inspect_err(|err| {
        warn!(requested = count, error = %err, "panel allocation failed");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::HeapAllocator;

    fn chain(initial: usize) -> PanelChain<i64, HeapAllocator> {
        PanelChain::new(initial, HeapAllocator).unwrap()
    }

    #[test]
    fn new_chain_has_one_empty_panel() {
        let c = chain(4);
        assert_eq!(c.panel_count(), 1);
        assert_eq!(c.length(), 0);
        assert_eq!(c.reserved(), 4);
        assert_eq!(c.last(), None);
    }

    #[test]
    fn fill_tail_spills_into_appended_panel() {
        let mut c = chain(2);
        c.fill_tail(1);
        c.fill_tail(2);
        c.append_panel(4).unwrap();
        c.fill_tail(3);
        assert_eq!(c.panel_count(), 2);
        assert_eq!(c.length(), 3);
        assert_eq!(c.reserved(), 6);
        assert_eq!(c.length_at(2), 3);
        assert_eq!(c.last(), Some(3));
    }

    #[test]
    fn panel_reserved_ahead_fills_after_current() {
        let mut c = chain(4);
        c.fill_tail(10);
        c.append_panel(8).unwrap();
        for v in 11..16 {
            c.fill_tail(v);
        }
        let panels: Vec<&[i64]> = c.panels().collect();
        assert_eq!(panels.len(), 2);
        assert_eq!(panels[0], &[10, 11, 12, 13]);
        assert_eq!(panels[1], &[14, 15]);
    }

    #[test]
    fn extend_from_slice_spans_panels() {
        let mut c = chain(3);
        c.append_panel(3).unwrap();
        c.append_panel(3).unwrap();
        c.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(c.length(), 7);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(c.last(), Some(7));
    }

    #[test]
    fn extend_with_counts_from_cursor() {
        let mut c = chain(2);
        c.fill_tail(100);
        c.append_panel(4).unwrap();
        let mut n = 0;
        c.extend_with(4, || {
            n += 1;
            n
        });
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![100, 1, 2, 3, 4]);
    }

    #[test]
    fn last_after_exactly_filling_panel() {
        let mut c = chain(2);
        c.fill_tail(1);
        c.fill_tail(2);
        c.append_panel(2).unwrap();
        assert_eq!(c.last(), Some(2));
    }

    #[test]
    fn set_length_shrinks_across_panels() {
        let mut c = chain(2);
        c.extend_from_slice(&[1, 2]);
        c.append_panel(4).unwrap();
        c.extend_from_slice(&[3, 4, 5]);
        c.set_length(1);
        assert_eq!(c.length(), 1);
        assert_eq!(c.reserved(), 6);
        assert_eq!(c.last(), Some(1));
        // Appending resumes right after the new length.
        c.fill_tail(9);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![1, 9]);
    }

    #[test]
    fn set_length_grows_into_reserved_slots() {
        let mut c = chain(4);
        c.append_panel(4).unwrap();
        c.set_length(6);
        assert_eq!(c.length(), 6);
        assert_eq!(c.panels().map(<[i64]>::len).collect::<Vec<_>>(), vec![4, 2]);
        c.fill_tail(7);
        assert_eq!(c.length_at(6), 7);
    }

    #[test]
    fn compact_concatenates_in_order() {
        let mut c = chain(2);
        c.extend_from_slice(&[1, 2]);
        c.append_panel(4).unwrap();
        c.extend_from_slice(&[3, 4, 5]);
        assert_eq!(c.compact().unwrap(), &[1, 2, 3, 4, 5]);
        assert_eq!(c.panel_count(), 1);
        assert_eq!(c.reserved(), 5);
        assert!(c.is_compact());
    }

    #[test]
    fn compact_empty_chain_yields_zero_capacity_panel() {
        let mut c = chain(8);
        assert!(c.compact().unwrap().is_empty());
        assert_eq!(c.reserved(), 0);
        // Growing from a zero-capacity tail still works.
        c.append_panel(1).unwrap();
        c.fill_tail(5);
        assert_eq!(c.iter().collect::<Vec<_>>(), vec![5]);
    }

    #[test]
    fn reset_discards_everything() {
        let mut c = chain(2);
        c.extend_from_slice(&[1, 2]);
        c.append_panel(2).unwrap();
        c.fill_tail(3);
        c.reset(2).unwrap();
        assert_eq!(c.panel_count(), 1);
        assert_eq!(c.length(), 0);
        assert_eq!(c.reserved(), 2);
    }

    #[test]
    fn copy_into_matches_iter() {
        let mut c = chain(1);
        c.fill_tail(1);
        c.append_panel(2).unwrap();
        c.extend_from_slice(&[2, 3]);
        let mut out = [0i64; 3];
        c.copy_into(&mut out);
        assert_eq!(out, [1, 2, 3]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "without spare capacity")]
    fn fill_tail_on_full_chain_panics_in_debug() {
        let mut c = chain(2);
        c.extend_from_slice(&[1, 2]);
        c.fill_tail(3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn length_at_past_length_panics_in_debug() {
        let mut c = chain(4);
        c.fill_tail(1);
        c.length_at(1);
    }

    #[test]
    #[should_panic(expected = "destination length")]
    fn copy_into_wrong_length_panics() {
        let c = chain(1);
        let mut out = [0i64; 2];
        c.copy_into(&mut out);
    }

    #[test]
    fn into_storage_returns_exact_length() {
        let mut c = chain(8);
        c.extend_from_slice(&[4, 5, 6]);
        let storage = c.into_storage().unwrap();
        assert_eq!(&*storage, &[4, 5, 6]);
    }

    #[test]
    fn memory_bytes_sums_panel_capacities() {
        let mut c = chain(4);
        c.append_panel(12).unwrap();
        assert_eq!(c.memory_bytes(), 16 * std::mem::size_of::<i64>());
    }

    #[test]
    fn reserved_overflow_is_an_error() {
        let mut c: PanelChain<(), HeapAllocator> = PanelChain::new(1, HeapAllocator).unwrap();
        let result = c.append_panel(usize::MAX);
        assert!(matches!(
            result,
            Err(AllocationError::CapacityOverflow { .. })
        ));
        assert_eq!(c.panel_count(), 1);
    }
}

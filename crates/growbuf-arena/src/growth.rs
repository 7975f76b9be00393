//! Panel growth policy.
//!
//! Decides how large the next panel is. Growth is geometric in the tail
//! panel's capacity, so N appends from empty allocate O(log N) panels.

use growbuf_core::AllocationError;

use crate::config::GrowthConfig;

/// Capacity of the panel to append so that total capacity reaches `min_required`.
///
/// `reserved` is the chain's current total capacity and `tail_capacity`
/// the capacity of its last panel. The result is
/// `max(ceil(growth_factor * tail_capacity), min_required - reserved, 1)`,
/// so after appending a panel of this size the chain holds at least
/// `min_required` slots. The float product saturates at `usize::MAX`.
pub fn next_panel_capacity(
    config: &GrowthConfig,
    tail_capacity: usize,
    reserved: usize,
    min_required: usize,
) -> usize {
    let geometric = (config.growth_factor() * tail_capacity as f64).ceil() as usize;
    let deficit = min_required.saturating_sub(reserved);
    geometric.max(deficit).max(1)
}

/// Total slots needed to hold `additional` more elements after `length`.
///
/// Fails with [`AllocationError::CapacityOverflow`] when the sum exceeds
/// `usize::MAX`.
pub fn required_reserve(length: usize, additional: usize) -> Result<usize, AllocationError> {
    length
        .checked_add(additional)
        .ok_or(AllocationError::CapacityOverflow {
            requested: additional,
        })
}

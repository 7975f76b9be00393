//! Error types for the growbuf workspace.
//!
//! Allocation failures come from the backend and are fatal to the
//! operation in progress. Configuration errors are reported once, when a
//! growth configuration is built.

use std::error::Error;
use std::fmt;

/// The allocation backend could not satisfy a capacity request.
///
/// Returned when a new panel or a compaction buffer cannot be obtained.
/// Never retried internally; the buffer is left exactly as it was before
/// the failed operation started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AllocationError {
    /// The backend ran out of memory.
    OutOfMemory {
        /// Number of elements requested.
        requested: usize,
        /// Size of one element in bytes.
        element_size: usize,
    },
    /// The request's size in bytes does not fit the address space.
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
    },
}

impl AllocationError {
    /// Number of elements the failed request asked for.
    pub fn requested(&self) -> usize {
        match self {
            Self::OutOfMemory { requested, .. } | Self::CapacityOverflow { requested } => {
                *requested
            }
        }
    }
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory {
                requested,
                element_size,
            } => {
                write!(
                    f,
                    "allocation failed: {requested} elements of {element_size} bytes"
                )
            }
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity overflow: {requested} elements")
            }
        }
    }
}

impl Error for AllocationError {}

/// A growth configuration was rejected at construction.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The initial reservation must hold at least one element.
    ZeroInitialReservation,
    /// The growth factor must be finite and at least 1.
    InvalidGrowthFactor {
        /// The rejected factor.
        factor: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInitialReservation => write!(f, "initial reservation must be positive"),
            Self::InvalidGrowthFactor { factor } => {
                write!(f, "growth factor must be finite and >= 1, got {factor}")
            }
        }
    }
}

impl Error for ConfigError {}

//! Buffer growth parameters.

use growbuf_core::ConfigError;

/// Configuration for panel growth.
///
/// Controls the size of the first panel and how quickly later panels grow.
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrowthConfig {
    /// Capacity of the first panel, in elements.
    initial_reservation: usize,
    /// Multiplier applied to the tail panel's capacity when a new panel
    /// is needed.
    growth_factor: f64,
}

impl GrowthConfig {
    /// Default first-panel capacity: 1024 elements.
    pub const DEFAULT_INITIAL_RESERVATION: usize = 1024;

    /// Default growth factor: doubling.
    pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

    /// Create a validated configuration.
    ///
    /// `initial_reservation` must be positive and `growth_factor` must be
    /// finite and at least 1. A factor of exactly 1 gives constant-size
    /// panels, which is valid but loses amortized O(1) append.
    pub fn new(initial_reservation: usize, growth_factor: f64) -> Result<Self, ConfigError> {
        if initial_reservation == 0 {
            return Err(ConfigError::ZeroInitialReservation);
        }
        if !growth_factor.is_finite() || growth_factor < 1.0 {
            return Err(ConfigError::InvalidGrowthFactor {
                factor: growth_factor,
            });
        }
        Ok(Self {
            initial_reservation,
            growth_factor,
        })
    }

    /// Create a configuration with the given first-panel capacity and the
    /// default growth factor.
    pub fn with_initial_reservation(initial_reservation: usize) -> Result<Self, ConfigError> {
        Self::new(initial_reservation, Self::DEFAULT_GROWTH_FACTOR)
    }

    /// Capacity of the first panel, and of the fresh panel after `clear`.
    pub fn initial_reservation(&self) -> usize {
        self.initial_reservation
    }

    /// Multiplier applied to the tail panel's capacity on growth.
    pub fn growth_factor(&self) -> f64 {
        self.growth_factor
    }
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            initial_reservation: Self::DEFAULT_INITIAL_RESERVATION,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        }
    }
}

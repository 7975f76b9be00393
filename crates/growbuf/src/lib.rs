//! growbuf: append-only growable buffers for columnar array builders.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the growbuf sub-crates. For most users, adding `growbuf` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use growbuf::prelude::*;
//!
//! // First panel holds 4 elements; later panels double.
//! let config = GrowthConfig::new(4, 2.0).unwrap();
//! let mut column = GrowableBuffer::<i64>::empty(config).unwrap();
//! for v in 0..6 {
//!     column.append(v).unwrap();
//! }
//! assert_eq!(column.length(), 6);
//! assert_eq!(column.panel_count(), 2);
//! assert_eq!(column.get(4), 4);
//!
//! // Compact into one contiguous panel once building is done.
//! assert_eq!(column.snapshot().unwrap(), &[0, 1, 2, 3, 4, 5]);
//! assert_eq!(column.reserved(), column.length());
//! ```
//!
//! # Custom allocation backends
//!
//! Buffers allocate panels through the [`Allocate`](types::Allocate) trait.
//! [`HeapAllocator`](arena::HeapAllocator) is the default; other backends
//! (pooled, device, instrumented) plug in through the `_in` constructors:
//!
//! ```rust
//! use std::cell::Cell;
//! use growbuf::prelude::*;
//!
//! #[derive(Default)]
//! struct Tally(Cell<usize>);
//!
//! impl Allocate for Tally {
//!     fn allocate<T: Element>(&self, count: usize) -> Result<Box<[T]>, AllocationError> {
//!         self.0.set(self.0.get() + 1);
//!         HeapAllocator.allocate(count)
//!     }
//! }
//!
//! let tally = Tally::default();
//! let mut buf = GrowableBuffer::<u8, _>::empty_in(GrowthConfig::default(), &tally).unwrap();
//! buf.set_reserved(100_000).unwrap();
//! assert_eq!(tally.0.get(), 2);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `growbuf-arena` | `GrowableBuffer`, `PanelChain`, `Panel`, `GrowthConfig`, `HeapAllocator` |
//! | [`types`] | `growbuf-core` | Element traits, error types, the `Allocate` trait |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Growable buffers, panel chains, and growth configuration (`growbuf-arena`).
///
/// Most users only need [`arena::GrowableBuffer`] and [`arena::GrowthConfig`]
/// from this module; they are also available in the [`prelude`].
pub use growbuf_arena as arena;

/// Element traits, error types, and the allocation backend trait
/// (`growbuf-core`).
pub use growbuf_core as types;

/// Common imports for typical growbuf usage.
///
/// ```rust
/// use growbuf::prelude::*;
/// ```
pub mod prelude {
    // Buffers and configuration
    pub use growbuf_arena::{GrowableBuffer, GrowthConfig, HeapAllocator};

    // Core traits
    pub use growbuf_core::{Allocate, Element, Numeric};

    // Errors
    pub use growbuf_core::{AllocationError, ConfigError};
}

//! Panel-chained growable buffers.
//!
//! A [`GrowableBuffer`] accumulates elements of unknown final count with
//! amortized O(1) append, then compacts itself into a single contiguous
//! block on demand. It is the storage primitive beneath columnar array
//! builders.
//!
//! # Architecture
//!
//! ```text
//! GrowableBuffer<T, A> (public API, owns GrowthConfig)
//! └── PanelChain<T, A> (SmallVec of panels + fill cursor + cached totals)
//!     ├── Panel<T> × N (fixed-capacity Box<[T]>, filled prefix)
//!     └── A: Allocate (HeapAllocator by default)
//! ```
//!
//! Panels are never resized. When the reserved slots run out,
//! [`growth::next_panel_capacity`] sizes a new tail panel geometrically,
//! so N appends allocate O(log N) panels. [`GrowableBuffer::snapshot`]
//! copies every panel into one exactly-sized panel.
//!
//! # Safety
//!
//! Backends hand out fully initialised storage, so this crate contains
//! no `unsafe` code. Release builds skip the bounds preconditions
//! (debug builds assert them) but out-of-range reads can only panic or
//! return an unspecified slot value.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod chain;
pub mod config;
pub mod growth;
pub mod heap;
pub mod panel;

// Public re-exports for the primary API surface.
pub use buffer::GrowableBuffer;
pub use chain::PanelChain;
pub use config::GrowthConfig;
pub use heap::HeapAllocator;
pub use panel::Panel;

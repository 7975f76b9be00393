//! Core types and traits for the growbuf workspace.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the storage crate and its test doubles:
//! element traits, error types, and the allocation backend trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod traits;

pub use element::{Element, Numeric};
pub use error::{AllocationError, ConfigError};
pub use traits::Allocate;

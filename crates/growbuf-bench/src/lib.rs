//! Benchmark workloads and utilities for growbuf.
//!
//! All workloads are generated from a seed with a ChaCha8 RNG, so runs are
//! reproducible:
//!
//! - [`random_values`]: a flat stream of values for append benchmarks
//! - [`ragged_chunks`]: variable-length batches, like records of a
//!   semi-structured input feeding one column
//! - [`build_column`]: append a workload into a fresh buffer

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use growbuf_arena::{GrowableBuffer, GrowthConfig};
use growbuf_core::AllocationError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generate `n` pseudo-random values from `seed`.
pub fn random_values(seed: u64, n: usize) -> Vec<u64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n).map(|_| rng.random()).collect()
}

/// Generate `batches` chunks of 0 to `max_len` values each.
///
/// Chunk values are consecutive across the whole workload, so the
/// concatenation is `0, 1, 2, ...`.
pub fn ragged_chunks(seed: u64, batches: usize, max_len: usize) -> Vec<Vec<u32>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut next = 0u32;
    (0..batches)
        .map(|_| {
            let len = rng.random_range(0..=max_len);
            let chunk: Vec<u32> = (next..next + len as u32).collect();
            next += len as u32;
            chunk
        })
        .collect()
}

/// Append every value to a fresh buffer, one element at a time.
pub fn build_column(
    config: GrowthConfig,
    values: &[u64],
) -> Result<GrowableBuffer<u64>, AllocationError> {
    let mut buffer = GrowableBuffer::empty(config)?;
    for &v in values {
        buffer.append(v)?;
    }
    Ok(buffer)
}

//! End-to-end column build example.
//!
//! Demonstrates: configure growth → append ragged batches → read back →
//! snapshot → clear and reuse. Run with `RUST_LOG=growbuf_arena=trace` to
//! see each panel allocation.

use growbuf_arena::{GrowableBuffer, GrowthConfig};
use growbuf_bench::ragged_chunks;
use growbuf_test_utils::CountingAllocator;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .init();

    println!("=== growbuf column build example ===\n");

    let config = GrowthConfig::new(256, 2.0).unwrap();
    let alloc = CountingAllocator::new();
    let mut column = GrowableBuffer::<u32, _>::empty_in(config, alloc.clone()).unwrap();

    // --- Build 1: 2000 ragged batches ---
    let chunks = ragged_chunks(42, 2000, 32);
    for chunk in &chunks {
        column.extend_from_slice(chunk).unwrap();
    }
    println!(
        "Build 1: {} elements in {} panels ({} reserved)",
        column.length(),
        column.panel_count(),
        column.reserved()
    );
    println!("  panel sizes:   {:?}", alloc.requests());
    println!("  element 1000:  {}", column.get(1000));
    println!("  last element:  {:?}", column.last());

    let data = column.snapshot().unwrap();
    let checksum: u64 = data.iter().map(|&v| v as u64).sum();
    println!("  snapshot:      {} elements, checksum {checksum}", data.len());
    tracing::info!(
        allocations = alloc.allocations(),
        releases = alloc.deallocations(),
        "build 1 complete"
    );

    // --- Build 2: reuse after clear ---
    column.clear().unwrap();
    for v in 0..10u32 {
        column.append(v * v).unwrap();
    }
    let squares = column.snapshot().unwrap();
    println!("\nBuild 2: {squares:?}");

    drop(column);
    println!(
        "\nAllocator: {} allocations, {} releases, {} live",
        alloc.allocations(),
        alloc.deallocations(),
        alloc.live()
    );
}

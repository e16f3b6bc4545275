//! Parallel inclusive scan (running prefix sum).
//!
//! The scan decomposes into four stages:
//!
//! 1. Partition `[0, N)` into K contiguous, near-equal ranges.
//! 2. Scan every range independently (parallel).
//! 3. Exclusive-scan the per-range tail sums into carry offsets (sequential).
//! 4. Add each range's carry offset to its elements (parallel).
//!
//! The parallel stages run on an [`Executor`], either spawning scoped threads
//! per phase ([`ScopedThreads`]) or reusing a bounded pool ([`WorkerPool`]).

pub mod apply;
pub mod config;
pub mod error;
pub mod exec;
pub mod kernel;
pub mod local;
pub mod offsets;
pub mod op;
pub mod partition;
pub mod scanner;

pub use apply::apply_offsets;
pub use config::{BackendKind, ScanConfig};
pub use error::ScanError;
pub use exec::{available_workers, Backend, Executor, ScopedThreads, WorkerPool};
pub use kernel::{exclusive_scan, inclusive_scan, verify_inclusive};
pub use local::scan_partitions;
pub use offsets::derive_offsets;
pub use op::{Combine, WrappingAdd};
pub use partition::{normalize, partition, split_ranges_mut, Clamp, Normalized, Partition};
pub use scanner::{scan, ScanReport, Scanner, Stage, StageTimings};

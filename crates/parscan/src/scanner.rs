//! Scan orchestration.
//!
//! A scan walks `Init → Partitioned → LocallyScanned → OffsetsReady →
//! GloballyScanned`. Both parallel stages end in the executor's join, so the
//! offset derivation only ever sees finished tail sums and the caller only
//! ever sees a fully applied output.

use std::time::{Duration, Instant};

use crate::apply::apply_offsets;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::exec::{Backend, Executor, ScopedThreads};
use crate::local::scan_partitions;
use crate::offsets::derive_offsets;
use crate::op::{Combine, WrappingAdd};
use crate::partition::{normalize, Normalized};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Init,
    Partitioned,
    LocallyScanned,
    OffsetsReady,
    GloballyScanned,
}

impl Stage {
    pub const fn next(self) -> Option<Stage> {
        match self {
            Stage::Init => Some(Stage::Partitioned),
            Stage::Partitioned => Some(Stage::LocallyScanned),
            Stage::LocallyScanned => Some(Stage::OffsetsReady),
            Stage::OffsetsReady => Some(Stage::GloballyScanned),
            Stage::GloballyScanned => None,
        }
    }
}

/// Wall-clock time spent reaching each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub partition: Duration,
    pub local_scan: Duration,
    pub derive_offsets: Duration,
    pub apply_offsets: Duration,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.partition + self.local_scan + self.derive_offsets + self.apply_offsets
    }
}

/// Summary of one completed scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanReport {
    pub workers: Normalized,
    pub partitions: usize,
    /// Units of work handed to the executor across both parallel phases.
    pub tasks: usize,
    /// `GloballyScanned`, or `Partitioned` for an empty input.
    pub stage: Stage,
    pub timings: StageTimings,
}

struct Progress {
    stage: Stage,
    mark: Instant,
    timings: StageTimings,
}

impl Progress {
    fn new() -> Self {
        Self {
            stage: Stage::Init,
            mark: Instant::now(),
            timings: StageTimings::default(),
        }
    }

    fn advance(&mut self, to: Stage) {
        debug_assert_eq!(self.stage.next(), Some(to));

        let now = Instant::now();
        let elapsed = now - self.mark;
        self.mark = now;

        match to {
            Stage::Init => {}
            Stage::Partitioned => self.timings.partition = elapsed,
            Stage::LocallyScanned => self.timings.local_scan = elapsed,
            Stage::OffsetsReady => self.timings.derive_offsets = elapsed,
            Stage::GloballyScanned => self.timings.apply_offsets = elapsed,
        }

        log::trace!("scan stage {:?} -> {:?} ({:?})", self.stage, to, elapsed);
        self.stage = to;
    }
}

/// Runs scans on an owned executor.
///
/// Holding a [`WorkerPool`](crate::WorkerPool) here keeps its threads alive
/// across calls.
#[derive(Debug, Default)]
pub struct Scanner<E = Backend> {
    exec: E,
}

impl Scanner<Backend> {
    pub fn from_config(config: &ScanConfig) -> Result<Self, ScanError> {
        Ok(Self::new(config.executor()?))
    }
}

impl<E: Executor> Scanner<E> {
    pub fn new(exec: E) -> Self {
        Self { exec }
    }

    pub fn executor(&self) -> &E {
        &self.exec
    }

    /// Wrapping `i64` inclusive scan of `input` into `output`.
    pub fn scan(
        &self,
        input: &[i64],
        output: &mut [i64],
        workers: i32,
    ) -> Result<ScanReport, ScanError> {
        self.scan_with(&WrappingAdd, input, output, workers)
    }

    /// Inclusive scan of `input` into `output` under `op`.
    ///
    /// `workers` only affects how the work is split; the result is the same
    /// for every value. `output` must be as long as `input`.
    pub fn scan_with<T, O>(
        &self,
        op: &O,
        input: &[T],
        output: &mut [T],
        workers: i32,
    ) -> Result<ScanReport, ScanError>
    where
        T: Copy + Send + Sync,
        O: Combine<T>,
    {
        if input.len() != output.len() {
            return Err(ScanError::LengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }

        let mut progress = Progress::new();

        let normalized = normalize(workers, input.len());
        if let Some(clamp) = normalized.clamp {
            log::debug!("worker count normalized to {}: {:?}", normalized.workers, clamp);
        }
        let parts = normalized.partitions();
        progress.advance(Stage::Partitioned);

        if parts.is_empty() {
            return Ok(ScanReport {
                workers: normalized,
                partitions: 0,
                tasks: 0,
                stage: progress.stage,
                timings: progress.timings,
            });
        }

        let tails = scan_partitions(&self.exec, op, input, output, &parts)?;
        progress.advance(Stage::LocallyScanned);

        let offsets = derive_offsets(op, &tails);
        progress.advance(Stage::OffsetsReady);

        apply_offsets(&self.exec, op, output, &parts, &offsets)?;
        progress.advance(Stage::GloballyScanned);

        Ok(ScanReport {
            workers: normalized,
            partitions: parts.len(),
            tasks: 2 * parts.len() - 1,
            stage: progress.stage,
            timings: progress.timings,
        })
    }
}

/// Inclusive prefix sum of `input` into `output` using `workers` threads.
///
/// Threads are spawned per phase and joined before returning. Sums wrap on
/// overflow. An empty input is a no-op.
pub fn scan(input: &[i64], output: &mut [i64], workers: i32) -> Result<(), ScanError> {
    Scanner::new(ScopedThreads).scan(input, output, workers)?;
    Ok(())
}

//! Parallel prefix sum benchmark.
//!
//! Times the sequential scan against the chunked parallel scan for a range of
//! worker counts on seeded inputs, verifies every result, and reports the
//! fastest worker count relative to the hardware thread count.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use parscan::{
    available_workers, inclusive_scan, verify_inclusive, Backend, BackendKind, ScanConfig,
    Scanner, WrappingAdd,
};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Inputs are drawn uniformly from `1..=MAX_VALUE`.
const MAX_VALUE: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "prefix-sum", version, about = "Benchmark the chunked parallel inclusive scan")]
struct Cli {
    /// Input lengths to benchmark (comma separated)
    #[arg(long, value_delimiter = ',', default_values_t = vec![1_000_000usize, 10_000_000, 50_000_000])]
    sizes: Vec<usize>,

    /// Seed for the input generator
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Largest worker count to try (defaults to 4x the hardware threads)
    #[arg(long)]
    max_k: Option<usize>,

    /// Path to a TOML scan config
    #[arg(long, env = "PARSCAN_CONFIG")]
    config: Option<PathBuf>,

    /// Executor backend, overriding the config
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Scoped,
    Pool,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Scoped => BackendKind::Scoped,
            BackendArg::Pool => BackendKind::Pool,
        }
    }
}

/// Generate deterministic test data
fn generate_input(len: usize, seed: u64) -> Vec<i64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| (rng.next_u64() % MAX_VALUE) as i64 + 1)
        .collect()
}

/// Powers of two up to `max_k`, plus any `extra` counts, sorted and deduplicated.
fn k_candidates(max_k: usize, extra: &[usize]) -> Vec<usize> {
    let mut ks: Vec<usize> = std::iter::successors(Some(1usize), |k| k.checked_mul(2))
        .take_while(|&k| k <= max_k.max(1))
        .collect();
    ks.extend(extra.iter().copied().filter(|&k| k >= 1));
    ks.sort_unstable();
    ks.dedup();
    ks
}

fn timed<F: FnOnce() -> R, R>(f: F) -> (R, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

fn run_experiment(
    scanner: &Scanner<Backend>,
    size: usize,
    seed: u64,
    ks: &[usize],
    hw_threads: usize,
) -> Result<()> {
    println!();
    println!("{}", "=".repeat(58));
    println!("Data Size: {size}");
    println!("{}", "=".repeat(58));

    log::info!("generating {size} elements (seed {seed})");
    let input = generate_input(size, seed);
    let mut output = vec![0i64; size];

    let (_, seq_time) = timed(|| inclusive_scan(&WrappingAdd, &input, &mut output));
    println!("{:<20}: {:.3} ms", "Sequential", millis(seq_time));

    println!();
    println!("--- Custom Parallel Algorithm ---");
    println!("{:>10}{:>20}", "K", "Time (ms)");
    println!("{}", "-".repeat(30));

    let mut best: Option<(usize, Duration)> = None;
    for &k in ks {
        let workers = i32::try_from(k).with_context(|| format!("worker count {k} out of range"))?;
        output.fill(0);

        let (report, elapsed) = timed(|| scanner.scan(&input, &mut output, workers));
        let report = report.with_context(|| format!("scan with K={k} failed"))?;
        log::debug!("K={k}: {:?}", report.timings);

        if !verify_inclusive(&WrappingAdd, &input, &output) {
            bail!("scan with K={k} produced a wrong result for size {size}");
        }

        println!("{:>10}{:>20.3}", k, millis(elapsed));
        if best.map_or(true, |(_, t)| elapsed < t) {
            best = Some((k, elapsed));
        }
    }

    if let Some((best_k, best_time)) = best {
        println!();
        println!("Analysis:");
        println!("Best K: {best_k} ({:.3} ms)", millis(best_time));
        println!("Hardware Threads: {hw_threads}");
        println!(
            "Ratio (Best K / HW Threads): {:.3}",
            best_k as f64 / hw_threads as f64
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };
    if let Some(backend) = cli.backend {
        config.backend = backend.into();
    }

    let scanner = Scanner::from_config(&config).context("failed to build executor")?;

    let hw_threads = available_workers();
    let max_k = cli.max_k.unwrap_or(hw_threads * 4);
    let configured = usize::try_from(config.workers).unwrap_or(0);
    let ks = k_candidates(max_k, &[hw_threads, configured]);

    log::info!(
        "backend {:?}, {hw_threads} hardware threads, K candidates {ks:?}",
        config.backend
    );

    for &size in &cli.sizes {
        run_experiment(&scanner, size, cli.seed, &ks, hw_threads)?;
    }

    Ok(())
}

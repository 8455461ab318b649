//! Wall-clock timing of the full load → write → clear cycle.
//!
//! Unlike the criterion benches in `inibuf-core`, this runs against a real
//! file on disk and includes file-system cost in every iteration.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use inibuf_core::{ConfigStore, NullLogger, StoreOptions};
use tracing::{debug, info};

/// Result of one `inibuf bench` run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub iterations: u32,
    pub total: Duration,
    /// Sections seen in the input (constant across iterations).
    pub sections: usize,
}

impl BenchReport {
    pub fn mean(&self) -> Duration {
        self.total / self.iterations.max(1)
    }
}

/// Loads `input`, writes it to `output` and clears the store, `iterations`
/// times over a single store.
///
/// The store logs to a [`NullLogger`] so the timings are not dominated by
/// per-line debug records.
pub fn run_benchmark(
    input: &Path,
    output: &Path,
    iterations: u32,
    options: StoreOptions,
) -> Result<BenchReport> {
    if iterations == 0 {
        bail!("iteration count must be at least 1");
    }

    let mut store = ConfigStore::new()
        .with_options(options)
        .with_logger(NullLogger);
    let mut total = Duration::ZERO;
    let mut sections = 0;

    for round in 0..iterations {
        let started = Instant::now();
        store
            .load_file(input)
            .with_context(|| format!("failed to load {}", input.display()))?;
        sections = store.len();
        store
            .write_file(output)
            .with_context(|| format!("failed to write {}", output.display()))?;
        store.clear();
        let elapsed = started.elapsed();
        total += elapsed;
        debug!(
            round,
            elapsed_us = elapsed.as_micros() as u64,
            "iteration complete"
        );
    }

    let report = BenchReport {
        iterations,
        total,
        sections,
    };
    info!(
        iterations,
        sections,
        mean_us = report.mean().as_micros() as u64,
        "benchmark finished"
    );
    Ok(report)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

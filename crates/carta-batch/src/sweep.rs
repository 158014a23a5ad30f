//! λ-sweep: fan calibrations out across a grid of surface tensions.
//!
//! Each λ's calibration is inherently sequential (every bisection step
//! depends on the previous bound update), but different λ values are
//! mutually independent, so the sweep runs them on a Rayon pool and merges
//! the results in grid order. No lock is held beyond the order-preserving
//! collect; every solve owns its flow network exclusively.

use anyhow::{Context, Result};
use carta_algo::{calibrate, validate_lambda, CalibrationConfig, SearchResult};
use carta_core::{graph_stats, GraphData};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Sweep settings. `lambda_values` is the caller-supplied grid; every value
/// must lie in `[0, 1)` or the whole sweep fails up front.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Surface-tension grid to calibrate, one result per value
    pub lambda_values: Vec<f64>,
    /// Population share each calibration steers toward
    pub target_fraction: f64,
    /// Absolute tolerance on the achieved fraction
    pub tolerance: f64,
    /// Worker threads; 0 auto-detects the CPU count
    pub threads: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            lambda_values: Vec::new(),
            target_fraction: carta_algo::DEFAULT_TARGET_FRACTION,
            tolerance: carta_algo::DEFAULT_TOLERANCE,
            threads: 0,
        }
    }
}

/// One calibrated selection per λ, immutable once assembled.
///
/// `results[i]` belongs to `lambda_values[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepResult {
    /// The λ grid, in caller-supplied order
    pub lambda_values: Vec<f64>,
    /// One search outcome per grid entry
    pub results: Vec<SearchResult>,
    /// Sum of min-cut solves across all calibrations
    pub total_iterations: usize,
    /// True iff every λ converged
    pub all_converged: bool,
}

impl SweepResult {
    /// The search outcome for an exact λ grid value, if present.
    pub fn result_for(&self, lambda: f64) -> Option<&SearchResult> {
        self.lambda_values
            .iter()
            .position(|&l| l == lambda)
            .map(|i| &self.results[i])
    }
}

/// Calibrate every λ in the grid against the same graph.
///
/// Any λ outside `[0, 1)` fails the whole call before any solve. A per-λ
/// calibration that runs out of budget is recorded (its entry carries
/// `converged = false`, forcing `all_converged = false`) rather than
/// aborting the sweep; the caller decides whether a partially converged
/// sweep is usable.
pub fn run_sweep(graph: &GraphData, config: &SweepConfig) -> Result<SweepResult> {
    for &lambda in &config.lambda_values {
        validate_lambda(lambda)
            .with_context(|| format!("sweep rejected grid value lambda = {lambda}"))?;
    }

    if let Ok(stats) = graph_stats(graph) {
        info!(
            lambdas = config.lambda_values.len(),
            target_fraction = config.target_fraction,
            "sweeping {stats}"
        );
    }

    let thread_count = if config.threads == 0 {
        num_cpus::get()
    } else {
        config.threads
    };
    let pool = ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .context("building Rayon thread pool for the lambda sweep")?;

    let calibration = CalibrationConfig {
        target_fraction: config.target_fraction,
        tolerance: config.tolerance,
    };
    let results: Vec<SearchResult> = pool.install(|| {
        config
            .lambda_values
            .par_iter()
            .map(|&lambda| calibrate(&graph.attributes, &graph.edges, lambda, &calibration))
            .collect::<Result<Vec<_>, _>>()
    })?;

    let total_iterations = results.iter().map(|r| r.iterations).sum();
    let all_converged = results.iter().all(|r| r.converged);
    for (&lambda, result) in config.lambda_values.iter().zip(&results) {
        if !result.converged {
            warn!(
                lambda,
                fraction = result.result.population_fraction,
                "lambda entry did not converge"
            );
        }
    }
    info!(total_iterations, all_converged, "sweep finished");

    Ok(SweepResult {
        lambda_values: config.lambda_values.clone(),
        results,
        total_iterations,
        all_converged,
    })
}

//! μ-calibration: steering a selection toward a target population share.
//!
//! For a fixed surface tension λ, the population multiplier μ is the
//! Lagrange multiplier of the population-equality constraint. Calibration
//! runs a small state machine:
//!
//! | State | Work |
//! |-------|------|
//! | Bracketing | double `μ_hi` from [`INITIAL_MU_HI`] until the target fraction is straddled |
//! | Bisecting | halve the bracket, replacing the bound on the same side as the midpoint |
//! | Converged | terminal; the accepted solve satisfied the target |
//! | Failed | terminal; budget exhausted or the bracket collapsed on a discontinuity |
//!
//! Bisection is valid because the selected population fraction is
//! non-decreasing in μ (see the capacity formula in [`crate::flow`]). The
//! fraction is a step function, so a graph whose achievable fractions skip
//! the tolerance band around the target makes the bracket collapse to
//! machine precision without converging; that is reported as a
//! non-converged [`SearchResult`], never an endless loop.
//!
//! Every solve inside the loop is logged at `debug!`; a failed calibration
//! logs at `warn!`.

use crate::evaluate::{evaluate, OptimizationResult, DEFAULT_TARGET_FRACTION, DEFAULT_TOLERANCE};
use crate::flow::{build_flow_network, solve_min_cut, validate_lambda, FlowError};
use carta_core::GraphAttributes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// First upper bracket guess for μ. Doubling from here covers any graph
/// scale within [`MAX_BRACKET_DOUBLINGS`] steps.
pub const INITIAL_MU_HI: f64 = 1.0;

/// Hard ceiling on bracket doublings (2^64 × the initial guess).
pub const MAX_BRACKET_DOUBLINGS: usize = 64;

/// Hard ceiling on bisection steps per λ.
pub const MAX_BISECTIONS: usize = 100;

/// Error type for calibration operations.
#[derive(Debug, Error)]
pub enum CalibrationError {
    /// Invalid λ or μ, rejected before any solve
    #[error(transparent)]
    InvalidParameter(#[from] FlowError),
}

/// Per-call calibration parameters.
///
/// These are deliberately per-call rather than global so concurrent
/// calibrations with different targets stay composable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Population share to steer toward
    pub target_fraction: f64,
    /// Absolute tolerance on the achieved fraction
    pub tolerance: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            target_fraction: DEFAULT_TARGET_FRACTION,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Outcome of one λ's calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Snapshot at the accepted μ (the last midpoint solved when not
    /// converged)
    pub result: OptimizationResult,
    /// Number of min-cut solves spent
    pub iterations: usize,
    /// Whether the accepted solve satisfied the target
    pub converged: bool,
}

/// One full solve: build the network, cut it, summarize.
fn solve_at(
    attributes: &GraphAttributes,
    edges: &[(usize, usize)],
    lambda: f64,
    mu: f64,
    config: &CalibrationConfig,
) -> Result<OptimizationResult, FlowError> {
    let mut network = build_flow_network(attributes, edges, lambda, mu)?;
    let (partition, flow_value) = solve_min_cut(&mut network);
    Ok(evaluate(
        attributes,
        partition,
        lambda,
        mu,
        flow_value,
        config.target_fraction,
        config.tolerance,
    ))
}

/// Calibrate μ for one λ so the selected population share hits the target.
///
/// Returns `Err` only for invalid parameters; running out of iteration
/// budget is an expected condition reported as `converged = false` so a
/// sweep can record it per λ and carry on.
pub fn calibrate(
    attributes: &GraphAttributes,
    edges: &[(usize, usize)],
    lambda: f64,
    config: &CalibrationConfig,
) -> Result<SearchResult, CalibrationError> {
    validate_lambda(lambda)?;
    let mut iterations = 0usize;

    // Bracketing: μ = 0 pins the lower bound (empty selection, fraction 0).
    let lo = solve_at(attributes, edges, lambda, 0.0, config)?;
    iterations += 1;
    debug!(
        lambda,
        mu = 0.0,
        fraction = lo.population_fraction,
        "calibration bracket low"
    );
    if lo.satisfied_target {
        return Ok(SearchResult {
            result: lo,
            iterations,
            converged: true,
        });
    }

    let mut mu_lo = 0.0;
    let mut mu_hi = INITIAL_MU_HI;
    let mut hi = solve_at(attributes, edges, lambda, mu_hi, config)?;
    iterations += 1;
    let mut doublings = 0;
    while !hi.satisfied_target
        && hi.population_fraction < config.target_fraction
        && doublings < MAX_BRACKET_DOUBLINGS
    {
        // Monotonicity makes the old upper bound a valid lower bound.
        mu_lo = mu_hi;
        mu_hi *= 2.0;
        hi = solve_at(attributes, edges, lambda, mu_hi, config)?;
        iterations += 1;
        doublings += 1;
        debug!(
            lambda,
            mu = mu_hi,
            fraction = hi.population_fraction,
            "calibration bracket high"
        );
    }
    if hi.satisfied_target {
        return Ok(SearchResult {
            result: hi,
            iterations,
            converged: true,
        });
    }
    if hi.population_fraction < config.target_fraction {
        warn!(
            lambda,
            mu_hi,
            fraction = hi.population_fraction,
            "calibration could not bracket the target fraction"
        );
        return Ok(SearchResult {
            result: hi,
            iterations,
            converged: false,
        });
    }

    // Bisecting: fraction(μ_lo) < target ≤ fraction(μ_hi).
    let mut best = hi;
    for _ in 0..MAX_BISECTIONS {
        if mu_hi - mu_lo <= f64::EPSILON * mu_hi.max(1.0) {
            // Bracket collapsed to machine precision: the fraction jumps
            // discontinuously across the target band.
            break;
        }
        let mu_mid = 0.5 * (mu_lo + mu_hi);
        let mid = solve_at(attributes, edges, lambda, mu_mid, config)?;
        iterations += 1;
        debug!(
            lambda,
            mu = mu_mid,
            fraction = mid.population_fraction,
            "calibration bisect"
        );
        if mid.satisfied_target {
            return Ok(SearchResult {
                result: mid,
                iterations,
                converged: true,
            });
        }
        if mid.population_fraction < config.target_fraction {
            mu_lo = mu_mid;
        } else {
            mu_hi = mu_mid;
        }
        best = mid;
    }

    warn!(
        lambda,
        iterations, "calibration exhausted its budget without reaching tolerance"
    );
    Ok(SearchResult {
        result: best,
        iterations,
        converged: false,
    })
}

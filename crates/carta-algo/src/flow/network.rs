//! Two-terminal flow network encoding one `(λ, μ)` selection problem.
//!
//! The encoding follows the classic exact binary-labeling construction
//! (Greig-Porteous-Seheult, doi:10.1111/j.2517-6161.1989.tb01764.x): each
//! unit becomes an internal node between a source terminal `S` (unselected)
//! and a sink terminal `T` (selected), and a minimum S-T cut assigns every
//! unit to exactly one side while paying for the arcs it severs.
//!
//! # Capacity formula
//!
//! For unit `i` with area `a_i` and population `p_i`, and adjacency `(i, j)`
//! with boundary length `l_ij`:
//!
//! - t-link `S→i` with capacity `(1−λ)·a_i` — paid iff `i` is selected
//! - t-link `i→T` with capacity `μ·p_i` — paid iff `i` is unselected
//! - n-link `i↔j` with capacity `λ·rho·l_ij` per direction — paid once iff
//!   the adjacency is cut
//!
//! The minimum cut therefore minimizes
//! `(1−λ)·Σ_sel a + μ·Σ_unsel p + λ·rho·Σ_cut l`, which differs from the
//! Lagrangian `(1−λ)·Σ_sel a − μ·Σ_sel p + λ·rho·Σ_cut l` only by the
//! constant `μ·Σ p`. Raising `μ` makes leaving a unit unselected strictly
//! more expensive, so the selected population fraction is non-decreasing in
//! `μ`: at `μ = 0` the empty selection is optimal, and for `μ` large enough
//! the full selection is.
//!
//! Networks are transient: one is built fresh per solve, owned exclusively
//! by that solve, and never persisted.

use carta_core::GraphAttributes;
use thiserror::Error;

/// Error type for flow-network construction.
///
/// Parameter violations are programmer errors: they fail fast before any
/// solve and are never clamped.
#[derive(Debug, Error)]
pub enum FlowError {
    /// λ must lie in `[0, 1)`; λ = 1 removes the area term entirely, making
    /// the optimum independent of μ except at one discontinuous jump, which
    /// breaks the calibrator's bisection.
    #[error("surface tension lambda = {0} outside the half-open range [0, 1)")]
    LambdaOutOfRange(f64),

    /// μ is a reward multiplier and must be non-negative.
    #[error("population multiplier mu = {0} is negative")]
    NegativeMu(f64),
}

/// One directed residual arc. `rev` indexes the paired reverse arc inside
/// the target node's adjacency list.
#[derive(Debug, Clone)]
pub(crate) struct Arc {
    pub(crate) to: usize,
    pub(crate) rev: usize,
    pub(crate) capacity: f64,
}

/// A capacitated two-terminal graph for one `(λ, μ)` solve.
///
/// Nodes `0..num_units` are units; the source terminal (unselected side)
/// and sink terminal (selected side) occupy the last two slots.
#[derive(Debug)]
pub struct FlowNetwork {
    pub(crate) arcs: Vec<Vec<Arc>>,
    num_units: usize,
}

impl FlowNetwork {
    fn with_units(num_units: usize) -> Self {
        Self {
            arcs: vec![Vec::new(); num_units + 2],
            num_units,
        }
    }

    /// Number of internal (unit) nodes.
    pub fn num_units(&self) -> usize {
        self.num_units
    }

    /// Node id of the source terminal `S` (unselected side).
    pub fn source(&self) -> usize {
        self.num_units
    }

    /// Node id of the sink terminal `T` (selected side).
    pub fn sink(&self) -> usize {
        self.num_units + 1
    }

    /// Total node count including both terminals.
    pub fn num_nodes(&self) -> usize {
        self.num_units + 2
    }

    /// Total directed arc count (residual pairs count as two).
    pub fn num_arcs(&self) -> usize {
        self.arcs.iter().map(|a| a.len()).sum()
    }

    /// Add a directed arc with a zero-capacity residual partner.
    fn add_arc(&mut self, from: usize, to: usize, capacity: f64) {
        let rev_from = self.arcs[to].len();
        let rev_to = self.arcs[from].len();
        self.arcs[from].push(Arc {
            to,
            rev: rev_from,
            capacity,
        });
        self.arcs[to].push(Arc {
            to: from,
            rev: rev_to,
            capacity: 0.0,
        });
    }

    /// Add a symmetric arc pair carrying `capacity` in both directions.
    ///
    /// One residual pair suffices: the reverse arc doubles as the opposite
    /// direction's forward arc.
    fn add_symmetric_arc(&mut self, a: usize, b: usize, capacity: f64) {
        let rev_a = self.arcs[b].len();
        let rev_b = self.arcs[a].len();
        self.arcs[a].push(Arc {
            to: b,
            rev: rev_a,
            capacity,
        });
        self.arcs[b].push(Arc {
            to: a,
            rev: rev_b,
            capacity,
        });
    }
}

/// Check that a surface-tension value lies in the supported `[0, 1)` range.
pub fn validate_lambda(lambda: f64) -> Result<(), FlowError> {
    if !(0.0..1.0).contains(&lambda) {
        return Err(FlowError::LambdaOutOfRange(lambda));
    }
    Ok(())
}

/// Build the flow network for one `(λ, μ)` solve.
///
/// Preconditions: `lambda ∈ [0, 1)` and `mu ≥ 0`; violations are rejected
/// before any arc is created. The adjacency invariants of
/// [`GraphAttributes`] (symmetric positive lengths for every edge) are
/// assumed to hold — they are established upstream and not re-checked here.
///
/// The returned network is owned solely by the caller of this solve; no
/// global state is touched.
pub fn build_flow_network(
    attributes: &GraphAttributes,
    edges: &[(usize, usize)],
    lambda: f64,
    mu: f64,
) -> Result<FlowNetwork, FlowError> {
    validate_lambda(lambda)?;
    if mu < 0.0 {
        return Err(FlowError::NegativeMu(mu));
    }

    let num_units = attributes.num_units();
    let mut network = FlowNetwork::with_units(num_units);
    let source = network.source();
    let sink = network.sink();

    // t-links: area cost toward selection, population reward toward it
    for unit in 0..num_units {
        let area_cost = (1.0 - lambda) * attributes.area[unit].value();
        let population_reward = mu * attributes.population[unit] as f64;
        network.add_arc(source, unit, area_cost);
        network.add_arc(unit, sink, population_reward);
    }

    // n-links: disagreement across a shared boundary
    for &(a, b) in edges {
        if let Some(length) = attributes.boundary_length(a, b) {
            let capacity = lambda * attributes.rho * length.value();
            network.add_symmetric_arc(a, b, capacity);
        }
    }

    Ok(network)
}

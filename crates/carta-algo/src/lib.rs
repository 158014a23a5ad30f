//! # carta-algo: Exact Graph-Cut Selection over Geographic Units
//!
//! This crate selects a subset of geographic units capturing a target share
//! of total population while minimizing a weighted trade-off between
//! selected land area and the length of the boundary separating selected
//! from unselected units.
//!
//! ## Pipeline
//!
//! One solve at fixed `(λ, μ)` runs three stages:
//!
//! | Stage | Entry point | Work |
//! |-------|-------------|------|
//! | Build | [`flow::build_flow_network`] | encode `(λ, μ)` as a two-terminal capacitated graph |
//! | Cut | [`flow::solve_min_cut`] | exact max-flow / min-cut (Dinic) |
//! | Summarize | [`evaluate::evaluate`] | population/area sums and target check |
//!
//! The outer [`calibrate::calibrate`] loop binary-searches μ until the
//! selected population fraction is within tolerance of the target
//! (default 50% ± 1%), relying on the fraction being non-decreasing in μ.
//!
//! ## Parameters
//!
//! - **λ (surface tension)** ∈ `[0, 1)`: trades area-minimization (λ→0)
//!   against boundary-length-minimization (λ→1). λ = 1 is rejected
//!   outright: with the area term gone the optimum no longer responds to μ
//!   except at a single discontinuous jump, so calibration cannot bisect.
//! - **μ** ≥ 0: Lagrange multiplier rewarding selected population,
//!   calibrated per λ rather than supplied by callers.
//!
//! Both are explicit function parameters everywhere; no solve reads shared
//! or global state, so independent solves can run concurrently without
//! coordination.
//!
//! ## Example
//!
//! ```
//! use carta_algo::{calibrate, CalibrationConfig};
//! use carta_core::{GraphAttributes, Meters, SquareMeters};
//!
//! // Three units in a row; unit 2 holds half the population.
//! let mut attributes = GraphAttributes::new(
//!     vec![100, 200, 300],
//!     vec![SquareMeters(10.0); 3],
//!     1.0,
//! );
//! attributes.insert_edge_length(0, 1, Meters(1.0));
//! attributes.insert_edge_length(1, 2, Meters(1.0));
//! let edges = vec![(0, 1), (1, 2)];
//!
//! let search = calibrate(&attributes, &edges, 0.0, &CalibrationConfig::default()).unwrap();
//! assert!(search.converged);
//! assert_eq!(search.result.selected_population, 300);
//! ```

pub mod calibrate;
pub mod evaluate;
pub mod flow;
pub mod test_utils;

pub use calibrate::{
    calibrate, CalibrationConfig, CalibrationError, SearchResult, INITIAL_MU_HI,
    MAX_BISECTIONS, MAX_BRACKET_DOUBLINGS,
};
pub use evaluate::{
    evaluate, satisfies_target, OptimizationResult, DEFAULT_TARGET_FRACTION, DEFAULT_TOLERANCE,
};
pub use flow::{build_flow_network, solve_min_cut, validate_lambda, FlowError, FlowNetwork};

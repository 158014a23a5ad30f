//! Flow-network construction and exact s-t min-cut.
//!
//! A selection problem over `(λ, μ)` is encoded as a two-terminal
//! capacitated graph ([`network`]) and solved exactly with Dinic's max-flow
//! algorithm ([`dinic`]); the minimum cut is the optimal binary labeling by
//! max-flow/min-cut duality.

pub mod dinic;
pub mod network;

pub use dinic::solve_min_cut;
pub use network::{build_flow_network, validate_lambda, FlowError, FlowNetwork};

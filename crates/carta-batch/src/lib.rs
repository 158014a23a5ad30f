//! # carta-batch: λ-Sweep Orchestration and Result Persistence
//!
//! Drives the [`carta_algo`] calibrator across a caller-supplied grid of
//! surface-tension values and persists the aggregated outcome for reuse
//! without recomputation.
//!
//! - [`sweep::run_sweep`] fans independent calibrations out on a Rayon
//!   thread pool, one per λ, and merges them into a [`sweep::SweepResult`].
//! - [`store::ResultStore`] serializes a sweep to one JSON file per
//!   configuration key and loads it back field-for-field identical.
//!
//! ## Example
//!
//! ```no_run
//! use carta_batch::{run_sweep, ResultStore, SweepConfig};
//! use carta_core::{GraphAttributes, GraphData, Meters, SquareMeters};
//!
//! let mut attributes = GraphAttributes::new(
//!     vec![100, 200, 300],
//!     vec![SquareMeters(10.0); 3],
//!     1.0,
//! );
//! attributes.insert_edge_length(0, 1, Meters(1.0));
//! attributes.insert_edge_length(1, 2, Meters(1.0));
//! let graph = GraphData::new(vec![(0, 1), (1, 2)], attributes);
//!
//! let config = SweepConfig {
//!     lambda_values: vec![0.0, 0.25, 0.5, 0.75],
//!     ..SweepConfig::default()
//! };
//! let sweep = run_sweep(&graph, &config)?;
//!
//! let store = ResultStore::new("out/sweeps");
//! store.save("acs-2020_grid-default", &sweep)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod store;
pub mod sweep;

pub use store::{ResultStore, StoreError};
pub use sweep::{run_sweep, SweepConfig, SweepResult};

//! # carta-core: Geographic Adjacency Graph Core
//!
//! Provides the fundamental data structures for graph-cut selection over
//! geographic units.
//!
//! ## Design Philosophy
//!
//! A study region is modeled as a **weighted undirected adjacency graph**:
//! - **Units**: smallest indexed geographic areas, carrying a population
//!   count and a land area
//! - **Adjacencies**: unordered pairs of units sharing a boundary, carrying
//!   the length of that shared boundary
//!
//! Units are identified by dense integer indices `0..N-1`, assigned upstream
//! by the graph-construction collaborator. The dense indexing enables:
//! - Flat `Vec` attribute storage with O(1) access in solver hot loops
//! - Direct mapping between units and flow-network nodes
//! - Compact boolean selection vectors
//!
//! ## Quick Start
//!
//! ```rust
//! use carta_core::{GraphAttributes, GraphData, Meters, SquareMeters};
//!
//! // Three units in a row: 0 - 1 - 2
//! let mut attributes = GraphAttributes::new(
//!     vec![100, 200, 300],
//!     vec![SquareMeters(10.0); 3],
//!     1.0,
//! );
//! attributes.insert_edge_length(0, 1, Meters(1.0));
//! attributes.insert_edge_length(1, 2, Meters(1.0));
//!
//! let graph = GraphData::new(vec![(0, 1), (1, 2)], attributes);
//! assert_eq!(graph.num_nodes, 3);
//! assert_eq!(graph.num_edges, 2);
//! assert_eq!(graph.attributes.total_population(), 600);
//! ```
//!
//! ## Core Data Structures
//!
//! - [`GraphData`] - Adjacency graph plus per-unit attributes, read-only
//!   once constructed
//! - [`GraphAttributes`] - Population, area, boundary-cost coefficient, and
//!   symmetric edge lengths
//! - [`Partition`] - Dense boolean selection vector, write-once per solve
//! - Unit newtypes: [`SquareMeters`], [`Meters`]
//!
//! ## Modules
//!
//! - [`diagnostics`] - Issue collection for intake checks
//! - [`graph_utils`] - Topological analysis (components, degree stats)
//! - [`error`] - Unified error type
//!
//! ## Integration
//!
//! An upstream ingestion collaborator constructs [`GraphData`] from cleaned
//! geometries and hands it to the optimizer crates, which treat it as
//! read-only. The solve path assumes the invariants documented on
//! [`GraphAttributes`] already hold; [`GraphData::validate_into`] exists for
//! callers that want an explicit intake check before committing to a sweep.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod diagnostics;
pub mod error;
pub mod graph_utils;
pub mod units;

pub use diagnostics::{DiagnosticIssue, Diagnostics, Severity};
pub use error::{CartaError, CartaResult};
pub use graph_utils::*;
pub use units::{Meters, SquareMeters};

/// Immutable per-unit and per-adjacency attributes of a study region.
///
/// Invariants assumed by the optimizer (established upstream, checkable via
/// [`GraphData::validate_into`]):
/// - `population.len() == area.len()`
/// - `area[i] > 0` for every unit
/// - every adjacency edge has the same length recorded under both orderings
#[derive(Debug, Clone)]
pub struct GraphAttributes {
    /// Resident population per unit (dense, indexed by unit)
    pub population: Vec<u64>,
    /// Land area per unit (dense, indexed by unit)
    pub area: Vec<SquareMeters>,
    /// Boundary-cost coefficient applied to every cut adjacency
    pub rho: f64,
    /// Shared boundary length per adjacency, stored under both orderings
    edge_lengths: HashMap<(usize, usize), Meters>,
}

impl GraphAttributes {
    /// Create attributes with no adjacency lengths recorded yet.
    ///
    /// `population` and `area` must be equally long; both are indexed by
    /// unit.
    pub fn new(population: Vec<u64>, area: Vec<SquareMeters>, rho: f64) -> Self {
        debug_assert_eq!(population.len(), area.len());
        Self {
            population,
            area,
            rho,
            edge_lengths: HashMap::new(),
        }
    }

    /// Number of units covered by these attributes.
    pub fn num_units(&self) -> usize {
        self.population.len()
    }

    /// Record the shared boundary length of an adjacency.
    ///
    /// The length is stored under both orderings of the pair so lookups are
    /// direction-independent.
    pub fn insert_edge_length(&mut self, a: usize, b: usize, length: Meters) {
        self.edge_lengths.insert((a, b), length);
        self.edge_lengths.insert((b, a), length);
    }

    /// Shared boundary length of an adjacency, if recorded.
    pub fn boundary_length(&self, a: usize, b: usize) -> Option<Meters> {
        self.edge_lengths.get(&(a, b)).copied()
    }

    /// Total resident population across all units.
    pub fn total_population(&self) -> u64 {
        self.population.iter().sum()
    }

    /// Total land area across all units.
    pub fn total_area(&self) -> SquareMeters {
        self.area.iter().copied().sum()
    }
}

/// The adjacency graph of a study region.
///
/// Constructed once by the upstream ingestion collaborator and read-only
/// from then on. `edges` holds each adjacency as one unordered pair; the
/// matching boundary lengths live in [`GraphAttributes`].
#[derive(Debug, Clone)]
pub struct GraphData {
    /// Adjacency edges as unordered unit pairs
    pub edges: Vec<(usize, usize)>,
    /// Per-unit and per-adjacency attributes
    pub attributes: GraphAttributes,
    /// Number of units (`== attributes.num_units()`)
    pub num_nodes: usize,
    /// Number of adjacency edges (`== edges.len()`)
    pub num_edges: usize,
}

impl GraphData {
    /// Bundle edges and attributes, deriving the counts.
    pub fn new(edges: Vec<(usize, usize)>, attributes: GraphAttributes) -> Self {
        let num_nodes = attributes.num_units();
        let num_edges = edges.len();
        Self {
            edges,
            attributes,
            num_nodes,
            num_edges,
        }
    }

    /// Check the documented invariants and report violations.
    ///
    /// Populates the provided `Diagnostics` with any warnings/errors found.
    /// This is an explicit intake check for callers; the solve path never
    /// runs it and assumes a clean graph.
    pub fn validate_into(&self, diag: &mut Diagnostics) {
        if self.num_nodes == 0 {
            diag.add_error("structure", "graph has no units");
            return; // Can't check further
        }

        if self.attributes.population.len() != self.attributes.area.len() {
            diag.add_error(
                "attribute",
                &format!(
                    "population ({}) and area ({}) vectors differ in length",
                    self.attributes.population.len(),
                    self.attributes.area.len()
                ),
            );
        }

        for (i, area) in self.attributes.area.iter().enumerate() {
            if area.value() <= 0.0 {
                diag.add_error_with_entity(
                    "attribute",
                    "unit has non-positive area",
                    &format!("unit {}", i),
                );
            }
        }

        for &(a, b) in &self.edges {
            if a >= self.num_nodes || b >= self.num_nodes {
                diag.add_error_with_entity(
                    "reference",
                    "edge endpoint out of range",
                    &format!("edge {}-{}", a, b),
                );
                continue;
            }
            match (
                self.attributes.boundary_length(a, b),
                self.attributes.boundary_length(b, a),
            ) {
                (Some(fwd), Some(rev)) if fwd == rev => {
                    if fwd.value() <= 0.0 {
                        diag.add_error_with_entity(
                            "attribute",
                            "adjacency has non-positive boundary length",
                            &format!("edge {}-{}", a, b),
                        );
                    }
                }
                (Some(_), Some(_)) => {
                    diag.add_error_with_entity(
                        "attribute",
                        "adjacency length differs between orderings",
                        &format!("edge {}-{}", a, b),
                    );
                }
                _ => {
                    diag.add_error_with_entity(
                        "attribute",
                        "adjacency has no recorded boundary length",
                        &format!("edge {}-{}", a, b),
                    );
                }
            }
        }

        if self.edges.is_empty() && self.num_nodes > 1 {
            diag.add_warning("structure", "graph has multiple units but no adjacencies");
        }
    }

    /// Run the intake check and fail if any invariant is violated.
    ///
    /// Convenience wrapper over [`GraphData::validate_into`] for callers
    /// that only need a pass/fail answer.
    pub fn validate(&self) -> CartaResult<()> {
        let mut diag = Diagnostics::new();
        self.validate_into(&mut diag);
        if diag.has_errors() {
            let details: Vec<String> = diag.errors().map(|i| i.to_string()).collect();
            return Err(CartaError::Validation(format!(
                "{} invariant violations: {}",
                diag.error_count(),
                details.join("; ")
            )));
        }
        Ok(())
    }
}

/// A binary selection over the units of a graph.
///
/// `true` marks a unit as selected (assigned to the T terminal of the cut).
/// A partition is allocated once per solve, never mutated after
/// construction, and moved forward into the result snapshot; two solves
/// never alias the same vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Partition(Vec<bool>);

impl Partition {
    /// Wrap a finished selection vector.
    pub fn from_selected(selected: Vec<bool>) -> Self {
        Self(selected)
    }

    /// Number of units covered.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the partition covers no units at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the given unit is selected.
    pub fn is_selected(&self, unit: usize) -> bool {
        self.0[unit]
    }

    /// Number of selected units.
    pub fn num_selected(&self) -> usize {
        self.0.iter().filter(|&&s| s).count()
    }

    /// Iterate over the selection flags in unit order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Borrow the underlying selection flags.
    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path_graph() -> GraphData {
        let mut attributes = GraphAttributes::new(
            vec![100, 200, 300],
            vec![SquareMeters(10.0); 3],
            1.0,
        );
        attributes.insert_edge_length(0, 1, Meters(1.0));
        attributes.insert_edge_length(1, 2, Meters(1.0));
        GraphData::new(vec![(0, 1), (1, 2)], attributes)
    }

    #[test]
    fn test_graph_construction() {
        let graph = path_graph();
        assert_eq!(graph.num_nodes, 3);
        assert_eq!(graph.num_edges, 2);
        assert_eq!(graph.attributes.total_population(), 600);
        assert_eq!(graph.attributes.total_area(), SquareMeters(30.0));
    }

    #[test]
    fn test_edge_lengths_are_symmetric() {
        let graph = path_graph();
        assert_eq!(
            graph.attributes.boundary_length(0, 1),
            graph.attributes.boundary_length(1, 0)
        );
        assert_eq!(graph.attributes.boundary_length(0, 2), None);
    }

    #[test]
    fn test_validate_clean_graph() {
        let graph = path_graph();
        let mut diag = Diagnostics::new();
        graph.validate_into(&mut diag);
        assert!(!diag.has_errors());
    }

    #[test]
    fn test_validate_empty_graph() {
        let graph = GraphData::new(vec![], GraphAttributes::new(vec![], vec![], 1.0));
        let mut diag = Diagnostics::new();
        graph.validate_into(&mut diag);
        assert!(diag.has_errors());
        assert!(diag.errors().any(|i| i.message.contains("no units")));
    }

    #[test]
    fn test_validate_bad_area() {
        let mut attributes =
            GraphAttributes::new(vec![10, 20], vec![SquareMeters(5.0), SquareMeters(0.0)], 1.0);
        attributes.insert_edge_length(0, 1, Meters(1.0));
        let graph = GraphData::new(vec![(0, 1)], attributes);
        let mut diag = Diagnostics::new();
        graph.validate_into(&mut diag);
        assert!(diag
            .errors()
            .any(|i| i.message.contains("non-positive area")));
    }

    #[test]
    fn test_validate_wrapper_maps_to_validation_error() {
        let graph = path_graph();
        assert!(graph.validate().is_ok());

        let bad = GraphData::new(
            vec![(0, 7)],
            GraphAttributes::new(vec![10, 20], vec![SquareMeters(5.0); 2], 1.0),
        );
        match bad.validate() {
            Err(CartaError::Validation(message)) => {
                assert!(message.contains("invariant violations"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_out_of_range_endpoint() {
        let attributes = GraphAttributes::new(vec![10, 20], vec![SquareMeters(5.0); 2], 1.0);
        let graph = GraphData::new(vec![(0, 7)], attributes);
        let mut diag = Diagnostics::new();
        graph.validate_into(&mut diag);
        assert!(diag.errors().any(|i| i.message.contains("out of range")));
    }

    #[test]
    fn test_validate_missing_edge_length() {
        let attributes = GraphAttributes::new(vec![10, 20], vec![SquareMeters(5.0); 2], 1.0);
        let graph = GraphData::new(vec![(0, 1)], attributes);
        let mut diag = Diagnostics::new();
        graph.validate_into(&mut diag);
        assert!(diag
            .errors()
            .any(|i| i.message.contains("no recorded boundary length")));
    }

    #[test]
    fn test_partition_accessors() {
        let partition = Partition::from_selected(vec![true, false, true]);
        assert_eq!(partition.len(), 3);
        assert_eq!(partition.num_selected(), 2);
        assert!(partition.is_selected(0));
        assert!(!partition.is_selected(1));
        let flags: Vec<bool> = partition.iter().collect();
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_partition_serde_roundtrip() {
        let partition = Partition::from_selected(vec![false, true, false]);
        let json = serde_json::to_string(&partition).unwrap();
        assert_eq!(json, "[false,true,false]");
        let back: Partition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, partition);
    }
}

//! Summary statistics for one solved partition.
//!
//! Pure and O(N): sums the selected side's population and area, derives the
//! population fraction, and records whether the selection satisfies the
//! calibration target. No side effects; the partition is moved into the
//! immutable snapshot and never aliased by another solve.

use carta_core::{GraphAttributes, Partition, SquareMeters};
use serde::{Deserialize, Serialize};

/// Default population share the calibrator steers toward.
pub const DEFAULT_TARGET_FRACTION: f64 = 0.5;

/// Default tolerance on the population fraction, absolute.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Immutable snapshot of one `(λ, μ)` solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// The optimal selection (`true` = selected)
    pub partition: Partition,
    /// Resident population of the selected units
    pub selected_population: u64,
    /// Land area of the selected units
    pub selected_area: SquareMeters,
    /// Resident population of the whole graph
    pub total_population: u64,
    /// Land area of the whole graph
    pub total_area: SquareMeters,
    /// `selected_population / total_population` (0 when the graph is empty)
    pub population_fraction: f64,
    /// Whether the fraction lies within tolerance of the target
    pub satisfied_target: bool,
    /// Surface tension the network was built with
    pub lambda: f64,
    /// Population multiplier the network was built with
    pub mu: f64,
    /// Maximum flow = cut capacity = minimized energy at `(λ, μ)`
    pub flow_value: f64,
}

/// Whether a population fraction satisfies the calibration target.
pub fn satisfies_target(population_fraction: f64, target_fraction: f64, tolerance: f64) -> bool {
    (population_fraction - target_fraction).abs() <= tolerance
}

/// Derive the summary snapshot for one solved partition.
///
/// Takes ownership of the partition; it is frozen inside the returned
/// result.
pub fn evaluate(
    attributes: &GraphAttributes,
    partition: Partition,
    lambda: f64,
    mu: f64,
    flow_value: f64,
    target_fraction: f64,
    tolerance: f64,
) -> OptimizationResult {
    let mut selected_population = 0u64;
    let mut selected_area = SquareMeters(0.0);
    for (unit, selected) in partition.iter().enumerate() {
        if selected {
            selected_population += attributes.population[unit];
            selected_area = selected_area + attributes.area[unit];
        }
    }

    let total_population = attributes.total_population();
    let total_area = attributes.total_area();
    let population_fraction = if total_population == 0 {
        0.0
    } else {
        selected_population as f64 / total_population as f64
    };

    OptimizationResult {
        partition,
        selected_population,
        selected_area,
        total_population,
        total_area,
        population_fraction,
        satisfied_target: satisfies_target(population_fraction, target_fraction, tolerance),
        lambda,
        mu,
        flow_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carta_core::{GraphAttributes, SquareMeters};

    fn attributes() -> GraphAttributes {
        GraphAttributes::new(
            vec![100, 200, 300],
            vec![SquareMeters(1.0), SquareMeters(2.0), SquareMeters(3.0)],
            1.0,
        )
    }

    #[test]
    fn test_empty_selection() {
        let result = evaluate(
            &attributes(),
            Partition::from_selected(vec![false; 3]),
            0.0,
            0.0,
            0.0,
            DEFAULT_TARGET_FRACTION,
            DEFAULT_TOLERANCE,
        );
        assert_eq!(result.selected_population, 0);
        assert_eq!(result.population_fraction, 0.0);
        assert_eq!(result.selected_area, SquareMeters(0.0));
        assert!(!result.satisfied_target);
    }

    #[test]
    fn test_half_population_selection() {
        // Unit 2 alone carries exactly half the population
        let result = evaluate(
            &attributes(),
            Partition::from_selected(vec![false, false, true]),
            0.25,
            0.01,
            4.2,
            DEFAULT_TARGET_FRACTION,
            DEFAULT_TOLERANCE,
        );
        assert_eq!(result.selected_population, 300);
        assert_eq!(result.total_population, 600);
        assert_eq!(result.population_fraction, 0.5);
        assert_eq!(result.selected_area, SquareMeters(3.0));
        assert_eq!(result.total_area, SquareMeters(6.0));
        assert!(result.satisfied_target);
        assert_eq!(result.lambda, 0.25);
        assert_eq!(result.mu, 0.01);
        assert_eq!(result.flow_value, 4.2);
    }

    #[test]
    fn test_satisfied_iff_within_tolerance() {
        assert!(satisfies_target(0.5, 0.5, 0.01));
        assert!(satisfies_target(0.51, 0.5, 0.01));
        assert!(satisfies_target(0.49, 0.5, 0.01));
        assert!(!satisfies_target(0.52, 0.5, 0.01));
        assert!(!satisfies_target(0.48, 0.5, 0.01));
        assert!(satisfies_target(0.3, 0.25, 0.05));
    }

    #[test]
    fn test_empty_graph_fraction_is_zero() {
        let empty = GraphAttributes::new(vec![], vec![], 1.0);
        let result = evaluate(
            &empty,
            Partition::from_selected(vec![]),
            0.0,
            0.0,
            0.0,
            DEFAULT_TARGET_FRACTION,
            DEFAULT_TOLERANCE,
        );
        assert_eq!(result.population_fraction, 0.0);
    }
}

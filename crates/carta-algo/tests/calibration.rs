//! End-to-end calibration behavior on small hand-built graphs.

use carta_algo::test_utils::{cut_capacity, grid_units, path_units};
use carta_algo::{
    build_flow_network, calibrate, evaluate, solve_min_cut, CalibrationConfig, FlowError,
};

/// Three units with populations [100, 200, 300] on a path, equal areas and
/// boundary lengths.
fn three_unit_path() -> (carta_core::GraphAttributes, Vec<(usize, usize)>) {
    path_units(&[100, 200, 300], 10.0, 1.0, 1.0)
}

#[test]
fn mu_zero_selects_nothing() {
    let (attributes, edges) = three_unit_path();
    for lambda in [0.0, 0.3, 0.7, 0.99] {
        let mut network = build_flow_network(&attributes, &edges, lambda, 0.0).unwrap();
        let (partition, flow_value) = solve_min_cut(&mut network);
        let result = evaluate(&attributes, partition, lambda, 0.0, flow_value, 0.5, 0.01);
        assert_eq!(result.selected_population, 0, "lambda = {}", lambda);
        assert_eq!(result.population_fraction, 0.0);
    }
}

#[test]
fn large_mu_selects_everything() {
    let (attributes, edges) = three_unit_path();
    for lambda in [0.0, 0.5, 0.99] {
        let mut network = build_flow_network(&attributes, &edges, lambda, 1000.0).unwrap();
        let (partition, flow_value) = solve_min_cut(&mut network);
        let result = evaluate(&attributes, partition, lambda, 1000.0, flow_value, 0.5, 0.01);
        assert_eq!(result.selected_population, 600, "lambda = {}", lambda);
        assert_eq!(result.population_fraction, 1.0);
    }
}

#[test]
fn population_fraction_is_monotone_in_mu() {
    let (attributes, edges) = grid_units(4, 3, 1.0);
    for lambda in [0.0, 0.3, 0.6] {
        let mut previous = -1.0;
        for step in 0..40 {
            let mu = step as f64 * 0.025;
            let mut network = build_flow_network(&attributes, &edges, lambda, mu).unwrap();
            let (partition, flow_value) = solve_min_cut(&mut network);
            let result = evaluate(&attributes, partition, lambda, mu, flow_value, 0.5, 0.01);
            assert!(
                result.population_fraction >= previous,
                "fraction dropped from {} to {} at lambda = {}, mu = {}",
                previous,
                result.population_fraction,
                lambda,
                mu
            );
            previous = result.population_fraction;
        }
    }
}

#[test]
fn calibration_hits_half_population_on_three_unit_path() {
    let (attributes, edges) = three_unit_path();
    for lambda in [0.0, 0.5] {
        let search = calibrate(&attributes, &edges, lambda, &CalibrationConfig::default())
            .unwrap();
        assert!(search.converged, "lambda = {}", lambda);
        let fraction = search.result.population_fraction;
        assert!(
            (fraction - 0.5).abs() <= 0.01,
            "fraction {} off target at lambda = {}",
            fraction,
            lambda
        );
        // Selecting unit 2 alone gives exactly 300 of 600
        assert_eq!(search.result.selected_population, 300);
    }
}

#[test]
fn flow_value_equals_crossing_capacity() {
    let (attributes, edges) = grid_units(3, 3, 2.0);
    for (lambda, mu) in [(0.0, 0.02), (0.4, 0.05), (0.8, 0.1), (0.5, 0.0)] {
        let mut network = build_flow_network(&attributes, &edges, lambda, mu).unwrap();
        let (partition, flow_value) = solve_min_cut(&mut network);
        let crossing = cut_capacity(&attributes, &edges, &partition, lambda, mu);
        assert!(
            (flow_value - crossing).abs() < 1e-9,
            "flow {} vs crossing capacity {} at lambda = {}, mu = {}",
            flow_value,
            crossing,
            lambda,
            mu
        );
    }
}

#[test]
fn lambda_one_is_rejected_everywhere() {
    let (attributes, edges) = three_unit_path();
    assert!(matches!(
        build_flow_network(&attributes, &edges, 1.0, 0.1),
        Err(FlowError::LambdaOutOfRange(_))
    ));
    assert!(calibrate(&attributes, &edges, 1.0, &CalibrationConfig::default()).is_err());
}

#[test]
fn partitions_are_reproducible_across_runs() {
    let (attributes, edges) = grid_units(4, 4, 1.0);
    let first = calibrate(&attributes, &edges, 0.3, &CalibrationConfig::default()).unwrap();
    let second = calibrate(&attributes, &edges, 0.3, &CalibrationConfig::default()).unwrap();
    assert_eq!(first, second);
}

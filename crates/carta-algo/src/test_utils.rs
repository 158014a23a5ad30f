//! Deterministic fixtures shared by unit and integration tests.

use carta_core::{GraphAttributes, Meters, Partition, SquareMeters};

/// A path of units `0 - 1 - ... - n-1` with the given populations, uniform
/// area per unit, and uniform boundary length per adjacency.
pub fn path_units(
    populations: &[u64],
    area: f64,
    edge_length: f64,
    rho: f64,
) -> (GraphAttributes, Vec<(usize, usize)>) {
    let n = populations.len();
    let mut attributes = GraphAttributes::new(
        populations.to_vec(),
        vec![SquareMeters(area); n],
        rho,
    );
    let mut edges = Vec::with_capacity(n.saturating_sub(1));
    for i in 1..n {
        attributes.insert_edge_length(i - 1, i, Meters(edge_length));
        edges.push((i - 1, i));
    }
    (attributes, edges)
}

/// A `width × height` grid of units with population `(index + 1) * 10`,
/// uniform area 5.0 m², and unit boundary lengths. Row-major indexing.
pub fn grid_units(width: usize, height: usize, rho: f64) -> (GraphAttributes, Vec<(usize, usize)>) {
    let n = width * height;
    let populations: Vec<u64> = (0..n).map(|i| (i as u64 + 1) * 10).collect();
    let mut attributes =
        GraphAttributes::new(populations, vec![SquareMeters(5.0); n], rho);
    let mut edges = Vec::new();
    for row in 0..height {
        for col in 0..width {
            let unit = row * width + col;
            if col + 1 < width {
                attributes.insert_edge_length(unit, unit + 1, Meters(1.0));
                edges.push((unit, unit + 1));
            }
            if row + 1 < height {
                attributes.insert_edge_length(unit, unit + width, Meters(1.0));
                edges.push((unit, unit + width));
            }
        }
    }
    (attributes, edges)
}

/// Independently sum the original capacities of arcs crossing a partition:
/// area t-links of selected units, population t-links of unselected units,
/// and one boundary n-link per cut adjacency. Equals the max-flow value of
/// an exact solve by min-cut duality.
pub fn cut_capacity(
    attributes: &GraphAttributes,
    edges: &[(usize, usize)],
    partition: &Partition,
    lambda: f64,
    mu: f64,
) -> f64 {
    let mut capacity = 0.0;
    for unit in 0..attributes.num_units() {
        if partition.is_selected(unit) {
            capacity += (1.0 - lambda) * attributes.area[unit].value();
        } else {
            capacity += mu * attributes.population[unit] as f64;
        }
    }
    for &(a, b) in edges {
        if partition.is_selected(a) != partition.is_selected(b) {
            if let Some(length) = attributes.boundary_length(a, b) {
                capacity += lambda * attributes.rho * length.value();
            }
        }
    }
    capacity
}

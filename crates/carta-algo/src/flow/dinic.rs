//! Exact s-t max-flow / min-cut via Dinic's algorithm.
//!
//! Level graphs are built with breadth-first search from the source, then a
//! blocking flow is pushed along admissible arcs with an iterative
//! depth-first walk (an explicit path stack, so deep augmenting chains over
//! tens of thousands of units cannot overflow the call stack). The
//! algorithm terminates with the exact maximum flow, and by
//! max-flow/min-cut duality the units unreachable from the source in the
//! final residual graph form the optimal selected side.
//!
//! # Determinism and tie-breaking
//!
//! Arc order is fixed by network build order and the search uses no
//! randomness, so identical inputs reproduce the partition bit-for-bit.
//! The returned cut is the source-side-minimal minimum cut: a unit is
//! reported unselected iff the residual graph still connects it to the
//! source. On exact capacity ties (several minimum cuts of equal value)
//! this resolves toward *selected*, because a saturated terminal arc
//! disconnects its unit from the source.

use super::network::FlowNetwork;
use carta_core::Partition;
use std::collections::VecDeque;

/// Residual capacities at or below this threshold count as saturated.
/// Guards the float arithmetic against augmenting vanishing residuals
/// forever.
const RESIDUAL_EPS: f64 = 1e-9;

/// Compute the exact minimum S-T cut of a flow network.
///
/// Consumes the network's capacities (they become residuals). Returns the
/// optimal partition (`true` = selected, i.e. on the sink side) and the
/// maximum flow value, which equals the cut capacity and thus the minimized
/// energy for the `(λ, μ)` the network encodes.
pub fn solve_min_cut(network: &mut FlowNetwork) -> (Partition, f64) {
    let num_nodes = network.num_nodes();
    let source = network.source();
    let sink = network.sink();
    let mut level = vec![-1i32; num_nodes];
    let mut iter = vec![0usize; num_nodes];
    let mut flow_value = 0.0;

    loop {
        bfs_levels(network, source, &mut level);
        if level[sink] < 0 {
            break;
        }
        iter.fill(0);
        flow_value += blocking_flow(network, source, sink, &mut level, &mut iter);
    }

    // The final BFS left level[v] >= 0 exactly for nodes the residual graph
    // still connects to the source: the unselected side of the cut.
    let selected: Vec<bool> = (0..network.num_units()).map(|unit| level[unit] < 0).collect();
    (Partition::from_selected(selected), flow_value)
}

/// Label nodes with their BFS distance from the source through residual
/// arcs; unreachable nodes stay at -1.
fn bfs_levels(network: &FlowNetwork, source: usize, level: &mut [i32]) {
    level.fill(-1);
    level[source] = 0;
    let mut queue = VecDeque::new();
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        for arc in &network.arcs[v] {
            if arc.capacity > RESIDUAL_EPS && level[arc.to] < 0 {
                level[arc.to] = level[v] + 1;
                queue.push_back(arc.to);
            }
        }
    }
}

/// Push a blocking flow through the current level graph.
///
/// The path stack holds the nodes of the current partial augmenting path;
/// the arc in use out of `path[k]` is `arcs[path[k]][iter[path[k]]]`.
fn blocking_flow(
    network: &mut FlowNetwork,
    source: usize,
    sink: usize,
    level: &mut [i32],
    iter: &mut [usize],
) -> f64 {
    let mut total = 0.0;
    let mut path: Vec<usize> = vec![source];

    while let Some(&u) = path.last() {
        if u == sink {
            // Bottleneck over the arcs currently in use along the path
            let mut pushed = f64::INFINITY;
            for &v in &path[..path.len() - 1] {
                pushed = pushed.min(network.arcs[v][iter[v]].capacity);
            }
            for &v in &path[..path.len() - 1] {
                let (to, rev) = {
                    let arc = &network.arcs[v][iter[v]];
                    (arc.to, arc.rev)
                };
                network.arcs[v][iter[v]].capacity -= pushed;
                network.arcs[to][rev].capacity += pushed;
            }
            total += pushed;

            // Retreat to the shallowest node whose in-use arc saturated;
            // its iterator still points at that arc and will advance past
            // it on the next admissibility check.
            let mut keep = path.len() - 1;
            for (idx, &v) in path[..path.len() - 1].iter().enumerate() {
                if network.arcs[v][iter[v]].capacity <= RESIDUAL_EPS {
                    keep = idx;
                    break;
                }
            }
            path.truncate(keep + 1);
            continue;
        }

        // Advance along the next admissible arc out of u
        let mut advanced = false;
        while iter[u] < network.arcs[u].len() {
            let arc = &network.arcs[u][iter[u]];
            if arc.capacity > RESIDUAL_EPS && level[arc.to] == level[u] + 1 {
                path.push(arc.to);
                advanced = true;
                break;
            }
            iter[u] += 1;
        }
        if !advanced {
            // Dead end: u leaves the level graph for this phase
            level[u] = -1;
            path.pop();
            if let Some(&parent) = path.last() {
                iter[parent] += 1;
            }
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::network::build_flow_network;
    use carta_core::{GraphAttributes, Meters, SquareMeters};

    #[test]
    fn test_single_unit_cheap_reward_stays_unselected() {
        // mu * pop = 1 < (1 - lambda) * area = 10: severing the sink arc is
        // cheaper, the unit stays with the source.
        let attributes = GraphAttributes::new(vec![100], vec![SquareMeters(10.0)], 1.0);
        let mut network = build_flow_network(&attributes, &[], 0.0, 0.01).unwrap();
        let (partition, flow_value) = solve_min_cut(&mut network);
        assert!(!partition.is_selected(0));
        assert!((flow_value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_unit_large_reward_gets_selected() {
        // mu * pop = 100 > area = 10: severing the source arc is cheaper.
        let attributes = GraphAttributes::new(vec![100], vec![SquareMeters(10.0)], 1.0);
        let mut network = build_flow_network(&attributes, &[], 0.0, 1.0).unwrap();
        let (partition, flow_value) = solve_min_cut(&mut network);
        assert!(partition.is_selected(0));
        assert!((flow_value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_exact_tie_resolves_selected() {
        // mu * pop == area exactly: both terminal arcs saturate, the unit
        // is cut off from the source and reported selected.
        let attributes = GraphAttributes::new(vec![10], vec![SquareMeters(10.0)], 1.0);
        let mut network = build_flow_network(&attributes, &[], 0.0, 1.0).unwrap();
        let (partition, flow_value) = solve_min_cut(&mut network);
        assert!(partition.is_selected(0));
        assert!((flow_value - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_term_holds_neighbors_together() {
        // Unit 1 carries all the population. Without the n-link it would be
        // selected alone; a strong boundary penalty makes the lone-unit cut
        // more expensive than selecting nothing.
        let mut attributes =
            GraphAttributes::new(vec![0, 100], vec![SquareMeters(1.0); 2], 1.0);
        attributes.insert_edge_length(0, 1, Meters(100.0));
        let edges = vec![(0, 1)];

        // Weak boundary (lambda small): unit 1 selected alone.
        let mut weak = build_flow_network(&attributes, &edges, 0.001, 0.05).unwrap();
        let (partition, _) = solve_min_cut(&mut weak);
        assert!(!partition.is_selected(0));
        assert!(partition.is_selected(1));

        // Strong boundary (lambda = 0.9): cutting the 100 m boundary costs
        // 90, so unit 0 is dragged along instead; selecting both costs only
        // the residual area term 0.1 * 2.
        let mut strong = build_flow_network(&attributes, &edges, 0.9, 0.05).unwrap();
        let (partition, flow_value) = solve_min_cut(&mut strong);
        assert_eq!(partition.num_selected(), 2);
        assert!((flow_value - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_determinism() {
        let mut attributes =
            GraphAttributes::new(vec![50, 80, 10], vec![SquareMeters(3.0); 3], 1.5);
        attributes.insert_edge_length(0, 1, Meters(2.0));
        attributes.insert_edge_length(1, 2, Meters(4.0));
        let edges = vec![(0, 1), (1, 2)];

        let mut first = build_flow_network(&attributes, &edges, 0.4, 0.03).unwrap();
        let (partition_a, flow_a) = solve_min_cut(&mut first);
        let mut second = build_flow_network(&attributes, &edges, 0.4, 0.03).unwrap();
        let (partition_b, flow_b) = solve_min_cut(&mut second);
        assert_eq!(partition_a, partition_b);
        assert_eq!(flow_a, flow_b);
    }
}

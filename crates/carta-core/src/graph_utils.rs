use crate::GraphData;
use anyhow::Result;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::{HashSet, VecDeque};

/// Summary statistics for an adjacency graph (density/degree/connected components).
#[derive(Debug)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub connected_components: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
}

impl std::fmt::Display for GraphStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} units, {} adjacencies, {} components, degree {}..{} (avg {:.1})",
            self.node_count,
            self.edge_count,
            self.connected_components,
            self.min_degree,
            self.max_degree,
            self.avg_degree
        )
    }
}

/// Island summary (standard components approach, see doi:10.1016/S0378-3758(96)00112-0).
#[derive(Debug)]
pub struct IslandSummary {
    pub island_id: usize,
    pub unit_count: usize,
}

/// Per-unit component assignment so callers can tag every unit with its island.
#[derive(Debug)]
pub struct UnitAssignment {
    pub unit: usize,
    pub island_id: usize,
}

/// Aggregated island analysis result.
#[derive(Debug)]
pub struct IslandAnalysis {
    pub islands: Vec<IslandSummary>,
    pub assignments: Vec<UnitAssignment>,
}

/// Build a petgraph view of the adjacency structure, dense unit index as node weight.
fn build_petgraph(graph: &GraphData) -> UnGraph<usize, ()> {
    let mut pg = UnGraph::<usize, ()>::with_capacity(graph.num_nodes, graph.num_edges);
    let indices: Vec<NodeIndex> = (0..graph.num_nodes).map(|unit| pg.add_node(unit)).collect();
    for &(a, b) in &graph.edges {
        if a < graph.num_nodes && b < graph.num_nodes {
            pg.add_edge(indices[a], indices[b], ());
        }
    }
    pg
}

/// Calculates graph-level statistics such as density, degree distribution, and
/// component counts (classic network science measures).
pub fn graph_stats(graph: &GraphData) -> Result<GraphStats> {
    let pg = build_petgraph(graph);
    let node_count = pg.node_count();
    let edge_count = pg.edge_count();
    let mut degrees = Vec::with_capacity(node_count);
    for node in pg.node_indices() {
        degrees.push(pg.neighbors(node).count());
    }
    let min_degree = *degrees.iter().min().unwrap_or(&0);
    let max_degree = *degrees.iter().max().unwrap_or(&0);
    let avg_degree = if node_count == 0 {
        0.0
    } else {
        degrees.iter().copied().sum::<usize>() as f64 / node_count as f64
    };
    let density = if node_count < 2 {
        0.0
    } else {
        2.0 * edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    };
    let connected_components = connected_components(&pg);
    Ok(GraphStats {
        node_count,
        edge_count,
        connected_components,
        min_degree,
        avg_degree,
        max_degree,
        density,
    })
}

/// Labels connected components (breadth-first search) and pulls island
/// metadata so callers can spot disconnected study regions before a sweep.
pub fn find_islands(graph: &GraphData) -> Result<IslandAnalysis> {
    let pg = build_petgraph(graph);
    let mut visited = HashSet::new();
    let mut islands = Vec::new();
    let mut assignments = Vec::new();
    let mut island_id = 0;
    for start in pg.node_indices() {
        if visited.contains(&start) {
            continue;
        }
        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut members = Vec::new();
        while let Some(node) = queue.pop_front() {
            if !visited.insert(node) {
                continue;
            }
            members.push(node);
            for neighbor in pg.neighbors(node) {
                if !visited.contains(&neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }
        if members.is_empty() {
            continue;
        }
        islands.push(IslandSummary {
            island_id,
            unit_count: members.len(),
        });
        for node in members {
            assignments.push(UnitAssignment {
                unit: pg[node],
                island_id,
            });
        }
        island_id += 1;
    }
    assignments.sort_by_key(|assignment| assignment.unit);
    Ok(IslandAnalysis {
        islands,
        assignments,
    })
}

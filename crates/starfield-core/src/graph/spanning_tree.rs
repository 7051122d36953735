//! Minimum spanning tree over a constellation's stars.
//!
//! Prim's algorithm from star 0 with the dense O(n²) frontier scan; star
//! counts are capped by sampling so the quadratic cost stays trivial.

use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::UnGraph;

use crate::config::Star;

fn distance(a: &Star, b: &Star) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Connect `stars` into a minimum spanning tree.
///
/// Each step adds the globally nearest unconnected star. Ties go to the lower
/// connected index, then the lower candidate index, so the edge list is
/// reproducible. Returns `(from, to)` pairs where `from` was already connected.
pub fn build_connections(stars: &[Star]) -> Vec<(usize, usize)> {
    let n = stars.len();
    if n <= 1 {
        return Vec::new();
    }

    let mut connected = vec![false; n];
    connected[0] = true;
    // best[j] = (distance to nearest connected star, that star's index)
    let mut best: Vec<(f64, usize)> = (0..n).map(|j| (distance(&stars[0], &stars[j]), 0)).collect();
    let mut edges = Vec::with_capacity(n - 1);

    while edges.len() < n - 1 {
        let mut pick: Option<usize> = None;
        for j in 0..n {
            if connected[j] {
                continue;
            }
            pick = match pick {
                None => Some(j),
                Some(p) => {
                    let (dj, fj) = best[j];
                    let (dp, fp) = best[p];
                    if dj < dp || (dj == dp && fj < fp) {
                        Some(j)
                    } else {
                        Some(p)
                    }
                }
            };
        }
        let Some(next) = pick else { break };

        connected[next] = true;
        edges.push((best[next].1, next));

        for j in 0..n {
            if connected[j] {
                continue;
            }
            let d = distance(&stars[next], &stars[j]);
            if d < best[j].0 || (d == best[j].0 && next < best[j].1) {
                best[j] = (d, next);
            }
        }
    }

    edges
}

/// True when `edges` connect all `node_count` nodes with no cycle and every
/// index is in range.
pub fn is_spanning_tree(node_count: usize, edges: &[(usize, usize)]) -> bool {
    if node_count <= 1 {
        return edges.is_empty();
    }
    if edges.len() != node_count - 1 {
        return false;
    }
    if edges
        .iter()
        .any(|&(a, b)| a >= node_count || b >= node_count || a == b)
    {
        return false;
    }

    let mut graph: UnGraph<(), ()> = UnGraph::with_capacity(node_count, edges.len());
    let nodes: Vec<_> = (0..node_count).map(|_| graph.add_node(())).collect();
    for &(a, b) in edges {
        graph.add_edge(nodes[a], nodes[b], ());
    }

    connected_components(&graph) == 1 && !is_cyclic_undirected(&graph)
}

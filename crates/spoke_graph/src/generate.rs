//! Random compute graphs for training episodes.
//!
//! Graphs are drawn from the growing-network model: nodes arrive one at a
//! time and each new node sends a single edge to an earlier node picked with
//! probability proportional to that node's current degree. The result is a
//! tree-shaped DAG whose edges point from newer to older nodes, so node 0
//! is always the unique sink.

use crate::graph::ComputeGraph;
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::Rng;
use spoke_common::ConfigError;

/// Node counts an episode graph is drawn from.
pub const EPISODE_GRAPH_SIZES: [usize; 4] = [10, 15, 20, 25];

/// Builds a growing-network DAG with `num_nodes` nodes.
pub fn random_growing_network<R: Rng + ?Sized>(
    num_nodes: usize,
    rng: &mut R,
) -> Result<ComputeGraph, ConfigError> {
    let mut edges: Vec<(u32, u32)> = Vec::with_capacity(num_nodes.saturating_sub(1));
    let mut degree: Vec<u32> = Vec::with_capacity(num_nodes);

    if num_nodes >= 2 {
        edges.push((1, 0));
        degree.extend([1, 1]);
    }
    for source in 2..num_nodes {
        // every existing node has degree >= 1, so the weights are never all zero
        let target = match WeightedIndex::new(&degree) {
            Ok(dist) => dist.sample(rng),
            Err(_) => 0,
        };
        edges.push((source as u32, target as u32));
        degree.push(1);
        degree[target] += 1;
    }

    ComputeGraph::with_nodes(num_nodes, &edges)
}

/// Draws an episode graph, picking its size from [`EPISODE_GRAPH_SIZES`].
pub fn random_episode_graph<R: Rng + ?Sized>(rng: &mut R) -> Result<ComputeGraph, ConfigError> {
    let num_nodes = EPISODE_GRAPH_SIZES
        .choose(rng)
        .copied()
        .unwrap_or(EPISODE_GRAPH_SIZES[0]);
    random_growing_network(num_nodes, rng)
}

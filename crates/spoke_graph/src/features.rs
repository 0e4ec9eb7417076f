//! Per-node observation features.
//!
//! Each node is described by the positional encoding of its topological
//! rank, written as the two-axis point `(rank, -rank)`, followed by an equally
//! wide block of standard normal noise. The noise lets a policy tell apart
//! nodes that share a rank; its source is always the caller's rng, so a fixed
//! seed reproduces the same features.

use crate::graph::ComputeGraph;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use spoke_common::{positional_encoding, ConfigError, FeatureMatrix, ENCODING_BASE};

/// Builds a `node_count x graph_feat_size` feature matrix for `graph`.
///
/// `graph_feat_size` must be a positive multiple of 4: half of it holds the
/// rank encoding (two axes), the other half holds `N(0, 1)` noise.
pub fn node_features<R: Rng + ?Sized>(
    graph: &ComputeGraph,
    graph_feat_size: usize,
    rng: &mut R,
) -> Result<FeatureMatrix, ConfigError> {
    if graph_feat_size == 0 || graph_feat_size % 4 != 0 {
        return Err(ConfigError::FeatureSize {
            what: "graph",
            size: graph_feat_size,
            multiple: 4,
        });
    }

    let mut rank_points = vec![vec![0.0, 0.0]; graph.node_count()];
    for (rank, level) in graph.topological_levels().iter().enumerate() {
        for node in level {
            rank_points[node.index()] = vec![rank as f64, -(rank as f64)];
        }
    }

    let encoding = positional_encoding(&rank_points, graph_feat_size / 4, ENCODING_BASE);
    let mut noise = FeatureMatrix::zeros(encoding.rows(), encoding.cols());
    for r in 0..noise.rows() {
        for slot in noise.row_mut(r) {
            *slot = StandardNormal.sample(rng);
        }
    }

    Ok(encoding.hconcat(&noise))
}

//! Compute graphs for the Spoke placement simulator.
//!
//! A [`ComputeGraph`] is an immutable DAG of operation nodes with a dense
//! [`NodeId`](spoke_common::NodeId) space. It answers predecessor queries and
//! exposes ascending and descending topological levels (Kahn frontiers),
//! which the simulator sweeps in order.
//!
//! # Architecture
//!
//! - [`graph`] — the DAG itself, backed by `petgraph`
//! - [`generate`] — random growing-network DAGs for training episodes
//! - [`features`] — per-node observation features (rank encoding + noise)

#![warn(missing_docs)]

pub mod features;
pub mod generate;
pub mod graph;

pub use features::node_features;
pub use generate::{random_episode_graph, random_growing_network, EPISODE_GRAPH_SIZES};
pub use graph::ComputeGraph;

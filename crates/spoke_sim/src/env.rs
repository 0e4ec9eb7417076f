//! Episode wrapper around the simulator.
//!
//! A [`PlacementEnv`] owns a device, the current compute graph and its
//! observation features. Each [`step`](PlacementEnv::step) takes one flat
//! coordinate index per node, simulates, and hands back per-node rewards.

use crate::assignment::Assignment;
use crate::readiness::RewardVector;
use crate::report::report_outcome;
use crate::simulate::{simulate, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use spoke_common::{ConfigError, FeatureMatrix, ValidationError};
use spoke_diagnostics::DiagnosticSink;
use spoke_graph::{node_features, random_episode_graph, ComputeGraph};
use spoke_topology::Topology;

/// Seed of the rng that draws feature noise for a fixed graph.
pub const FIXED_FEATURE_SEED: u64 = 0;

/// Where each episode's compute graph comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphSource {
    /// The same graph every episode, with reproducible feature noise.
    Fixed {
        /// Edge sources.
        src: Vec<u32>,
        /// Edge destinations.
        dst: Vec<u32>,
    },
    /// A fresh growing-network graph every episode.
    Random,
}

/// What a policy sees at the start of an episode.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    /// The current compute graph.
    pub graph: &'a ComputeGraph,
    /// One feature row per node.
    pub node_features: &'a FeatureMatrix,
    /// One feature row per device coordinate, in flat-index order.
    pub device_encoding: &'a FeatureMatrix,
}

/// Placement episodes over one device.
#[derive(Debug)]
pub struct PlacementEnv {
    source: GraphSource,
    topology: Topology,
    graph_feat_size: usize,
    rng: StdRng,
    device_encoding: FeatureMatrix,
    graph: ComputeGraph,
    node_features: FeatureMatrix,
    last: Option<Simulation>,
}

impl PlacementEnv {
    /// Builds the environment and its first graph.
    ///
    /// `device_feat_size` must be a positive multiple of 3 and
    /// `graph_feat_size` a positive multiple of 4.
    pub fn new(
        source: GraphSource,
        topology: Topology,
        device_feat_size: usize,
        graph_feat_size: usize,
        mut rng: StdRng,
    ) -> Result<Self, ConfigError> {
        if device_feat_size == 0 || device_feat_size % 3 != 0 {
            return Err(ConfigError::FeatureSize {
                what: "device",
                size: device_feat_size,
                multiple: 3,
            });
        }
        let device_encoding = topology.encoding(device_feat_size / 3);
        let (graph, node_features) = build_graph(&source, graph_feat_size, &mut rng)?;
        Ok(Self {
            source,
            topology,
            graph_feat_size,
            rng,
            device_encoding,
            graph,
            node_features,
            last: None,
        })
    }

    /// The current observation.
    pub fn obs(&self) -> Observation<'_> {
        Observation {
            graph: &self.graph,
            node_features: &self.node_features,
            device_encoding: &self.device_encoding,
        }
    }

    /// Starts a new episode with a regenerated graph.
    pub fn reset(&mut self) -> Result<Observation<'_>, ConfigError> {
        let (graph, node_features) = build_graph(&self.source, self.graph_feat_size, &mut self.rng)?;
        self.graph = graph;
        self.node_features = node_features;
        self.last = None;
        Ok(self.obs())
    }

    /// Places every node at the given flat coordinate index and simulates.
    ///
    /// `-1` leaves a node unplaced. Outcome diagnostics go to `sink`. On a
    /// validation error the environment is left unchanged.
    pub fn step(
        &mut self,
        actions: &[i64],
        sink: &DiagnosticSink,
    ) -> Result<RewardVector, ValidationError> {
        let assignment = Assignment::from_flat_indices(actions, &self.topology)?;
        let sim = simulate(&self.graph, &self.topology, &assignment)?;
        report_outcome(&sim, &assignment, &self.topology, sink);
        let rewards = sim.rewards.clone();
        self.graph.annotate_placements(assignment.into_placements())?;
        self.last = Some(sim);
        Ok(rewards)
    }

    /// The device.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The current compute graph.
    pub fn graph(&self) -> &ComputeGraph {
        &self.graph
    }

    /// The simulation from the latest step of this episode.
    pub fn last_simulation(&self) -> Option<&Simulation> {
        self.last.as_ref()
    }
}

fn build_graph(
    source: &GraphSource,
    graph_feat_size: usize,
    rng: &mut StdRng,
) -> Result<(ComputeGraph, FeatureMatrix), ConfigError> {
    match source {
        GraphSource::Fixed { src, dst } => {
            let graph = ComputeGraph::from_edges(src, dst)?;
            let mut noise = StdRng::seed_from_u64(FIXED_FEATURE_SEED);
            let features = node_features(&graph, graph_feat_size, &mut noise)?;
            Ok((graph, features))
        }
        GraphSource::Random => {
            let graph = random_episode_graph(rng)?;
            let features = node_features(&graph, graph_feat_size, rng)?;
            Ok((graph, features))
        }
    }
}

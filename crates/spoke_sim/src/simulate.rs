//! The readiness sweep.
//!
//! Nodes are visited once, in ascending topological order. A placed node
//! whose predecessors are all ready waits for the slowest of them plus the
//! transfer latency; the resulting arrival time must then fall on the node's
//! own spoke, modulo the spoke count, or the node is infeasible. Any node
//! downstream of an unplaced or infeasible node is itself left unplaced.

use crate::assignment::Assignment;
use crate::readiness::{Readiness, ReadinessVector, RewardVector};
use rayon::prelude::*;
use spoke_common::{NodeId, ValidationError};
use spoke_graph::ComputeGraph;
use spoke_topology::{Placement, Topology};

/// Cycles a node spends computing once its inputs have arrived.
pub const PROCESSING_TIME: i64 = 4;

/// Result of one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulation {
    /// Terminal state of every node.
    pub readiness: ReadinessVector,
    /// Reward of every node, derived from `readiness`.
    pub rewards: RewardVector,
    arrivals: Vec<Option<i64>>,
}

impl Simulation {
    /// Time at which the last input of `node` arrived.
    ///
    /// `None` for nodes that were never evaluated: unplaced or blocked by a
    /// predecessor. Source nodes report `Some(0)`.
    pub fn arrival(&self, node: NodeId) -> Option<i64> {
        self.arrivals.get(node.index()).copied().flatten()
    }

    /// Splits the simulation into readiness and rewards.
    pub fn into_parts(self) -> (ReadinessVector, RewardVector) {
        (self.readiness, self.rewards)
    }
}

/// Simulates one assignment on `graph` and `topology`.
///
/// The assignment is validated before anything is computed. The sweep
/// itself is total: every node ends up in exactly one [`Readiness`] state.
pub fn simulate(
    graph: &ComputeGraph,
    topology: &Topology,
    assignment: &Assignment,
) -> Result<Simulation, ValidationError> {
    let n = graph.node_count();
    assignment.validate(n, topology)?;

    let mut states = vec![Readiness::Unplaced; n];
    let mut arrivals = vec![None; n];

    for node in graph.topological_order() {
        let Placement::Placed(dst) = assignment[node.index()] else {
            continue;
        };

        let mut arrival = 0i64;
        let mut blocked = false;
        for pred in graph.predecessors(node) {
            match (states[pred.index()], assignment[pred.index()]) {
                (Readiness::Ready(t), Placement::Placed(src)) => {
                    arrival = arrival.max(t + topology.latency(src, dst));
                }
                _ => {
                    blocked = true;
                    break;
                }
            }
        }
        if blocked {
            continue;
        }

        arrivals[node.index()] = Some(arrival);
        states[node.index()] = if arrival == 0 {
            Readiness::Ready(PROCESSING_TIME)
        } else if arrival.rem_euclid(i64::from(topology.spokes())) == i64::from(dst.spoke) {
            Readiness::Ready(arrival + PROCESSING_TIME)
        } else {
            Readiness::Infeasible
        };
    }

    let readiness = ReadinessVector::new(states);
    let rewards = readiness.rewards(topology.max_dist());
    Ok(Simulation {
        readiness,
        rewards,
        arrivals,
    })
}

/// Simulates many independent assignments against the same graph and device.
///
/// Results come back in input order; each assignment is validated on its own.
pub fn simulate_batch(
    graph: &ComputeGraph,
    topology: &Topology,
    assignments: &[Assignment],
) -> Vec<Result<Simulation, ValidationError>> {
    assignments
        .par_iter()
        .map(|a| simulate(graph, topology, a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoke_topology::Coordinate;

    const SRC: [u32; 11] = [0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];
    const DST: [u32; 11] = [1, 2, 3, 4, 5, 6, 7, 7, 8, 8, 9];

    fn graph() -> ComputeGraph {
        ComputeGraph::from_edges(&SRC, &DST).unwrap()
    }

    fn topo() -> Topology {
        Topology::new(4, 4, 3, false).unwrap()
    }

    /// A placement of the ten-node graph on 4x4x3 where every node is ready.
    fn feasible() -> Vec<Placement> {
        [
            (0, 0, 0),
            (0, 1, 2),
            (1, 0, 2),
            (1, 1, 2),
            (0, 2, 1),
            (2, 0, 1),
            (1, 2, 1),
            (2, 1, 0),
            (2, 2, 2),
            (3, 2, 1),
        ]
        .into_iter()
        .map(|(r, c, s)| Placement::Placed(Coordinate::new(r, c, s)))
        .collect()
    }

    fn ready(times: &[i64]) -> Vec<Readiness> {
        times.iter().map(|&t| Readiness::Ready(t)).collect()
    }

    #[test]
    fn all_ready_chain() {
        let a = Assignment::from_placements(feasible());
        let sim = simulate(&graph(), &topo(), &a).unwrap();
        assert_eq!(
            sim.readiness.as_slice(),
            ready(&[4, 9, 9, 12, 14, 14, 17, 25, 30, 35]).as_slice()
        );
        assert!(sim.readiness.all_ready());
        assert_eq!(sim.rewards[0], 10.6);
        assert_eq!(sim.rewards[9], 7.5);
    }

    #[test]
    fn arrival_takes_slowest_predecessor() {
        let a = Assignment::from_placements(feasible());
        let sim = simulate(&graph(), &topo(), &a).unwrap();
        // node 7 hears from node 4 at 14 + 7 and from node 5 at 14 + 1
        assert_eq!(sim.arrival(NodeId::from_raw(7)), Some(21));
        assert_eq!(sim.arrival(NodeId::from_raw(0)), Some(0));
    }

    #[test]
    fn unplaced_sink_scores_zero() {
        let mut p = feasible();
        p[9] = Placement::Unplaced;
        let sim = simulate(&graph(), &topo(), &Assignment::from_placements(p)).unwrap();
        assert_eq!(sim.readiness[9], Readiness::Unplaced);
        assert_eq!(sim.rewards[9], 0.0);
        assert_eq!(sim.readiness[8], Readiness::Ready(30));
        assert_eq!(sim.arrival(NodeId::from_raw(9)), None);
    }

    #[test]
    fn wrong_spoke_is_infeasible_and_blocks_descendants() {
        let mut p = feasible();
        p[1] = Coordinate::new(0, 1, 0).into();
        let sim = simulate(&graph(), &topo(), &Assignment::from_placements(p)).unwrap();
        assert_eq!(sim.readiness[1], Readiness::Infeasible);
        assert_eq!(sim.rewards[1], -1.0);
        for blocked in [4, 7, 8, 9] {
            assert_eq!(sim.readiness[blocked], Readiness::Unplaced, "node {blocked}");
            assert_eq!(sim.rewards[blocked], 0.0);
        }
        assert_eq!(sim.readiness[6], Readiness::Ready(17));
    }

    #[test]
    fn unplaced_predecessor_blocks() {
        let mut p = feasible();
        p[0] = Placement::Unplaced;
        let sim = simulate(&graph(), &topo(), &Assignment::from_placements(p)).unwrap();
        assert!(sim.readiness.iter().all(|r| r == Readiness::Unplaced));
        assert_eq!(sim.rewards.total(), 0.0);
    }

    #[test]
    fn colocated_nodes_use_negative_latency() {
        let g = ComputeGraph::from_edges(&[0], &[1]).unwrap();
        let c = Coordinate::new(0, 0, 0);
        let sim = simulate(&g, &topo(), &Assignment::from_placements(vec![c.into(), c.into()]))
            .unwrap();
        assert_eq!(sim.arrival(NodeId::from_raw(1)), Some(3));
        assert_eq!(sim.readiness[1], Readiness::Ready(7));
    }

    #[test]
    fn cross_connected_latency() {
        let g = ComputeGraph::from_edges(&[0], &[1]).unwrap();
        let t = Topology::new(1, 4, 3, true).unwrap();
        let a = Assignment::from_placements(vec![
            Coordinate::new(0, 0, 0).into(),
            Coordinate::new(0, 3, 2).into(),
        ]);
        let sim = simulate(&g, &t, &a).unwrap();
        assert_eq!(sim.readiness[1], Readiness::Ready(12));
        assert_eq!(sim.rewards[1], (8.0 * 2.0 - 12.0) / 2.0);
    }

    #[test]
    fn sources_ignore_their_spoke() {
        let g = ComputeGraph::with_nodes(3, &[]).unwrap();
        let a = Assignment::from_placements(vec![
            Coordinate::new(0, 0, 0).into(),
            Coordinate::new(1, 1, 1).into(),
            Coordinate::new(3, 3, 2).into(),
        ]);
        let sim = simulate(&g, &topo(), &a).unwrap();
        assert_eq!(sim.readiness.as_slice(), ready(&[4, 4, 4]).as_slice());
    }

    #[test]
    fn ready_times_increase_along_edges() {
        let a = Assignment::from_placements(feasible());
        let sim = simulate(&graph(), &topo(), &a).unwrap();
        for (s, d) in SRC.iter().zip(DST.iter()) {
            let ts = sim.readiness[*s as usize].time().unwrap();
            let td = sim.readiness[*d as usize].time().unwrap();
            assert!(td > ts, "edge {s} -> {d}");
        }
    }

    #[test]
    fn validation_runs_first() {
        let mut p = feasible();
        p[3] = Coordinate::new(0, 0, 3).into();
        let err = simulate(&graph(), &topo(), &Assignment::from_placements(p)).unwrap_err();
        assert!(matches!(err, ValidationError::CoordinateOutOfRange { node: 3, .. }));

        let err = simulate(&graph(), &topo(), &Assignment::unplaced(9)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                expected: 10,
                actual: 9
            }
        );
    }

    #[test]
    fn deterministic() {
        let a = Assignment::from_placements(feasible());
        let first = simulate(&graph(), &topo(), &a).unwrap();
        let second = simulate(&graph(), &topo(), &a).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn batch_preserves_order() {
        let good = Assignment::from_placements(feasible());
        let short = Assignment::unplaced(2);
        let empty = Assignment::unplaced(10);
        let out = simulate_batch(&graph(), &topo(), &[good.clone(), short, empty]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].as_ref().unwrap(), &simulate(&graph(), &topo(), &good).unwrap());
        assert!(out[1].is_err());
        assert_eq!(out[2].as_ref().unwrap().rewards.total(), 0.0);
    }
}

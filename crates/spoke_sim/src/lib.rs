//! Placement-timing simulator for the Spoke toolchain.
//!
//! Given a [`ComputeGraph`], a [`Topology`], and an [`Assignment`] of nodes to
//! device coordinates, [`simulate`] performs one deterministic sweep in
//! ascending topological order and classifies every node as unplaced,
//! timing-infeasible, or ready at an exact integer time. The readiness
//! vector is then turned into a per-node reward signal.
//!
//! # Pipeline
//!
//! 1. **Validate** — the assignment must cover exactly the graph's nodes and
//!    only use coordinates inside the device; nothing is computed otherwise
//! 2. **Sweep** — each placed node waits for its slowest predecessor plus the
//!    transfer latency, then must land on its own spoke modulo the spoke count
//! 3. **Reward** — `0` for unplaced, `-1` for infeasible,
//!    `(max_dist * n - t) / n` for ready at `t`
//!
//! # Usage
//!
//! ```
//! use spoke_common::NodeId;
//! use spoke_graph::ComputeGraph;
//! use spoke_sim::{simulate, Assignment, Readiness};
//! use spoke_topology::{Coordinate, Topology};
//!
//! let graph = ComputeGraph::from_edges(&[0], &[1]).unwrap();
//! let topo = Topology::new(4, 4, 3, false).unwrap();
//! let mut assignment = Assignment::unplaced(2);
//! assignment.place(NodeId::from_raw(0), Coordinate::new(0, 0, 0)).unwrap();
//! assignment.place(NodeId::from_raw(1), Coordinate::new(0, 1, 2)).unwrap();
//!
//! let sim = simulate(&graph, &topo, &assignment).unwrap();
//! assert_eq!(sim.readiness[0], Readiness::Ready(4));
//! assert_eq!(sim.readiness[1], Readiness::Ready(9));
//! ```
//!
//! # Architecture
//!
//! - [`assignment`] — node-to-coordinate assignments and flat-index decoding
//! - [`readiness`] — per-node outcome states and reward derivation
//! - [`simulate`] — the topological sweep, single and batched
//! - [`report`] — outcome diagnostics
//! - [`env`] — episode wrapper producing observations and rewards
//! - [`grid`] — boundary of the alternate grid-swap scoring engine

#![warn(missing_docs)]

pub mod assignment;
pub mod env;
pub mod grid;
pub mod readiness;
pub mod report;
pub mod simulate;

pub use assignment::{Assignment, UNPLACED_INDEX};
pub use env::{GraphSource, Observation, PlacementEnv};
pub use grid::{GridCoord, GridEnv, GridScorer, GridShape};
pub use readiness::{Readiness, ReadinessVector, RewardVector};
pub use report::report_outcome;
pub use simulate::{simulate, simulate_batch, Simulation, PROCESSING_TIME};

pub use spoke_graph::ComputeGraph;
pub use spoke_topology::{Coordinate, Placement, Topology};

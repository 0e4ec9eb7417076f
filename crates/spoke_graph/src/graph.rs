//! The compute DAG and its topological level structure.

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use spoke_common::{ConfigError, NodeId, ValidationError};
use spoke_topology::Placement;

/// A directed acyclic graph of operations.
///
/// An edge `src -> dst` means `dst` cannot become ready before `src`.
/// Parallel edges are kept. The structure is fixed after construction; the
/// only mutable part is the observational per-node placement annotation.
#[derive(Debug, Clone)]
pub struct ComputeGraph {
    graph: DiGraph<(), (), u32>,
    placements: Vec<Placement>,
}

impl ComputeGraph {
    /// Builds a graph with `num_nodes` nodes and the given edges.
    ///
    /// Fails if an edge endpoint is outside `0..num_nodes` or the edges form a cycle.
    pub fn with_nodes(num_nodes: usize, edges: &[(u32, u32)]) -> Result<Self, ConfigError> {
        let mut graph = DiGraph::with_capacity(num_nodes, edges.len());
        for _ in 0..num_nodes {
            graph.add_node(());
        }
        for &(src, dst) in edges {
            for node in [src, dst] {
                if node as usize >= num_nodes {
                    return Err(ConfigError::EdgeOutOfRange { node, num_nodes });
                }
            }
            graph.add_edge(NodeIndex::new(src as usize), NodeIndex::new(dst as usize), ());
        }
        if let Err(cycle) = toposort(&graph, None) {
            return Err(ConfigError::CyclicGraph {
                node: cycle.node_id().index() as u32,
            });
        }
        Ok(Self {
            graph,
            placements: vec![Placement::Unplaced; num_nodes],
        })
    }

    /// Builds a graph from parallel source and destination id lists.
    ///
    /// The node count is one more than the largest id mentioned.
    pub fn from_edges(src: &[u32], dst: &[u32]) -> Result<Self, ConfigError> {
        if src.len() != dst.len() {
            return Err(ConfigError::EdgeListMismatch {
                src: src.len(),
                dst: dst.len(),
            });
        }
        let num_nodes = src
            .iter()
            .chain(dst)
            .max()
            .map_or(0, |&max| max as usize + 1);
        let edges: Vec<(u32, u32)> = src.iter().copied().zip(dst.iter().copied()).collect();
        Self::with_nodes(num_nodes, &edges)
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges, counting parallel edges separately.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Iterates node ids in index order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        self.graph.node_indices().map(node_id)
    }

    /// Returns every edge as `(src, dst)` in insertion order.
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (node_id(e.source()), node_id(e.target())))
            .collect()
    }

    /// Returns `true` if `node` is a valid id for this graph.
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Direct predecessors of `node`, ascending, one entry per incoming edge.
    pub fn predecessors(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbors(node, Direction::Incoming)
    }

    /// Direct successors of `node`, ascending, one entry per outgoing edge.
    pub fn successors(&self, node: NodeId) -> Vec<NodeId> {
        self.neighbors(node, Direction::Outgoing)
    }

    fn neighbors(&self, node: NodeId, dir: Direction) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self
            .graph
            .neighbors_directed(NodeIndex::new(node.index()), dir)
            .map(node_id)
            .collect();
        out.sort_unstable();
        out
    }

    /// Nodes with no incoming edges.
    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|&n| self.degree(n, Direction::Incoming) == 0)
            .collect()
    }

    /// Nodes with no outgoing edges.
    pub fn sinks(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|&n| self.degree(n, Direction::Outgoing) == 0)
            .collect()
    }

    fn degree(&self, node: NodeId, dir: Direction) -> usize {
        self.graph
            .edges_directed(NodeIndex::new(node.index()), dir)
            .count()
    }

    /// Ascending topological levels.
    ///
    /// Level 0 holds the sources; level `k` holds every node whose last
    /// predecessor sits in level `k - 1`. Each level is sorted by id.
    pub fn topological_levels(&self) -> Vec<Vec<NodeId>> {
        self.kahn_levels(Direction::Incoming)
    }

    /// Descending topological levels: the same frontier walk started from the sinks.
    pub fn reverse_topological_levels(&self) -> Vec<Vec<NodeId>> {
        self.kahn_levels(Direction::Outgoing)
    }

    /// A single ascending topological order (levels flattened).
    pub fn topological_order(&self) -> Vec<NodeId> {
        self.topological_levels().into_iter().flatten().collect()
    }

    /// Kahn frontier walk; `blocking` is the edge direction that must be
    /// exhausted before a node is released.
    fn kahn_levels(&self, blocking: Direction) -> Vec<Vec<NodeId>> {
        let release = blocking.opposite();
        let mut remaining: Vec<usize> = self.nodes().map(|n| self.degree(n, blocking)).collect();
        let mut frontier: Vec<NodeId> = self.nodes().filter(|n| remaining[n.index()] == 0).collect();
        let mut levels = Vec::new();

        while !frontier.is_empty() {
            let mut next = Vec::new();
            for &node in &frontier {
                for succ in self
                    .graph
                    .neighbors_directed(NodeIndex::new(node.index()), release)
                {
                    let slot = &mut remaining[succ.index()];
                    *slot -= 1;
                    if *slot == 0 {
                        next.push(node_id(succ));
                    }
                }
            }
            next.sort_unstable();
            levels.push(std::mem::replace(&mut frontier, next));
        }

        levels
    }

    /// Per-node placement annotation from the most recent simulation.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement annotation of one node.
    pub fn placement(&self, node: NodeId) -> Placement {
        self.placements[node.index()]
    }

    /// Replaces the placement annotation.
    ///
    /// `placements` must have one entry per node; otherwise the annotation
    /// is left unchanged.
    pub fn annotate_placements(
        &mut self,
        placements: Vec<Placement>,
    ) -> Result<(), ValidationError> {
        if placements.len() != self.node_count() {
            return Err(ValidationError::LengthMismatch {
                expected: self.node_count(),
                actual: placements.len(),
            });
        }
        self.placements = placements;
        Ok(())
    }
}

// The graph is indexed by `u32`, so every index fits a `NodeId`.
fn node_id(index: NodeIndex) -> NodeId {
    NodeId::from_raw(index.index() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spoke_topology::Coordinate;

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().map(|&i| NodeId::from_raw(i)).collect()
    }

    /// The ten-node example DAG used throughout the workspace tests.
    fn example_graph() -> ComputeGraph {
        let src = [0, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8];
        let dst = [1, 2, 3, 4, 5, 6, 7, 7, 8, 8, 9];
        ComputeGraph::from_edges(&src, &dst).unwrap()
    }

    #[test]
    fn empty_graph() {
        let g = ComputeGraph::from_edges(&[], &[]).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.topological_levels().is_empty());
    }

    #[test]
    fn from_edges_counts_nodes() {
        let g = example_graph();
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 11);
        assert_eq!(g.edges()[0], (NodeId::from_raw(0), NodeId::from_raw(1)));
    }

    #[test]
    fn isolated_nodes_via_with_nodes() {
        let g = ComputeGraph::with_nodes(3, &[(0, 1)]).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.sources(), ids(&[0, 2]));
        assert_eq!(g.sinks(), ids(&[1, 2]));
    }

    #[test]
    fn edge_list_mismatch_rejected() {
        let err = ComputeGraph::from_edges(&[0, 1], &[1]).unwrap_err();
        assert_eq!(err, ConfigError::EdgeListMismatch { src: 2, dst: 1 });
    }

    #[test]
    fn edge_out_of_range_rejected() {
        let err = ComputeGraph::with_nodes(2, &[(0, 5)]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::EdgeOutOfRange {
                node: 5,
                num_nodes: 2
            }
        );
    }

    #[test]
    fn cycle_rejected() {
        let err = ComputeGraph::from_edges(&[0, 1, 2], &[1, 2, 0]).unwrap_err();
        assert!(matches!(err, ConfigError::CyclicGraph { .. }));
    }

    #[test]
    fn self_loop_rejected() {
        let err = ComputeGraph::with_nodes(1, &[(0, 0)]).unwrap_err();
        assert_eq!(err, ConfigError::CyclicGraph { node: 0 });
    }

    #[test]
    fn predecessors_and_successors() {
        let g = example_graph();
        assert_eq!(g.predecessors(NodeId::from_raw(7)), ids(&[4, 5]));
        assert_eq!(g.successors(NodeId::from_raw(0)), ids(&[1, 2, 3]));
        assert!(g.predecessors(NodeId::from_raw(0)).is_empty());
    }

    #[test]
    fn parallel_edges_reported_twice() {
        let g = ComputeGraph::with_nodes(2, &[(0, 1), (0, 1)]).unwrap();
        assert_eq!(g.predecessors(NodeId::from_raw(1)), ids(&[0, 0]));
        assert_eq!(g.topological_levels(), vec![ids(&[0]), ids(&[1])]);
    }

    #[test]
    fn ascending_levels() {
        let g = example_graph();
        assert_eq!(
            g.topological_levels(),
            vec![
                ids(&[0]),
                ids(&[1, 2, 3]),
                ids(&[4, 5, 6]),
                ids(&[7]),
                ids(&[8]),
                ids(&[9]),
            ]
        );
    }

    #[test]
    fn descending_levels() {
        let g = example_graph();
        assert_eq!(
            g.reverse_topological_levels(),
            vec![
                ids(&[9]),
                ids(&[8]),
                ids(&[6, 7]),
                ids(&[3, 4, 5]),
                ids(&[1, 2]),
                ids(&[0]),
            ]
        );
    }

    #[test]
    fn topological_order_respects_edges() {
        let g = example_graph();
        let order = g.topological_order();
        assert_eq!(order.len(), 10);
        let pos = |n: NodeId| order.iter().position(|&m| m == n).unwrap();
        for (src, dst) in g.edges() {
            assert!(pos(src) < pos(dst));
        }
    }

    #[test]
    fn placement_annotation() {
        let mut g = ComputeGraph::with_nodes(2, &[(0, 1)]).unwrap();
        assert!(g.placements().iter().all(|p| !p.is_placed()));
        let c = Coordinate::new(0, 1, 2);
        g.annotate_placements(vec![Placement::Placed(c), Placement::Unplaced])
            .unwrap();
        assert_eq!(g.placement(NodeId::from_raw(0)), Placement::Placed(c));
        assert_eq!(g.placement(NodeId::from_raw(1)), Placement::Unplaced);
    }

    #[test]
    fn placement_annotation_wrong_length_is_rejected() {
        let mut g = ComputeGraph::with_nodes(2, &[(0, 1)]).unwrap();
        let c = Coordinate::new(0, 0, 0);
        g.annotate_placements(vec![Placement::Placed(c), Placement::Unplaced])
            .unwrap();

        let err = g.annotate_placements(vec![Placement::Unplaced]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        // previous annotation survives
        assert_eq!(g.placement(NodeId::from_raw(0)), Placement::Placed(c));
    }
}

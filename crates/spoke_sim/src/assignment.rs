//! Node-to-coordinate assignments.
//!
//! An [`Assignment`] holds one [`Placement`] per compute-graph node. Nothing
//! stops two nodes from sharing a coordinate; that is for the producer of
//! the assignment to prevent. Assignments are built fresh for every
//! simulation call.

use serde::{Deserialize, Serialize};
use spoke_common::{NodeId, ValidationError};
use spoke_topology::{Coordinate, Placement, Topology};
use std::ops::Index;

/// Flat-index sentinel meaning "leave this node unplaced".
pub const UNPLACED_INDEX: i64 = -1;

/// One placement per node, in node-index order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assignment {
    placements: Vec<Placement>,
}

impl Assignment {
    /// An assignment of `num_nodes` nodes with nothing placed.
    pub fn unplaced(num_nodes: usize) -> Self {
        Self {
            placements: vec![Placement::Unplaced; num_nodes],
        }
    }

    /// Wraps an existing placement vector.
    pub fn from_placements(placements: Vec<Placement>) -> Self {
        Self { placements }
    }

    /// Decodes one flat coordinate index per node.
    ///
    /// [`UNPLACED_INDEX`] leaves the node unplaced; any other index must lie in
    /// `0..topology.size()` and is unravelled row-major.
    pub fn from_flat_indices(indices: &[i64], topology: &Topology) -> Result<Self, ValidationError> {
        let placements = indices
            .iter()
            .enumerate()
            .map(|(node, &index)| {
                if index == UNPLACED_INDEX {
                    return Ok(Placement::Unplaced);
                }
                usize::try_from(index)
                    .ok()
                    .and_then(|flat| topology.unravel(flat))
                    .map(Placement::Placed)
                    .ok_or(ValidationError::FlatIndexOutOfRange {
                        node,
                        index,
                        size: topology.size(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { placements })
    }

    /// Builds an assignment of `num_nodes` nodes from sparse `(node, coordinate)` pairs.
    ///
    /// Nodes not mentioned stay unplaced; a later pair for the same node wins.
    pub fn from_pairs<I>(num_nodes: usize, pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (NodeId, Coordinate)>,
    {
        let mut assignment = Self::unplaced(num_nodes);
        for (node, coord) in pairs {
            assignment.place(node, coord)?;
        }
        Ok(assignment)
    }

    /// Places `node` at `coord`.
    pub fn place(&mut self, node: NodeId, coord: Coordinate) -> Result<(), ValidationError> {
        let slot = self.slot_mut(node)?;
        *slot = Placement::Placed(coord);
        Ok(())
    }

    /// Marks `node` as unplaced.
    pub fn unplace(&mut self, node: NodeId) -> Result<(), ValidationError> {
        let slot = self.slot_mut(node)?;
        *slot = Placement::Unplaced;
        Ok(())
    }

    fn slot_mut(&mut self, node: NodeId) -> Result<&mut Placement, ValidationError> {
        let num_nodes = self.placements.len();
        self.placements
            .get_mut(node.index())
            .ok_or(ValidationError::NodeOutOfRange {
                node: node.index(),
                num_nodes,
            })
    }

    /// The placement of `node`, or `Unplaced` for ids past the end.
    pub fn get(&self, node: NodeId) -> Placement {
        self.placements
            .get(node.index())
            .copied()
            .unwrap_or(Placement::Unplaced)
    }

    /// Number of entries (one per node).
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Returns `true` if the assignment covers no nodes.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of nodes that have a coordinate.
    pub fn placed_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_placed()).count()
    }

    /// All placements in node-index order.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Consumes the assignment, returning its placements.
    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }

    /// Checks the assignment against a graph size and a device.
    ///
    /// Entries past `num_nodes` are reported as [`ValidationError::NodeOutOfRange`],
    /// missing entries as [`ValidationError::LengthMismatch`], and placed
    /// coordinates outside the device as [`ValidationError::CoordinateOutOfRange`].
    pub fn validate(&self, num_nodes: usize, topology: &Topology) -> Result<(), ValidationError> {
        if self.placements.len() > num_nodes {
            return Err(ValidationError::NodeOutOfRange {
                node: num_nodes,
                num_nodes,
            });
        }
        if self.placements.len() < num_nodes {
            return Err(ValidationError::LengthMismatch {
                expected: num_nodes,
                actual: self.placements.len(),
            });
        }
        for (node, placement) in self.placements.iter().enumerate() {
            if let Placement::Placed(c) = *placement {
                if !topology.contains(c) {
                    return Err(ValidationError::CoordinateOutOfRange {
                        node,
                        row: c.row,
                        col: c.col,
                        spoke: c.spoke,
                    });
                }
            }
        }
        Ok(())
    }
}

impl Index<usize> for Assignment {
    type Output = Placement;

    fn index(&self, node: usize) -> &Placement {
        &self.placements[node]
    }
}

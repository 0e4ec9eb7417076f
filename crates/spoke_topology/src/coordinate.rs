//! Device coordinates and per-node placements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the device: tile row, tile column, and spoke within the tile.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Coordinate {
    /// Tile row (0-based).
    pub row: u32,
    /// Tile column (0-based).
    pub col: u32,
    /// Spoke within the tile (0-based).
    pub spoke: u32,
}

impl Coordinate {
    /// Creates a coordinate from its three components.
    pub fn new(row: u32, col: u32, spoke: u32) -> Self {
        Self { row, col, spoke }
    }

    /// Manhattan distance between the tiles of two coordinates.
    ///
    /// The spoke axis never contributes.
    pub fn tile_distance(self, other: Coordinate) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.row, self.col, self.spoke)
    }
}

/// Where a single compute-graph node has been put.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Placement {
    /// The node has not been assigned a coordinate.
    #[default]
    Unplaced,
    /// The node occupies the given coordinate.
    Placed(Coordinate),
}

impl Placement {
    /// Returns `true` if the node has a coordinate.
    pub fn is_placed(self) -> bool {
        matches!(self, Placement::Placed(_))
    }

    /// Returns the coordinate, if placed.
    pub fn coordinate(self) -> Option<Coordinate> {
        match self {
            Placement::Placed(c) => Some(c),
            Placement::Unplaced => None,
        }
    }
}

impl From<Coordinate> for Placement {
    fn from(c: Coordinate) -> Self {
        Placement::Placed(c)
    }
}

impl From<Option<Coordinate>> for Placement {
    fn from(c: Option<Coordinate>) -> Self {
        c.map_or(Placement::Unplaced, Placement::Placed)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Unplaced => write!(f, "unplaced"),
            Placement::Placed(c) => write!(f, "{c}"),
        }
    }
}

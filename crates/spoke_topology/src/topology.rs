//! The immutable device description and its latency model.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use spoke_common::{positional_encoding, ConfigError, FeatureMatrix, ENCODING_BASE};
use std::fmt;

/// How tiles are wired together, selecting the latency formula.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Connectivity {
    /// Nearest-neighbour mesh: every hop costs one transfer plus two cycles
    /// of forwarding.
    Grid,
    /// A single row or column whose tiles are also cross-connected, so
    /// traffic skips every other tile.
    LinearCrossConnected,
}

impl Connectivity {
    /// Transfer latency for a Manhattan tile distance `d`.
    ///
    /// - `Grid`: `d + (d - 1) * 2`
    /// - `LinearCrossConnected`: with `d2 = 2 * ceil(d / 2) - 2`,
    ///   `d2 / 2 + d2 + 1`
    ///
    /// Neither formula is special-cased for `d == 0`: colocated transfers
    /// evaluate to `-1` on a grid and `-2` when cross-connected. `d2` is
    /// always even, so both results are exact integers.
    pub fn latency(self, distance: u32) -> i64 {
        let d = i64::from(distance);
        match self {
            Connectivity::Grid => d + (d - 1) * 2,
            Connectivity::LinearCrossConnected => {
                let d2 = 2 * ((d + 1) / 2) - 2;
                d2 / 2 + d2 + 1
            }
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Grid => write!(f, "grid"),
            Connectivity::LinearCrossConnected => write!(f, "linear cross-connected"),
        }
    }
}

/// Serialized form of a [`Topology`]; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawTopology {
    rows: u32,
    cols: u32,
    spokes: u32,
    connectivity: Connectivity,
}

/// An immutable device description: extents plus connectivity mode.
///
/// Coordinates are enumerated row-major over `(rows, cols, spokes)`, so flat
/// index `i` maps to `(i / (cols * spokes), (i / spokes) % cols, i % spokes)`.
/// A `Topology` is `Send + Sync` and can be shared by concurrent simulations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawTopology", into = "RawTopology")]
pub struct Topology {
    rows: u32,
    cols: u32,
    spokes: u32,
    connectivity: Connectivity,
}

impl Topology {
    /// Creates a topology, choosing the connectivity from a cross-connection flag.
    ///
    /// Fails with [`ConfigError::LinearShapeRequired`] if `cross_connected` is
    /// set but neither `rows` nor `cols` is 1, and with
    /// [`ConfigError::ZeroExtent`] if any extent is zero.
    pub fn new(rows: u32, cols: u32, spokes: u32, cross_connected: bool) -> Result<Self, ConfigError> {
        let connectivity = if cross_connected {
            Connectivity::LinearCrossConnected
        } else {
            Connectivity::Grid
        };
        Self::with_connectivity(rows, cols, spokes, connectivity)
    }

    /// Creates a topology with an explicit connectivity mode.
    pub fn with_connectivity(
        rows: u32,
        cols: u32,
        spokes: u32,
        connectivity: Connectivity,
    ) -> Result<Self, ConfigError> {
        for (axis, extent) in [("rows", rows), ("cols", cols), ("spokes", spokes)] {
            if extent == 0 {
                return Err(ConfigError::ZeroExtent { axis });
            }
        }
        if connectivity == Connectivity::LinearCrossConnected && rows != 1 && cols != 1 {
            return Err(ConfigError::LinearShapeRequired { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            spokes,
            connectivity,
        })
    }

    /// Number of tile rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of tile columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of spokes per tile.
    pub fn spokes(&self) -> u32 {
        self.spokes
    }

    /// The connectivity mode.
    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Returns `true` for the linear cross-connected mode.
    pub fn is_cross_connected(&self) -> bool {
        self.connectivity == Connectivity::LinearCrossConnected
    }

    /// The extents as `[rows, cols, spokes]`.
    pub fn extents(&self) -> [u32; 3] {
        [self.rows, self.cols, self.spokes]
    }

    /// Number of coordinates: `rows * cols * spokes`.
    pub fn size(&self) -> usize {
        self.rows as usize * self.cols as usize * self.spokes as usize
    }

    /// Aggregate extent `rows + cols + spokes`, the per-node reward ceiling.
    pub fn max_dist(&self) -> i64 {
        i64::from(self.rows) + i64::from(self.cols) + i64::from(self.spokes)
    }

    /// Returns `true` if `c` lies inside the device.
    pub fn contains(&self, c: Coordinate) -> bool {
        c.row < self.rows && c.col < self.cols && c.spoke < self.spokes
    }

    /// Maps a flat index to its coordinate, or `None` if out of range.
    pub fn unravel(&self, flat: usize) -> Option<Coordinate> {
        if flat >= self.size() {
            return None;
        }
        let spokes = self.spokes as usize;
        let cols = self.cols as usize;
        Some(Coordinate::new(
            (flat / (cols * spokes)) as u32,
            ((flat / spokes) % cols) as u32,
            (flat % spokes) as u32,
        ))
    }

    /// Maps a coordinate to its flat index, or `None` if outside the device.
    pub fn ravel(&self, c: Coordinate) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        let spokes = self.spokes as usize;
        let cols = self.cols as usize;
        Some((c.row as usize * cols + c.col as usize) * spokes + c.spoke as usize)
    }

    /// Iterates every coordinate in flat-index order.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.size()).filter_map(move |i| self.unravel(i))
    }

    /// Manhattan distance over rows and columns only.
    pub fn distance(&self, a: Coordinate, b: Coordinate) -> u32 {
        a.tile_distance(b)
    }

    /// Communication latency from `a` to `b` under this device's connectivity.
    pub fn latency(&self, a: Coordinate, b: Coordinate) -> i64 {
        self.connectivity.latency(self.distance(a, b))
    }

    /// Positional encoding of every coordinate, `width` features per axis.
    ///
    /// Rows follow flat-index order; the result is `size x 3 * width`.
    pub fn encoding(&self, width: usize) -> FeatureMatrix {
        let points: Vec<Vec<f64>> = self
            .coordinates()
            .map(|c| vec![f64::from(c.row), f64::from(c.col), f64::from(c.spoke)])
            .collect();
        positional_encoding(&points, width, ENCODING_BASE)
    }
}

impl TryFrom<RawTopology> for Topology {
    type Error = ConfigError;

    fn try_from(raw: RawTopology) -> Result<Self, Self::Error> {
        Topology::with_connectivity(raw.rows, raw.cols, raw.spokes, raw.connectivity)
    }
}

impl From<Topology> for RawTopology {
    fn from(t: Topology) -> Self {
        RawTopology {
            rows: t.rows,
            cols: t.cols,
            spokes: t.spokes,
            connectivity: t.connectivity,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}x{} {}",
            self.rows, self.cols, self.spokes, self.connectivity
        )
    }
}

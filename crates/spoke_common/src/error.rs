//! Error taxonomy for topology construction and simulation input.
//!
//! [`ConfigError`] covers everything that is wrong with a device or graph
//! description and is fatal at construction time. [`ValidationError`] covers
//! malformed per-call input to the simulator; it is raised before any
//! state is touched, so the caller may retry with corrected input.

/// Errors raised while constructing a topology, compute graph, or environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Cross connections were requested for a device that is not a single row or column.
    #[error(
        "cross connections require a linear device layout (rows == 1 or cols == 1), got {rows}x{cols}"
    )]
    LinearShapeRequired {
        /// Requested row count.
        rows: u32,
        /// Requested column count.
        cols: u32,
    },

    /// A topology extent was zero.
    #[error("device {axis} extent must be positive")]
    ZeroExtent {
        /// Name of the offending axis (`rows`, `cols`, or `spokes`).
        axis: &'static str,
    },

    /// A feature width is not a multiple of what the encoder requires.
    #[error("{what} feature size {size} must be a positive multiple of {multiple}")]
    FeatureSize {
        /// Which feature block was misconfigured.
        what: &'static str,
        /// The requested size.
        size: usize,
        /// The required multiple.
        multiple: usize,
    },

    /// The compute graph contains a cycle.
    #[error("compute graph contains a cycle through node {node}")]
    CyclicGraph {
        /// A node that participates in the cycle.
        node: u32,
    },

    /// Source and destination edge lists differ in length.
    #[error("edge lists differ in length: {src} sources, {dst} destinations")]
    EdgeListMismatch {
        /// Number of source ids.
        src: usize,
        /// Number of destination ids.
        dst: usize,
    },

    /// An edge references a node outside the declared node count.
    #[error("edge endpoint {node} is outside 0..{num_nodes}")]
    EdgeOutOfRange {
        /// The offending node id.
        node: u32,
        /// The declared node count.
        num_nodes: usize,
    },
}

/// Errors raised when simulator or environment input is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The assignment refers to a node the graph does not have.
    #[error("assignment references node {node}, but the graph has {num_nodes} nodes")]
    NodeOutOfRange {
        /// The offending node index.
        node: usize,
        /// Number of nodes in the graph.
        num_nodes: usize,
    },

    /// The assignment does not cover every node of the graph.
    #[error("assignment covers {actual} nodes, expected {expected}")]
    LengthMismatch {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of entries in the assignment.
        actual: usize,
    },

    /// A placed coordinate lies outside the device.
    #[error("node {node} is placed at ({row}, {col}, {spoke}), outside the device")]
    CoordinateOutOfRange {
        /// The node whose placement is invalid.
        node: usize,
        /// Row of the offending coordinate.
        row: u32,
        /// Column of the offending coordinate.
        col: u32,
        /// Spoke of the offending coordinate.
        spoke: u32,
    },

    /// A flat coordinate index is neither the unplaced sentinel nor in range.
    #[error("node {node} has flat coordinate index {index}, expected -1 or 0..{size}")]
    FlatIndexOutOfRange {
        /// The node whose action is invalid.
        node: usize,
        /// The offending flat index.
        index: i64,
        /// Size of the coordinate space.
        size: usize,
    },

    /// An initial grid position lies outside the grid shape.
    #[error("node {node} starts at grid cell {cell:?}, outside the {shape:?} grid")]
    GridCellOutOfRange {
        /// The node whose grid position is invalid.
        node: usize,
        /// The offending cell.
        cell: [usize; 3],
        /// The grid shape.
        shape: [usize; 3],
    },

    /// A grid action does not address a cell of the grid.
    #[error("grid action {action} is outside 0..{size}")]
    ActionOutOfRange {
        /// The offending action.
        action: usize,
        /// Number of grid cells.
        size: usize,
    },
}

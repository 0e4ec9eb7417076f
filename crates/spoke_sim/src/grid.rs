//! Boundary of the grid-swap scoring engine.
//!
//! The engine keeps every node at a cell of a three-axis grid and moves one
//! node per step, swapping it with whichever node already holds the target
//! cell. How a grid is scored is up to the [`GridScorer`]; lower scores are
//! better, so the environment reports the negated score as its reward.

use spoke_common::{NodeId, ValidationError};
use spoke_graph::ComputeGraph;

/// A grid cell, `[depth, col, row]`.
pub type GridCoord = [usize; 3];

/// Extents of the grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GridShape {
    /// Extent of the first axis.
    pub depth: usize,
    /// Extent of the second axis.
    pub cols: usize,
    /// Extent of the third axis.
    pub rows: usize,
}

impl GridShape {
    /// Creates a shape.
    pub fn new(depth: usize, cols: usize, rows: usize) -> Self {
        Self { depth, cols, rows }
    }

    /// Number of cells, which is also the number of actions.
    pub fn size(&self) -> usize {
        self.depth * self.cols * self.rows
    }

    /// The shape as an array.
    pub fn extents(&self) -> [usize; 3] {
        [self.depth, self.cols, self.rows]
    }

    /// Returns `true` if `cell` lies inside the grid.
    pub fn contains(&self, cell: GridCoord) -> bool {
        cell[0] < self.depth && cell[1] < self.cols && cell[2] < self.rows
    }

    /// Row-major unravel of a flat action index.
    pub fn unravel(&self, action: usize) -> Option<GridCoord> {
        if action >= self.size() {
            return None;
        }
        let per_depth = self.cols * self.rows;
        Some([
            action / per_depth,
            (action / self.rows) % self.cols,
            action % self.rows,
        ])
    }
}

/// Scores a grid assignment of a compute graph. Lower is better.
pub trait GridScorer {
    /// Scores `grid`, which holds one cell per node of `graph`.
    fn score(&self, grid: &[GridCoord], graph: &ComputeGraph) -> f64;
}

impl<F> GridScorer for F
where
    F: Fn(&[GridCoord], &ComputeGraph) -> f64,
{
    fn score(&self, grid: &[GridCoord], graph: &ComputeGraph) -> f64 {
        self(grid, graph)
    }
}

/// Grid-swap environment over a caller-supplied graph and starting grid.
#[derive(Debug, Clone)]
pub struct GridEnv<S> {
    shape: GridShape,
    grid_init: Vec<GridCoord>,
    grid: Vec<GridCoord>,
    graph: ComputeGraph,
    scorer: S,
}

impl<S: GridScorer> GridEnv<S> {
    /// Creates the environment; `grid_init` needs one in-bounds cell per node.
    pub fn new(
        shape: GridShape,
        grid_init: Vec<GridCoord>,
        graph: ComputeGraph,
        scorer: S,
    ) -> Result<Self, ValidationError> {
        if grid_init.len() != graph.node_count() {
            return Err(ValidationError::LengthMismatch {
                expected: graph.node_count(),
                actual: grid_init.len(),
            });
        }
        if let Some((node, &cell)) = grid_init
            .iter()
            .enumerate()
            .find(|(_, &cell)| !shape.contains(cell))
        {
            return Err(ValidationError::GridCellOutOfRange {
                node,
                cell,
                shape: shape.extents(),
            });
        }
        Ok(Self {
            shape,
            grid: grid_init.clone(),
            grid_init,
            graph,
            scorer,
        })
    }

    /// Restores the starting grid and returns it with its reward.
    pub fn reset(&mut self) -> (&[GridCoord], f64) {
        self.grid.clone_from(&self.grid_init);
        let reward = -self.scorer.score(&self.grid, &self.graph);
        (&self.grid, reward)
    }

    /// Moves `node` to the cell addressed by `action`.
    ///
    /// A node already at that cell takes `node`'s old cell.
    pub fn step(
        &mut self,
        action: usize,
        node: NodeId,
    ) -> Result<(&[GridCoord], f64), ValidationError> {
        let target = self.shape.unravel(action).ok_or(ValidationError::ActionOutOfRange {
            action,
            size: self.shape.size(),
        })?;
        let n = node.index();
        if n >= self.grid.len() {
            return Err(ValidationError::NodeOutOfRange {
                node: n,
                num_nodes: self.grid.len(),
            });
        }
        if let Some(occupant) = self.grid.iter().position(|&cell| cell == target) {
            self.grid[occupant] = self.grid[n];
        }
        self.grid[n] = target;
        let reward = -self.scorer.score(&self.grid, &self.graph);
        Ok((&self.grid, reward))
    }

    /// The grid extents.
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// The current grid.
    pub fn grid(&self) -> &[GridCoord] {
        &self.grid
    }

    /// The compute graph.
    pub fn graph(&self) -> &ComputeGraph {
        &self.graph
    }
}

//! Fixed-topology grid and connected-region scan.
//!
//! Cells are numbered row-major: on a 2 × 5 grid the top row is
//! `0..5` and the bottom row `5..10`. Two cells are adjacent when they
//! sit side by side in the same row, or in the same column of
//! neighbouring rows. Nothing wraps around the edges.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A maximal group of occupied, mutually reachable cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    /// Member cell indices, ascending.
    pub members: Vec<usize>,
    /// Number of members.
    pub size: usize,
}

/// Rows × columns grid topology.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Create a grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "Grid dimensions must be non-zero");
        Self { rows, cols }
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// Always false: grids have at least one cell.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// In-bounds neighbours of `cell`, in left, right, up, down order.
    #[must_use]
    pub fn neighbors(&self, cell: usize) -> SmallVec<[usize; 4]> {
        debug_assert!(cell < self.len(), "cell {cell} outside grid");
        let (row, col) = (cell / self.cols, cell % self.cols);
        let mut out = SmallVec::new();
        if col > 0 {
            out.push(cell - 1);
        }
        if col + 1 < self.cols {
            out.push(cell + 1);
        }
        if row > 0 {
            out.push(cell - self.cols);
        }
        if row + 1 < self.rows {
            out.push(cell + self.cols);
        }
        out
    }

    /// Whether two cells share an edge.
    #[must_use]
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).contains(&b)
    }

    /// Partition the occupied cells into connected regions.
    ///
    /// `occupied` holds one flag per cell; any other length yields no
    /// regions. Regions come out in the order their lowest member is met
    /// by a row-major scan; members are ascending. Each cell is pushed at
    /// most once, so the scan is linear in the number of cells.
    #[must_use]
    pub fn compute_regions(&self, occupied: &[bool]) -> Vec<Region> {
        if occupied.len() != self.len() {
            return Vec::new();
        }
        let mut visited = vec![false; occupied.len()];
        let mut regions = Vec::new();
        let mut stack = Vec::new();

        for start in 0..occupied.len() {
            if !occupied[start] || visited[start] {
                continue;
            }

            let mut members = Vec::new();
            visited[start] = true;
            stack.push(start);

            while let Some(cell) = stack.pop() {
                members.push(cell);
                for next in self.neighbors(cell) {
                    if occupied[next] && !visited[next] {
                        visited[next] = true;
                        stack.push(next);
                    }
                }
            }

            members.sort_unstable();
            let size = members.len();
            regions.push(Region { members, size });
        }

        regions
    }
}

//! Grid value type and the Conway transition rule.
//!
//! A `Grid` is an immutable snapshot: `step` and `toggled` return a new
//! value and never touch the input, so a frontend holding the published
//! grid can render it while the next generation is being computed.

use arrayvec::ArrayVec;

use crate::rng::SeedRng;
use crate::types::LifeError;

/// Relative offsets of the 8 Moore-neighborhood cells.
///
/// Unlike a toroidal world there is no pre-wrapping here: offsets that land
/// outside the grid are skipped during counting, so edges do not wrap.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A rectangular board of live/dead cells, row-major.
///
/// Dimensions are fixed at construction and every mutation produces a fresh
/// `Grid`; the flat `Vec<bool>` keeps rows exactly `cols` wide by layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid. Zero dimensions are a programmer error, not a
    /// recoverable condition.
    pub fn empty(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Grid where each cell is independently live with `live_probability`.
    /// Drawing from an injected generator keeps seeding reproducible.
    pub fn random(rows: usize, cols: usize, live_probability: f64, rng: &mut SeedRng) -> Self {
        let mut grid = Self::empty(rows, cols);
        for cell in grid.cells.iter_mut() {
            *cell = rng.chance(live_probability);
        }
        grid
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major cell states, for building the flat candid view.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.idx(row, col)])
        } else {
            None
        }
    }

    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).unwrap_or(false)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// In-bounds Moore neighbors of a cell. At most 8; fewer on edges and
    /// corners, since the board does not wrap.
    pub fn neighbor_positions(&self, row: usize, col: usize) -> ArrayVec<(usize, usize), 8> {
        let mut neighbors = ArrayVec::new();
        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            let nr = row as i32 + dr;
            let nc = col as i32 + dc;
            if nr >= 0 && nc >= 0 && (nr as usize) < self.rows && (nc as usize) < self.cols {
                neighbors.push((nr as usize, nc as usize));
            }
        }
        neighbors
    }

    /// Number of live in-bounds neighbors; out-of-bounds offsets count zero.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        self.neighbor_positions(row, col)
            .iter()
            .filter(|&&(nr, nc)| self.cells[self.idx(nr, nc)])
            .count() as u8
    }

    /// New grid with one cell inverted. The input is left untouched; an
    /// out-of-bounds position is reported and changes nothing.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Grid, LifeError> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfBounds { row, col });
        }
        let mut next = self.clone();
        let i = self.idx(row, col);
        next.cells[i] = !next.cells[i];
        Ok(next)
    }

    /// One generation of the Conway rule, evaluated simultaneously for all
    /// cells: every count reads `self`, writes go to a fresh buffer. A cell
    /// with fewer than 2 or more than 3 live neighbors is dead next
    /// generation regardless of its current state; a dead cell with exactly
    /// 3 is born; everything else carries its state over.
    pub fn step(&self) -> Grid {
        let mut next = vec![false; self.cells.len()];
        for row in 0..self.rows {
            for col in 0..self.cols {
                let alive = self.cells[self.idx(row, col)];
                let neighbors = self.live_neighbors(row, col);
                next[self.idx(row, col)] = match (alive, neighbors) {
                    (_, n) if !(2..=3).contains(&n) => false,
                    (false, 3) => true,
                    (state, _) => state,
                };
            }
        }
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: next,
        }
    }
}

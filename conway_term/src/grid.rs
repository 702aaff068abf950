// grid.rs - Cell matrix, neighbour counting and generation stepping

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use thiserror::Error;

use crate::rules::RuleSet;

/// Moore neighbourhood offsets as (row, col).
const NEIGHBOURS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// How the grid treats its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgePolicy {
    /// Coordinates wrap around, the grid is a torus.
    #[default]
    Toroidal,
    /// Border cells are never updated; only the interior evolves.
    Bounded,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown edge policy '{0}', expected 'toroidal' or 'bounded'")]
pub struct ParseEdgePolicyError(String);

impl FromStr for EdgePolicy {
    type Err = ParseEdgePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toroidal" => Ok(Self::Toroidal),
            "bounded"  => Ok(Self::Bounded),
            other      => Err(ParseEdgePolicyError(other.to_string())),
        }
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toroidal => "toroidal",
            Self::Bounded  => "bounded",
        })
    }
}

/// One generation of the automaton.
///
/// `width` is the number of rows and `length` the number of columns. Cells
/// are stored row-major and the dimensions never change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width:  usize,
    length: usize,
    cells:  Vec<bool>,
    rule:   RuleSet,
    edges:  EdgePolicy,
}

impl Grid {
    /// All-dead grid of `width` rows by `length` columns.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, length: usize, rule: RuleSet, edges: EdgePolicy) -> Self {
        assert!(width > 0 && length > 0, "grid dimensions must be positive");
        Self { width, length, cells: vec![false; width * length], rule, edges }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn rule(&self) -> &RuleSet {
        &self.rule
    }

    pub fn edge_policy(&self) -> EdgePolicy {
        self.edges
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        let idx = self.index(row, col);
        self.cells[idx] = alive;
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Rows top to bottom, each `length` cells long.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.length)
    }

    /// Set each cell alive with probability one half.
    ///
    /// Bounded grids only seed their interior; the border stays dead.
    pub fn fill_random<R: Rng>(&mut self, rng: &mut R) {
        for row in 0..self.width {
            for col in 0..self.length {
                let alive = !self.is_frozen(row, col) && rng.gen_bool(0.5);
                self.set(row, col, alive);
            }
        }
    }

    /// Live cells among the eight neighbours of `(row, col)`.
    ///
    /// Toroidal grids wrap out-of-range coordinates. Bounded grids only
    /// count neighbours that lie inside the grid.
    pub fn count_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut count = 0;
        for (dr, dc) in NEIGHBOURS {
            let neighbour = match self.edges {
                EdgePolicy::Toroidal => Some((
                    wrap(row, dr, self.width),
                    wrap(col, dc, self.length),
                )),
                EdgePolicy::Bounded => clamp(row, dr, self.width).zip(clamp(col, dc, self.length)),
            };
            if let Some((r, c)) = neighbour {
                count += u8::from(self.get(r, c));
            }
        }
        count
    }

    /// Compute the next generation into a freshly allocated grid.
    ///
    /// `self` is left untouched so it can keep being read, e.g. by a render
    /// that is still in flight.
    pub fn advance(&self) -> Grid {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..self.width {
            for col in 0..self.length {
                let alive = self.get(row, col);
                let next = if self.is_frozen(row, col) {
                    alive
                } else {
                    self.rule.next_state(alive, self.count_neighbors(row, col))
                };
                cells.push(next);
            }
        }

        Grid {
            width:  self.width,
            length: self.length,
            cells,
            rule:   self.rule.clone(),
            edges:  self.edges,
        }
    }

    /// Border cells of a bounded grid never change.
    fn is_frozen(&self, row: usize, col: usize) -> bool {
        self.edges == EdgePolicy::Bounded
            && (row == 0 || col == 0 || row + 1 >= self.width || col + 1 >= self.length)
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.width && col < self.length,
            "cell ({row}, {col}) outside {}x{} grid",
            self.width,
            self.length,
        );
        row * self.length + col
    }
}

fn wrap(idx: usize, delta: isize, dim: usize) -> usize {
    (idx + dim).wrapping_add_signed(delta) % dim
}

fn clamp(idx: usize, delta: isize, dim: usize) -> Option<usize> {
    idx.checked_add_signed(delta).filter(|&i| i < dim)
}

// common/mod.rs - Fixture patterns shared by the integration tests

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use conway_term::{EdgePolicy, Grid, RuleSet};

pub struct Pattern {
    pub name:  &'static str,
    pub cells: &'static [(usize, usize)],
}

/// Horizontal line of three; flips to vertical every generation.
pub const BLINKER: Pattern = Pattern {
    name:  "Blinker",
    cells: &[(2, 1), (2, 2), (2, 3)],
};

pub const BLINKER_VERTICAL: Pattern = Pattern {
    name:  "Blinker (vertical)",
    cells: &[(1, 2), (2, 2), (3, 2)],
};

pub const BLOCK: Pattern = Pattern {
    name:  "Block",
    cells: &[(1, 1), (1, 2), (2, 1), (2, 2)],
};

/// Travels one cell down and right every four generations.
pub const GLIDER: Pattern = Pattern {
    name:  "Glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

/// Dead grid with `pattern` placed at an offset.
pub fn grid_with(
    width: usize,
    length: usize,
    rule: RuleSet,
    edges: EdgePolicy,
    pattern: &Pattern,
    offset: (usize, usize),
) -> Grid {
    let mut grid = Grid::new(width, length, rule, edges);
    for &(row, col) in pattern.cells {
        grid.set(row + offset.0, col + offset.1, true);
    }
    grid
}

pub fn live_cells(grid: &Grid) -> Vec<(usize, usize)> {
    grid.rows()
        .enumerate()
        .flat_map(|(row, cells)| {
            cells.iter().enumerate().filter(|(_, alive)| **alive).map(move |(col, _)| (row, col))
        })
        .collect()
}

/// Cloneable in-memory terminal.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory terminal that refuses frames (anything with a newline) but
/// accepts control sequences.
#[derive(Clone, Default)]
pub struct FrameRefusingBuf(SharedBuf);

impl FrameRefusingBuf {
    pub fn contents(&self) -> String {
        self.0.contents()
    }
}

impl Write for FrameRefusingBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.contains(&b'\n') {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"));
        }
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

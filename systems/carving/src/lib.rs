#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Randomized spanning-tree carving for maze-forge.
//!
//! The carver performs a depth-first random walk over a grid's geometric
//! adjacency, opening one wall per step. Because the walk only ever moves to
//! unvisited cells, the carved openings form a spanning tree: every cell is
//! reachable and exactly one simple path connects any two cells.

use maze_forge_core::{CellCoord, CellIndex, Direction};
use maze_forge_grid::Grid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the carving system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided RNG seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

/// Endpoints of a carved maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CarvedMaze {
    /// Index of the randomly chosen cell the walk started from.
    pub start: CellIndex,
    /// Index of the last cell the walk newly visited.
    pub end: CellIndex,
}

/// Seedable system that carves a perfect maze into a grid.
#[derive(Debug)]
pub struct Carver {
    rng: ChaCha8Rng,
}

impl Carver {
    /// Creates a new carver using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    /// Carves a spanning tree into the grid and returns the maze endpoints.
    ///
    /// The grid is expected to be fully closed; every opening the walk
    /// records is new. The end cell is not geometrically special, it is
    /// whichever cell the walk happened to visit last. On a single-cell
    /// grid the walk visits only the start, so both endpoints coincide.
    pub fn carve(&mut self, grid: &mut Grid) -> CarvedMaze {
        let start = CellCoord::new(
            self.rng.gen_range(0..grid.rows()),
            self.rng.gen_range(0..grid.cols()),
        );

        let mut visited = vec![false; grid.cell_count()];
        let mut stack = Vec::new();

        visited[slot(grid, start)] = true;
        stack.push(start);
        let mut last = start;

        while let Some(current) = stack.pop() {
            let mut open_steps = [None; 4];
            let mut open_count = 0;
            for (direction, neighbor) in Direction::ALL.into_iter().zip(grid.adjacent(current)) {
                if let Some(neighbor) = neighbor {
                    if !visited[slot(grid, neighbor)] {
                        open_steps[open_count] = Some((direction, neighbor));
                        open_count += 1;
                    }
                }
            }

            // Dead end: the popped cell stays off the stack, which
            // backtracks the walk to whatever is now on top.
            if open_count == 0 {
                continue;
            }

            let Some((direction, next)) = open_steps[self.rng.gen_range(0..open_count)] else {
                continue;
            };

            visited[slot(grid, next)] = true;
            last = next;
            grid.carve(current, direction);
            stack.push(current);
            stack.push(next);
        }

        CarvedMaze {
            start: grid.index_of(start),
            end: grid.index_of(last),
        }
    }
}

fn slot(grid: &Grid, coord: CellCoord) -> usize {
    (grid.index_of(coord).get() - 1) as usize
}

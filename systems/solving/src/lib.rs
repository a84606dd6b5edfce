#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Breadth-first shortest-path solving for maze-forge.
//!
//! The solver walks a grid whose traversable edge set is already populated,
//! either freshly carved or rebuilt from a record. Visited flags and
//! predecessor links live in arrays scoped to a single [`solve`] call, never
//! on the grid itself.

use std::collections::VecDeque;

use maze_forge_core::CellIndex;
use maze_forge_grid::Grid;
use thiserror::Error;

/// Errors raised when a maze cannot be solved.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// The start index does not address a cell of the grid.
    #[error("start index {} is outside the grid", .0.get())]
    StartOutOfBounds(CellIndex),
    /// The end index does not address a cell of the grid.
    #[error("end index {} is outside the grid", .0.get())]
    EndOutOfBounds(CellIndex),
    /// The search exhausted its queue without reaching the end cell.
    #[error("no path connects the start and end cells")]
    NoPathFound,
}

/// Outcome of a successful breadth-first search across a maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Ordered cell indices from the start cell to the end cell inclusive.
    pub path: Vec<CellIndex>,
    /// Edge count of the shortest path, `path.len() - 1`.
    pub solution_length: usize,
    /// Total cells dequeued before the search terminated. Exceeds
    /// `solution_length` whenever the search explored dead-end branches
    /// before reaching the end.
    pub steps_taken: usize,
}

/// Finds the shortest path between two cells of a maze.
///
/// Cells are marked visited when dequeued, not when enqueued, so a cell can
/// sit in the queue more than once; the step counter reflects that extra
/// work rather than the path length. The starting cell's dequeue is not a
/// step while discovering the end cell is, which makes the reported total
/// exactly the number of dequeues performed. The search terminates the
/// moment the end cell shows up among a dequeued cell's neighbors, without
/// draining the rest of that layer.
pub fn solve(grid: &Grid, start: CellIndex, end: CellIndex) -> Result<Solution, SolveError> {
    if grid.cell_at_index(start).is_none() {
        return Err(SolveError::StartOutOfBounds(start));
    }
    if grid.cell_at_index(end).is_none() {
        return Err(SolveError::EndOutOfBounds(end));
    }

    if start == end {
        return Ok(Solution {
            path: vec![start],
            solution_length: 0,
            steps_taken: 0,
        });
    }

    let cells = grid.cell_count();
    let mut visited = vec![false; cells];
    let mut previous: Vec<Option<CellIndex>> = vec![None; cells];
    let mut queue = VecDeque::new();
    let mut dequeued = 0;
    let mut found = false;

    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        visited[slot(current)] = true;
        dequeued += 1;

        let Some(coord) = grid.cell_at_index(current) else {
            continue;
        };

        for &neighbor in grid.neighbors(coord) {
            if neighbor == end {
                previous[slot(end)] = Some(current);
                queue.clear();
                found = true;
                break;
            }
            if !visited[slot(neighbor)] {
                previous[slot(neighbor)] = Some(current);
                queue.push_back(neighbor);
            }
        }
    }

    if !found {
        return Err(SolveError::NoPathFound);
    }

    let path = reconstruct(start, end, &previous)?;
    let solution_length = path.len() - 1;
    Ok(Solution {
        path,
        solution_length,
        steps_taken: dequeued,
    })
}

/// Walks the predecessor links from the end cell back to the start and
/// reverses the result into start-to-end order.
fn reconstruct(
    start: CellIndex,
    end: CellIndex,
    previous: &[Option<CellIndex>],
) -> Result<Vec<CellIndex>, SolveError> {
    let mut reversed = vec![end];
    let mut pointer = end;

    while pointer != start {
        // A chain longer than the cell count means the predecessor links
        // are inconsistent; bail out instead of walking them forever.
        if reversed.len() > previous.len() {
            return Err(SolveError::NoPathFound);
        }

        let Some(step) = previous[slot(pointer)] else {
            return Err(SolveError::NoPathFound);
        };
        reversed.push(step);
        pointer = step;
    }

    reversed.reverse();
    Ok(reversed)
}

fn slot(index: CellIndex) -> usize {
    (index.get() - 1) as usize
}

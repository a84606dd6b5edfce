#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Grid-as-graph data model for maze-forge.
//!
//! A [`Grid`] stores the wall state of every cell together with the
//! traversable edge set derived from it. Two adjacency views exist side by
//! side: the purely geometric one ([`Grid::adjacent`]), which ignores walls,
//! and the traversable one ([`Grid::neighbors`]), which only lists cells
//! connected by a carved or decoded opening. Algorithm-transient state such
//! as visited flags never lives here; the carving and solving systems keep
//! their own run-scoped arrays.

use maze_forge_core::{CellCoord, CellIndex, Direction, MazeRecord, Openness};
use thiserror::Error;

/// Hard upper bound on the number of cells a grid may hold.
///
/// Requests above the cap surface as [`GridError::TooLarge`] before any
/// allocation happens, so oversized dimensions stay retryable.
pub const MAX_CELLS: u64 = 1 << 24;

/// Errors raised when a grid cannot be constructed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The requested grid had zero rows or zero columns.
    #[error("a grid needs at least one row and one column")]
    Empty,
    /// The requested grid exceeds the supported cell capacity.
    #[error("a grid of {cells} cells exceeds the supported capacity of {limit} cells")]
    TooLarge {
        /// Number of cells the dimensions would require.
        cells: u64,
        /// The capacity cap that was exceeded.
        limit: u64,
    },
    /// A maze record declared different dimensions than it carried cells.
    #[error("record declares {expected} cells but carries {found} wall states")]
    RecordMismatch {
        /// Cell count implied by the record's dimensions.
        expected: u64,
        /// Number of wall states actually present.
        found: u64,
    },
}

/// Rectangular grid of cells addressed by zero-based row and column.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: u32,
    cols: u32,
    openness: Vec<Openness>,
    neighbors: Vec<Vec<CellIndex>>,
}

impl Grid {
    /// Creates a fully closed grid with the provided dimensions.
    pub fn new(rows: u32, cols: u32) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::Empty);
        }

        let cells = u64::from(rows) * u64::from(cols);
        if cells > MAX_CELLS {
            return Err(GridError::TooLarge {
                cells,
                limit: MAX_CELLS,
            });
        }

        let capacity = usize::try_from(cells).map_err(|_| GridError::TooLarge {
            cells,
            limit: MAX_CELLS,
        })?;

        Ok(Self {
            rows,
            cols,
            openness: vec![Openness::CLOSED; capacity],
            neighbors: vec![Vec::new(); capacity],
        })
    }

    /// Rebuilds a grid from a decoded maze record: wall state is copied in
    /// and the traversable edge set is derived by linking every cell's
    /// openness.
    pub fn from_record(record: &MazeRecord) -> Result<Self, GridError> {
        let mut grid = Self::new(record.rows, record.cols)?;

        let found = record.cells.len() as u64;
        if found != record.cell_count() {
            return Err(GridError::RecordMismatch {
                expected: record.cell_count(),
                found,
            });
        }

        grid.openness.copy_from_slice(&record.cells);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                grid.link_by_openness(CellCoord::new(row, col));
            }
        }

        Ok(grid)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn cols(&self) -> u32 {
        self.cols
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.openness.len()
    }

    /// Reports whether the coordinate addresses a cell of this grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.row() < self.rows && coord.col() < self.cols
    }

    /// Bounds-checked cell lookup; boundary probes return `None` rather
    /// than failing, since probing past the edge is a normal path during
    /// adjacency enumeration.
    #[must_use]
    pub fn cell_at(&self, row: u32, col: u32) -> Option<CellCoord> {
        let coord = CellCoord::new(row, col);
        self.contains(coord).then_some(coord)
    }

    /// Looks up the cell carrying the provided one-based row-major index.
    #[must_use]
    pub fn cell_at_index(&self, index: CellIndex) -> Option<CellCoord> {
        let value = index.get();
        if value == 0 {
            return None;
        }

        let zero_based = value - 1;
        self.cell_at(zero_based / self.cols, zero_based % self.cols)
    }

    /// One-based row-major index of a cell. Meaningful only for in-bounds
    /// coordinates.
    #[must_use]
    pub const fn index_of(&self, coord: CellCoord) -> CellIndex {
        CellIndex::new(coord.row() * self.cols + coord.col() + 1)
    }

    /// Geometric neighbor in the given direction, independent of walls.
    #[must_use]
    pub fn neighbor_towards(&self, coord: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.contains(coord) {
            return None;
        }

        let candidate = match direction {
            Direction::North => CellCoord::new(coord.row().checked_sub(1)?, coord.col()),
            Direction::East => CellCoord::new(coord.row(), coord.col() + 1),
            Direction::South => CellCoord::new(coord.row() + 1, coord.col()),
            Direction::West => CellCoord::new(coord.row(), coord.col().checked_sub(1)?),
        };

        self.contains(candidate).then_some(candidate)
    }

    /// The up-to-four geometric neighbors of a cell in up/right/down/left
    /// order, with `None` marking the grid boundary.
    #[must_use]
    pub fn adjacent(&self, coord: CellCoord) -> [Option<CellCoord>; 4] {
        Direction::ALL.map(|direction| self.neighbor_towards(coord, direction))
    }

    /// Wall state of a cell. Out-of-range probes read as fully closed.
    #[must_use]
    pub fn openness(&self, coord: CellCoord) -> Openness {
        self.offset(coord)
            .and_then(|offset| self.openness.get(offset).copied())
            .unwrap_or(Openness::CLOSED)
    }

    /// Cells reachable from `coord` through a carved or decoded opening, in
    /// the order the edges were registered.
    #[must_use]
    pub fn neighbors(&self, coord: CellCoord) -> &[CellIndex] {
        self.offset(coord)
            .and_then(|offset| self.neighbors.get(offset))
            .map_or(&[], Vec::as_slice)
    }

    /// Number of traversable edges registered across the grid.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Records an opening between `from` and its geometric neighbor in the
    /// given direction, registering the edge symmetrically on both cells.
    ///
    /// Rightward and downward steps store the opening on the origin cell;
    /// leftward and upward steps store it on the destination, which is the
    /// left/upper cell of the pair. Steps off the grid edge are ignored.
    pub fn carve(&mut self, from: CellCoord, direction: Direction) {
        let Some(to) = self.neighbor_towards(from, direction) else {
            return;
        };
        let (Some(from_offset), Some(to_offset)) = (self.offset(from), self.offset(to)) else {
            return;
        };

        match direction {
            Direction::East => {
                self.openness[from_offset] = self.openness[from_offset].with_right_open();
            }
            Direction::South => {
                self.openness[from_offset] = self.openness[from_offset].with_down_open();
            }
            Direction::West => {
                self.openness[to_offset] = self.openness[to_offset].with_right_open();
            }
            Direction::North => {
                self.openness[to_offset] = self.openness[to_offset].with_down_open();
            }
        }

        self.connect(from, to);
    }

    /// Derives a cell's traversable edges from its wall state and registers
    /// them symmetrically. This is the sole mechanism for populating the
    /// edge set when a grid is rebuilt from a record.
    ///
    /// An opening pointing past the grid edge registers no edge at all, so
    /// the symmetry of the neighbor relation is preserved even for records
    /// that mark boundary cells open.
    pub fn link_by_openness(&mut self, coord: CellCoord) {
        let openness = self.openness(coord);

        if openness.open_right() {
            if let Some(east) = self.neighbor_towards(coord, Direction::East) {
                self.connect(coord, east);
            }
        }
        if openness.open_down() {
            if let Some(south) = self.neighbor_towards(coord, Direction::South) {
                self.connect(coord, south);
            }
        }
    }

    /// Captures the grid's wall state as an interchange record with the
    /// provided endpoints.
    #[must_use]
    pub fn to_record(&self, start: CellIndex, end: CellIndex) -> MazeRecord {
        MazeRecord {
            rows: self.rows,
            cols: self.cols,
            start,
            end,
            cells: self.openness.clone(),
        }
    }

    fn connect(&mut self, a: CellCoord, b: CellCoord) {
        let (Some(a_offset), Some(b_offset)) = (self.offset(a), self.offset(b)) else {
            return;
        };

        let a_index = self.index_of(a);
        let b_index = self.index_of(b);
        self.neighbors[a_offset].push(b_index);
        self.neighbors[b_offset].push(a_index);
    }

    fn offset(&self, coord: CellCoord) -> Option<usize> {
        if self.contains(coord) {
            let row = usize::try_from(coord.row()).ok()?;
            let col = usize::try_from(coord.col()).ok()?;
            let width = usize::try_from(self.cols).ok()?;
            Some(row * width + col)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Grid, GridError, MAX_CELLS};
    use maze_forge_core::{CellCoord, CellIndex, Direction, MazeRecord, Openness};

    #[test]
    fn new_rejects_empty_dimensions() {
        assert_eq!(Grid::new(0, 5).err(), Some(GridError::Empty));
        assert_eq!(Grid::new(5, 0).err(), Some(GridError::Empty));
    }

    #[test]
    fn index_and_coordinate_round_trip() {
        let grid = Grid::new(3, 4).expect("grid builds");

        for value in 1..=12 {
            let index = CellIndex::new(value);
            let coord = grid.cell_at_index(index).expect("index resolves");
            assert_eq!(grid.index_of(coord), index);
        }

        assert!(grid.cell_at_index(CellIndex::new(0)).is_none());
        assert!(grid.cell_at_index(CellIndex::new(13)).is_none());
    }

    #[test]
    fn adjacency_marks_the_boundary() {
        let grid = Grid::new(2, 2).expect("grid builds");

        assert_eq!(
            grid.adjacent(CellCoord::new(0, 0)),
            [
                None,
                Some(CellCoord::new(0, 1)),
                Some(CellCoord::new(1, 0)),
                None,
            ]
        );
        assert_eq!(
            grid.adjacent(CellCoord::new(1, 1)),
            [
                Some(CellCoord::new(0, 1)),
                None,
                None,
                Some(CellCoord::new(1, 0)),
            ]
        );
    }

    #[test]
    fn carve_records_openings_on_the_owning_cell() {
        let mut grid = Grid::new(2, 2).expect("grid builds");

        grid.carve(CellCoord::new(0, 0), Direction::East);
        assert!(grid.openness(CellCoord::new(0, 0)).open_right());

        grid.carve(CellCoord::new(1, 1), Direction::North);
        assert!(grid.openness(CellCoord::new(0, 1)).open_down());

        grid.carve(CellCoord::new(1, 1), Direction::West);
        assert!(grid.openness(CellCoord::new(1, 0)).open_right());

        assert_eq!(grid.edge_count(), 3);
    }

    #[test]
    fn carve_registers_edges_symmetrically() {
        let mut grid = Grid::new(1, 2).expect("grid builds");
        grid.carve(CellCoord::new(0, 0), Direction::East);

        assert_eq!(grid.neighbors(CellCoord::new(0, 0)), &[CellIndex::new(2)]);
        assert_eq!(grid.neighbors(CellCoord::new(0, 1)), &[CellIndex::new(1)]);
    }

    #[test]
    fn carve_ignores_steps_off_the_grid() {
        let mut grid = Grid::new(1, 1).expect("grid builds");
        grid.carve(CellCoord::new(0, 0), Direction::North);
        grid.carve(CellCoord::new(0, 0), Direction::East);

        assert_eq!(grid.openness(CellCoord::new(0, 0)), Openness::CLOSED);
        assert_eq!(grid.edge_count(), 0);
    }

    #[test]
    fn from_record_links_neighbors_symmetrically() {
        let record = MazeRecord::decode("2,2:1:4:3010").expect("record decodes");
        let grid = Grid::from_record(&record).expect("grid rebuilds");

        assert_eq!(grid.edge_count(), 3);
        for row in 0..2 {
            for col in 0..2 {
                let coord = CellCoord::new(row, col);
                for &neighbor in grid.neighbors(coord) {
                    let other = grid.cell_at_index(neighbor).expect("neighbor resolves");
                    assert!(
                        grid.neighbors(other).contains(&grid.index_of(coord)),
                        "edge {coord:?} -> {other:?} is one-sided"
                    );
                }
            }
        }
    }

    #[test]
    fn from_record_skips_openings_past_the_boundary() {
        let record = MazeRecord::decode("1,2:1:2:01").expect("record decodes");
        let grid = Grid::from_record(&record).expect("grid rebuilds");

        assert_eq!(grid.edge_count(), 0);
        assert!(grid.neighbors(CellCoord::new(0, 1)).is_empty());
    }

    #[test]
    fn from_record_rejects_mismatched_cell_counts() {
        let mut record = MazeRecord::decode("2,2:1:4:3010").expect("record decodes");
        record.cells.truncate(3);

        assert_eq!(
            Grid::from_record(&record).err(),
            Some(GridError::RecordMismatch {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn oversized_grids_are_rejected_before_allocation() {
        let result = Grid::new(4096, 4097);
        assert_eq!(
            result.err(),
            Some(GridError::TooLarge {
                cells: 4096 * 4097,
                limit: MAX_CELLS
            })
        );
    }
}

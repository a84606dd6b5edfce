#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! ASCII presentation of maze-forge grids.
//!
//! Rendering is a pure function of the grid's wall state, the maze
//! endpoints and an optional solution path. The glyph choices must mirror
//! the wall-state semantics exactly: a cell open to its right draws no
//! vertical bar after it, a cell open below draws no floor. Anything else
//! would silently misrepresent the graph the algorithms operate on.

use maze_forge_core::{CellCoord, CellIndex, Openness};
use maze_forge_grid::Grid;

/// Renders a maze as a character grid.
///
/// The start cell is marked `S`, the end cell `F`, and interior cells of
/// the provided solution path `*`. The buffer is `(2*rows + 1)` text rows
/// of `(cols + 1)` glyphs: a border column on the left, then one corridor
/// glyph and one floor glyph per cell, closed by full-width borders on the
/// top and bottom.
#[must_use]
pub fn render_maze(
    grid: &Grid,
    start: CellIndex,
    end: CellIndex,
    path: Option<&[CellIndex]>,
) -> String {
    let rows = grid.rows() as usize;
    let cols = grid.cols() as usize;
    let mut buffer: Vec<Vec<&'static str>> = vec![vec![""; cols + 1]; rows * 2 + 1];

    buffer[0][0] = "-";
    buffer[rows * 2][0] = "-";
    for line in buffer.iter_mut().take(rows * 2).skip(1) {
        line[0] = "|";
    }

    for row in 0..rows {
        for col in 0..cols {
            let openness = grid.openness(CellCoord::new(row as u32, col as u32));
            let (corridor, floor) = cell_glyphs(openness);
            buffer[row * 2 + 1][col + 1] = corridor;
            buffer[row * 2 + 2][col + 1] = floor;
        }
    }

    overlay(&mut buffer, grid, start, Marker::Start);
    overlay(&mut buffer, grid, end, Marker::End);

    // The bottom border overwrites the last row's floor glyphs.
    for col in 1..=cols {
        buffer[0][col] = "---";
        buffer[rows * 2][col] = "---";
    }

    if let Some(path) = path {
        for &index in path {
            if index == start || index == end {
                continue;
            }
            overlay(&mut buffer, grid, index, Marker::Path);
        }
    }

    let lines: Vec<String> = buffer.iter().map(|line| line.concat()).collect();
    lines.join("\n")
}

#[derive(Clone, Copy)]
enum Marker {
    Start,
    End,
    Path,
}

fn overlay(buffer: &mut [Vec<&'static str>], grid: &Grid, index: CellIndex, marker: Marker) {
    let Some(coord) = grid.cell_at_index(index) else {
        return;
    };

    let open_right = grid.openness(coord).open_right();
    let glyph = match (marker, open_right) {
        (Marker::Start, true) => "S  ",
        (Marker::Start, false) => "S |",
        (Marker::End, true) => "F  ",
        (Marker::End, false) => "F |",
        (Marker::Path, true) => "*  ",
        (Marker::Path, false) => "* |",
    };

    buffer[coord.row() as usize * 2 + 1][coord.col() as usize + 1] = glyph;
}

const fn cell_glyphs(openness: Openness) -> (&'static str, &'static str) {
    match (openness.open_right(), openness.open_down()) {
        (false, false) => ("  |", "--|"),
        (true, false) => ("   ", "--|"),
        (false, true) => ("  |", "  |"),
        (true, true) => ("   ", "  |"),
    }
}

#[cfg(test)]
mod tests {
    use super::render_maze;
    use maze_forge_core::{CellIndex, MazeRecord};
    use maze_forge_grid::Grid;

    #[test]
    fn renders_a_fixed_two_by_two_maze() {
        let record = MazeRecord::decode("2,2:1:4:3010").expect("record decodes");
        let grid = Grid::from_record(&record).expect("grid rebuilds");

        let expected = [
            "-------", //
            "|S    |",
            "|  |--|",
            "|   F |",
            "-------",
        ]
        .join("\n");

        assert_eq!(render_maze(&grid, record.start, record.end, None), expected);
    }

    #[test]
    fn overlays_interior_path_cells_without_touching_the_endpoints() {
        let record = MazeRecord::decode("1,3:1:3:110").expect("record decodes");
        let grid = Grid::from_record(&record).expect("grid rebuilds");
        let path: Vec<CellIndex> = [1, 2, 3].into_iter().map(CellIndex::new).collect();

        let expected = [
            "----------", //
            "|S  *  F |",
            "----------",
        ]
        .join("\n");

        assert_eq!(
            render_maze(&grid, record.start, record.end, Some(&path)),
            expected
        );
    }

    #[test]
    fn end_marker_wins_when_endpoints_coincide() {
        let record = MazeRecord::decode("1,1:1:1:0").expect("record decodes");
        let grid = Grid::from_record(&record).expect("grid rebuilds");

        let expected = [
            "----", //
            "|F |",
            "----",
        ]
        .join("\n");

        assert_eq!(render_maze(&grid, record.start, record.start, None), expected);
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze-forge workspace.
//!
//! This crate defines the vocabulary that connects the grid model, the
//! carving and solving systems, and the adapters: cell coordinates and
//! indices, the two-bit wall state stored per cell, and the single-line
//! [`MazeRecord`] interchange format produced by generation and consumed by
//! solving.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Delimiter separating the fields of an encoded maze record.
const FIELD_DELIMITER: char = ':';

/// Cardinal directions across the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in the geometric enumeration order: up, right, down,
    /// left. Adjacency lists across the workspace follow this order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Location of a single grid cell expressed as zero-based row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    col: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn col(&self) -> u32 {
        self.col
    }
}

/// One-based row-major index of a cell, ranging over `1..=rows*cols`.
///
/// Index `0` never identifies a cell; values are handed out by the grid or
/// validated by [`MazeRecord::decode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Creates a new cell index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Two-bit wall state of a cell.
///
/// Bit one records an open edge to the cell's right, bit two an open edge
/// below it. Openings are only ever stored on the left/upper cell of the
/// pair; the mirrored sides are implied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Openness(u8);

impl Openness {
    const RIGHT_BIT: u8 = 0b01;
    const DOWN_BIT: u8 = 0b10;

    /// Wall state of a fully closed cell.
    pub const CLOSED: Openness = Openness(0);

    /// Reports whether the cell has an open edge to its right.
    #[must_use]
    pub const fn open_right(self) -> bool {
        self.0 & Self::RIGHT_BIT != 0
    }

    /// Reports whether the cell has an open edge below it.
    #[must_use]
    pub const fn open_down(self) -> bool {
        self.0 & Self::DOWN_BIT != 0
    }

    /// Returns the wall state with the right edge opened.
    #[must_use]
    pub const fn with_right_open(self) -> Self {
        Self(self.0 | Self::RIGHT_BIT)
    }

    /// Returns the wall state with the bottom edge opened.
    #[must_use]
    pub const fn with_down_open(self) -> Self {
        Self(self.0 | Self::DOWN_BIT)
    }

    /// Encodes the wall state as its record digit, `'0'..='3'`.
    #[must_use]
    pub const fn digit(self) -> char {
        (b'0' + self.0) as char
    }

    /// Decodes a record digit into a wall state.
    #[must_use]
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self(0)),
            '1' => Some(Self(1)),
            '2' => Some(Self(2)),
            '3' => Some(Self(3)),
            _ => None,
        }
    }
}

/// Flat interchange representation of a generated maze.
///
/// A record is created once at the end of carving, exchanged as a single
/// line of text, and consumed once to rebuild the grid for solving. It is
/// never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeRecord {
    /// Number of rows in the maze.
    pub rows: u32,
    /// Number of columns in the maze.
    pub cols: u32,
    /// Index of the cell the walk started from.
    pub start: CellIndex,
    /// Index of the last cell the walk newly visited.
    pub end: CellIndex,
    /// Wall state of every cell in row-major index order, index 1 first.
    pub cells: Vec<Openness>,
}

impl MazeRecord {
    /// Number of cells the record's dimensions declare.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.rows as u64 * self.cols as u64
    }

    /// Encodes the record into its single-line text form:
    /// `<rows>,<cols>:<start>:<end>:<digits>` with exactly `rows*cols`
    /// digits and no whitespace.
    #[must_use]
    pub fn encode(&self) -> String {
        let digits: String = self.cells.iter().map(|cell| cell.digit()).collect();
        format!(
            "{},{}:{}:{}:{digits}",
            self.rows,
            self.cols,
            self.start.get(),
            self.end.get()
        )
    }

    /// Decodes a record from its single-line text form, validating
    /// everything the solver relies on.
    pub fn decode(value: &str) -> Result<Self, RecordError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(RecordError::EmptyPayload);
        }

        let mut parts = trimmed.splitn(4, FIELD_DELIMITER);
        let dimensions = parts.next().ok_or(RecordError::MissingDimensions)?;
        let start = parts.next().ok_or(RecordError::MissingStart)?;
        let end = parts.next().ok_or(RecordError::MissingEnd)?;
        let digits = parts.next().ok_or(RecordError::MissingCells)?;

        let (rows, cols) = parse_dimensions(dimensions)?;
        let cell_count = u64::from(rows) * u64::from(cols);
        let start = parse_index(start, cell_count)?;
        let end = parse_index(end, cell_count)?;

        let found = digits.len() as u64;
        if found != cell_count {
            return Err(RecordError::WrongCellCount {
                expected: cell_count,
                found,
            });
        }

        let cells = digits
            .chars()
            .map(|digit| Openness::from_digit(digit).ok_or(RecordError::InvalidCell(digit)))
            .collect::<Result<Vec<Openness>, RecordError>>()?;

        Ok(Self {
            rows,
            cols,
            start,
            end,
            cells,
        })
    }
}

/// Errors that can occur while decoding a maze record.
#[derive(Debug)]
pub enum RecordError {
    /// The provided text was empty or contained only whitespace.
    EmptyPayload,
    /// The record did not contain a dimensions segment.
    MissingDimensions,
    /// The record did not contain a start index segment.
    MissingStart,
    /// The record did not contain an end index segment.
    MissingEnd,
    /// The record did not contain the wall-state digits.
    MissingCells,
    /// The dimensions could not be parsed or were not positive.
    InvalidDimensions(String),
    /// An endpoint index could not be parsed.
    InvalidIndex(String),
    /// An endpoint index fell outside `1..=rows*cols`.
    IndexOutOfRange {
        /// The offending index value.
        index: u32,
        /// Number of cells the record declares.
        cells: u64,
    },
    /// The digit sequence did not match the declared cell count.
    WrongCellCount {
        /// Number of digits the dimensions require.
        expected: u64,
        /// Number of digits actually present.
        found: u64,
    },
    /// A wall-state digit was not one of `0`, `1`, `2` or `3`.
    InvalidCell(char),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "maze record was empty"),
            Self::MissingDimensions => write!(f, "maze record is missing the dimensions"),
            Self::MissingStart => write!(f, "maze record is missing the start index"),
            Self::MissingEnd => write!(f, "maze record is missing the end index"),
            Self::MissingCells => write!(f, "maze record is missing the wall-state digits"),
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse maze dimensions '{dimensions}'")
            }
            Self::InvalidIndex(index) => write!(f, "could not parse cell index '{index}'"),
            Self::IndexOutOfRange { index, cells } => {
                write!(f, "cell index {index} is outside the maze of {cells} cells")
            }
            Self::WrongCellCount { expected, found } => {
                write!(f, "expected {expected} wall-state digits, found {found}")
            }
            Self::InvalidCell(digit) => {
                write!(f, "'{digit}' is not a wall-state digit")
            }
        }
    }
}

impl Error for RecordError {}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), RecordError> {
    let (rows, cols) = dimensions
        .split_once(',')
        .ok_or_else(|| RecordError::InvalidDimensions(dimensions.to_owned()))?;

    let rows = rows
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidDimensions(dimensions.to_owned()))?;
    let cols = cols
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidDimensions(dimensions.to_owned()))?;

    if rows == 0 || cols == 0 {
        return Err(RecordError::InvalidDimensions(dimensions.to_owned()));
    }

    Ok((rows, cols))
}

fn parse_index(value: &str, cells: u64) -> Result<CellIndex, RecordError> {
    let index = value
        .parse::<u32>()
        .map_err(|_| RecordError::InvalidIndex(value.to_owned()))?;

    if index == 0 || u64::from(index) > cells {
        return Err(RecordError::IndexOutOfRange { index, cells });
    }

    Ok(CellIndex::new(index))
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellIndex, MazeRecord, Openness, RecordError};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    fn sample_record() -> MazeRecord {
        MazeRecord {
            rows: 2,
            cols: 3,
            start: CellIndex::new(1),
            end: CellIndex::new(6),
            cells: vec![
                Openness::CLOSED.with_right_open(),
                Openness::CLOSED,
                Openness::CLOSED.with_down_open(),
                Openness::CLOSED.with_right_open().with_down_open(),
                Openness::CLOSED,
                Openness::CLOSED,
            ],
        }
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(4, 7));
    }

    #[test]
    fn cell_index_round_trips_through_bincode() {
        assert_round_trip(&CellIndex::new(42));
    }

    #[test]
    fn maze_record_round_trips_through_bincode() {
        assert_round_trip(&sample_record());
    }

    #[test]
    fn openness_bits_match_digit_semantics() {
        assert_eq!(Openness::CLOSED.digit(), '0');
        assert_eq!(Openness::CLOSED.with_right_open().digit(), '1');
        assert_eq!(Openness::CLOSED.with_down_open().digit(), '2');
        assert_eq!(
            Openness::CLOSED.with_right_open().with_down_open().digit(),
            '3'
        );

        let both = Openness::from_digit('3').expect("digit decodes");
        assert!(both.open_right());
        assert!(both.open_down());
        assert!(Openness::from_digit('4').is_none());
    }

    #[test]
    fn encode_produces_single_line_form() {
        assert_eq!(sample_record().encode(), "2,3:1:6:102300");
    }

    #[test]
    fn decode_restores_encoded_record() {
        let record = sample_record();
        let decoded = MazeRecord::decode(&record.encode()).expect("record decodes");
        assert_eq!(decoded, record);
    }

    #[test]
    fn decode_tolerates_surrounding_whitespace() {
        let decoded = MazeRecord::decode("  2,3:1:6:102300\n").expect("record decodes");
        assert_eq!(decoded, sample_record());
    }

    #[test]
    fn decode_rejects_empty_payload() {
        assert!(matches!(
            MazeRecord::decode("  \n"),
            Err(RecordError::EmptyPayload)
        ));
    }

    #[test]
    fn decode_rejects_missing_segments() {
        assert!(matches!(
            MazeRecord::decode("2,3"),
            Err(RecordError::MissingStart)
        ));
        assert!(matches!(
            MazeRecord::decode("2,3:1"),
            Err(RecordError::MissingEnd)
        ));
        assert!(matches!(
            MazeRecord::decode("2,3:1:6"),
            Err(RecordError::MissingCells)
        ));
    }

    #[test]
    fn decode_rejects_malformed_dimensions() {
        assert!(matches!(
            MazeRecord::decode("2x3:1:6:102300"),
            Err(RecordError::InvalidDimensions(_))
        ));
        assert!(matches!(
            MazeRecord::decode("two,3:1:6:102300"),
            Err(RecordError::InvalidDimensions(_))
        ));
        assert!(matches!(
            MazeRecord::decode("0,3:1:1:"),
            Err(RecordError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn decode_rejects_out_of_range_endpoints() {
        assert!(matches!(
            MazeRecord::decode("2,3:0:6:102300"),
            Err(RecordError::IndexOutOfRange { index: 0, cells: 6 })
        ));
        assert!(matches!(
            MazeRecord::decode("2,3:1:7:102300"),
            Err(RecordError::IndexOutOfRange { index: 7, cells: 6 })
        ));
        assert!(matches!(
            MazeRecord::decode("2,3:1:six:102300"),
            Err(RecordError::InvalidIndex(_))
        ));
    }

    #[test]
    fn decode_rejects_wrong_digit_count() {
        assert!(matches!(
            MazeRecord::decode("2,3:1:6:1023"),
            Err(RecordError::WrongCellCount {
                expected: 6,
                found: 4
            })
        ));
    }

    #[test]
    fn decode_rejects_invalid_digit() {
        assert!(matches!(
            MazeRecord::decode("2,3:1:6:102309"),
            Err(RecordError::InvalidCell('9'))
        ));
    }
}

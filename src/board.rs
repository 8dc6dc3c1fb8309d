use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Board size constants
pub const BOARD_SIZE: usize = 9;

/// Column labels, west to east.
pub const COLUMNS: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];

/// Row labels, north to south. Row `9` is the north edge.
pub const ROWS: [char; BOARD_SIZE] = ['9', '8', '7', '6', '5', '4', '3', '2', '1'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Next row in [`ROWS`], toward row `1`
    Up,
    /// Next column in [`COLUMNS`]
    Right,
    /// Previous row in [`ROWS`], toward row `9`
    Down,
    /// Previous column in [`COLUMNS`]
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("square must be exactly two characters, got {0}")]
    Length(usize),
    #[error("unknown column '{0}', expected a-i")]
    Column(char),
    #[error("unknown row '{0}', expected 1-9")]
    Row(char),
}

/// A square on the 9x9 board, stored as indices into [`COLUMNS`] and [`ROWS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    col: usize,
    row: usize,
}

impl Square {
    /// `e9`, center of the north edge
    pub const NORTH_CENTER: Square = Square {
        col: BOARD_SIZE / 2,
        row: 0,
    };

    /// `e1`, center of the south edge
    pub const SOUTH_CENTER: Square = Square {
        col: BOARD_SIZE / 2,
        row: BOARD_SIZE - 1,
    };

    /// Build a square from column and row indices. Returns `None` off the board.
    pub fn new(col: usize, row: usize) -> Option<Self> {
        if col < BOARD_SIZE && row < BOARD_SIZE {
            Some(Square { col, row })
        } else {
            None
        }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column_label(&self) -> char {
        COLUMNS[self.col]
    }

    pub fn row_label(&self) -> char {
        ROWS[self.row]
    }

    pub fn up(&self) -> Option<Square> {
        Square::new(self.col, self.row + 1)
    }

    pub fn down(&self) -> Option<Square> {
        let row = self.row.checked_sub(1)?;
        Square::new(self.col, row)
    }

    pub fn right(&self) -> Option<Square> {
        Square::new(self.col + 1, self.row)
    }

    pub fn left(&self) -> Option<Square> {
        let col = self.col.checked_sub(1)?;
        Square::new(col, self.row)
    }

    pub fn step(&self, direction: Direction) -> Option<Square> {
        match direction {
            Direction::Up => self.up(),
            Direction::Right => self.right(),
            Direction::Down => self.down(),
            Direction::Left => self.left(),
        }
    }

    /// All 81 squares in display order: row `9` first, columns `a` to `i`.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Square { col, row }))
    }

    pub fn is_corner(&self) -> bool {
        (self.row == 0 || self.row == BOARD_SIZE - 1)
            && (self.col == 0 || self.col == BOARD_SIZE - 1)
    }

    pub fn is_edge(&self) -> bool {
        self.row == 0 || self.row == BOARD_SIZE - 1 || self.col == 0 || self.col == BOARD_SIZE - 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_label(), self.row_label())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        let &[column, row] = chars.as_slice() else {
            return Err(ParseSquareError::Length(chars.len()));
        };

        let col = COLUMNS
            .iter()
            .position(|&c| c == column)
            .ok_or(ParseSquareError::Column(column))?;
        let row_index = ROWS
            .iter()
            .position(|&r| r == row)
            .ok_or(ParseSquareError::Row(row))?;

        Ok(Square {
            col,
            row: row_index,
        })
    }
}

impl TryFrom<String> for Square {
    type Error = ParseSquareError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

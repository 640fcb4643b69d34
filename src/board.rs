use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::movegen::CaptureSet;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Position, Side};

/// Reversi board state represented by two bitboards.
///
/// Bit `row * 8 + col` of each mask marks a disc of that side. A board is a
/// plain value: every move produces a new `Board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    dark: u64,
    light: u64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("expected 8 rows, found {found}")]
    RowCount { found: usize },
    #[error("row {row} has {found} cells, expected 8")]
    RowLength { row: usize, found: usize },
    #[error("unknown cell character {ch:?} in row {row}")]
    UnknownCell { row: usize, ch: char },
}

impl Board {
    /// Creates the initial board:
    /// d4=light, e4=dark, d5=dark, e5=light.
    pub fn new() -> Self {
        Self {
            dark: bit(3, 4) | bit(4, 3),
            light: bit(3, 3) | bit(4, 4),
        }
    }

    /// Parses an 8-row diagram: `X` dark, `O` light, `.` empty.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Result<Self, ParseBoardError> {
        let mut dark = 0u64;
        let mut light = 0u64;

        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != BOARD_SIZE {
                return Err(ParseBoardError::RowLength {
                    row,
                    found: cells.len(),
                });
            }
            for (col, ch) in cells.into_iter().enumerate() {
                let square = bit(row, col);
                match ch {
                    'X' | 'x' => dark |= square,
                    'O' | 'o' => light |= square,
                    '.' | '-' => {}
                    _ => return Err(ParseBoardError::UnknownCell { row, ch }),
                }
            }
        }

        Ok(Self { dark, light })
    }

    pub fn cell(&self, pos: Position) -> Cell {
        let square = pos.bit();
        if (self.dark & square) != 0 {
            Cell::Dark
        } else if (self.light & square) != 0 {
            Cell::Light
        } else {
            Cell::Empty
        }
    }

    /// Occupancy mask of one side.
    pub fn discs(&self, side: Side) -> u64 {
        match side {
            Side::Dark => self.dark,
            Side::Light => self.light,
        }
    }

    pub fn occupied(&self) -> u64 {
        self.dark | self.light
    }

    /// Returns `(dark_count, light_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.dark.count_ones() as u8, self.light.count_ones() as u8)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        let (dark_count, light_count) = self.count();
        NUM_SQUARES as u8 - dark_count - light_count
    }

    /// Places a disc for `side` at `dest` and converts every captured disc.
    ///
    /// `captures` must come from [`crate::movegen::legal_moves`] for this
    /// board, side and destination. Anything else is a caller bug and panics.
    pub fn apply_move(&self, dest: Position, side: Side, captures: CaptureSet) -> Board {
        let move_bit = dest.bit();
        let (me, opp) = (self.discs(side), self.discs(side.opponent()));
        let flips = captures.mask();

        assert_eq!(self.occupied() & move_bit, 0, "destination {dest} is occupied");
        assert_ne!(flips, 0, "move to {dest} captures nothing");
        assert_eq!(flips & !opp, 0, "capture set for {dest} includes non-opponent cells");

        let next_me = me | move_bit | flips;
        let next_opp = opp & !flips;

        match side {
            Side::Dark => Self {
                dark: next_me,
                light: next_opp,
            },
            Side::Light => Self {
                dark: next_opp,
                light: next_me,
            },
        }
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (idx, cell) in board.iter_mut().enumerate() {
            *cell = match self.cell(Position::from_index(idx)) {
                Cell::Empty => 0,
                Cell::Dark => 1,
                Cell::Light => 2,
            };
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().filter(|l| !l.trim().is_empty()).collect();
        let rows: [&str; BOARD_SIZE] = rows
            .as_slice()
            .try_into()
            .map_err(|_| ParseBoardError::RowCount { found: rows.len() })?;
        Self::from_rows(rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let ch = match self.cell(Position::from_index(row * BOARD_SIZE + col)) {
                    Cell::Empty => '.',
                    Cell::Dark => 'X',
                    Cell::Light => 'O',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn bit(row: usize, col: usize) -> u64 {
    1u64 << (row * BOARD_SIZE + col)
}

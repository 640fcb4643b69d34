use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two players, named by disc color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Dark always moves first.
    #[default]
    Dark,
    Light,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dark => f.write_str("dark"),
            Side::Light => f.write_str("light"),
        }
    }
}

/// Contents of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Dark,
    Light,
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Dark => Cell::Dark,
            Side::Light => Cell::Light,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Builds a position, returning `None` when either coordinate is off the board.
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Row-major square index (0..=63).
    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES, "square index out of range: {index}");
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub(crate) fn bit(self) -> u64 {
        1u64 << self.index()
    }
}

impl fmt::Display for Position {
    /// Algebraic-style name, e.g. `d3` for (2, 3).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// Final result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    DarkWins,
    LightWins,
    Draw,
}

impl Outcome {
    /// Higher disc count wins; equal counts draw.
    pub fn from_counts(dark: u8, light: u8) -> Self {
        match dark.cmp(&light) {
            std::cmp::Ordering::Greater => Outcome::DarkWins,
            std::cmp::Ordering::Less => Outcome::LightWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::DarkWins => Some(Side::Dark),
            Outcome::LightWins => Some(Side::Light),
            Outcome::Draw => None,
        }
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// 64 cells in row-major order: 0=empty, 1=dark, 2=light.
    pub board: Vec<u8>,
    /// `None` once the game is over.
    pub side_to_move: Option<Side>,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    pub outcome: Option<Outcome>,
    /// Contract:
    /// - `Some(side)` when `side` was forced to pass by the last transition.
    /// - `None` otherwise.
    pub passed: Option<Side>,
    /// Contract:
    /// - After a move: positions converted by that move (destination excluded).
    /// - After undo/restart: empty.
    pub flipped: Vec<Position>,
    pub last_move: Option<Position>,
    pub legal_moves: Vec<Position>,
    pub computer_to_move: bool,
    pub can_undo: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_rejects_off_board_coordinates() {
        assert!(Position::new(7, 7).is_some());
        assert!(Position::new(8, 0).is_none());
        assert!(Position::new(0, 8).is_none());
    }

    #[test]
    fn position_index_is_row_major() {
        let pos = Position::new(2, 3).unwrap();
        assert_eq!(pos.index(), 19);
        assert_eq!(Position::from_index(19), pos);
        assert_eq!(pos.to_string(), "d3");
    }

    #[test]
    fn outcome_follows_disc_counts() {
        assert_eq!(Outcome::from_counts(35, 29), Outcome::DarkWins);
        assert_eq!(Outcome::from_counts(10, 54), Outcome::LightWins);
        assert_eq!(Outcome::from_counts(32, 32), Outcome::Draw);
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn opponent_is_an_involution() {
        assert_eq!(Side::Dark.opponent(), Side::Light);
        assert_eq!(Side::Light.opponent().opponent(), Side::Light);
        assert_eq!(Side::default(), Side::Dark);
    }
}

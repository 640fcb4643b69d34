//! Turn sequencing: whose move it is, forced passes and the end of the game.

use log::info;

use crate::board::Board;
use crate::movegen::legal_moves;
use crate::types::{Outcome, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    ToMove(Side),
    GameOver(Outcome),
}

impl TurnState {
    pub fn side_to_move(self) -> Option<Side> {
        match self {
            TurnState::ToMove(side) => Some(side),
            TurnState::GameOver(_) => None,
        }
    }

    pub fn outcome(self) -> Option<Outcome> {
        match self {
            TurnState::ToMove(_) => None,
            TurnState::GameOver(outcome) => Some(outcome),
        }
    }

    pub fn is_game_over(self) -> bool {
        matches!(self, TurnState::GameOver(_))
    }
}

impl Default for TurnState {
    fn default() -> Self {
        TurnState::ToMove(Side::Dark)
    }
}

/// Next turn state, plus the side that was forced to pass on the way there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: TurnState,
    pub passed: Option<Side>,
}

/// Decides the next state after `mover` has played and produced `board`.
///
/// The opponent moves next if it can. Otherwise it passes and `mover` plays
/// again, and when neither side can move the game ends.
pub fn after_move(mover: Side, board: &Board) -> Transition {
    settle(mover.opponent(), board)
}

/// Decides who actually moves when control reaches `side` on `board`.
///
/// Must be evaluated before asking `side` for a move so that a side without
/// legal moves passes automatically.
pub fn settle(side: Side, board: &Board) -> Transition {
    if !legal_moves(board, side).is_empty() {
        return Transition {
            state: TurnState::ToMove(side),
            passed: None,
        };
    }

    let other = side.opponent();
    if !legal_moves(board, other).is_empty() {
        info!("{side} has no legal move and passes");
        return Transition {
            state: TurnState::ToMove(other),
            passed: Some(side),
        };
    }

    let (dark, light) = board.count();
    let outcome = Outcome::from_counts(dark, light);
    info!("game over: {outcome:?} ({dark}-{light})");
    Transition {
        state: TurnState::GameOver(outcome),
        passed: None,
    }
}

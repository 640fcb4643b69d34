//! One-ply move scoring shared by the computer player and the hint feature.

use log::debug;

use crate::board::Board;
use crate::movegen::{CaptureSet, LegalMoves, mobility};
use crate::types::{Position, Side};

const CAPTURE_WEIGHT: i32 = 3;
const MOBILITY_WEIGHT: i32 = 2;

/// Strategic value of each square. Corners can never be flipped back, while
/// the squares next to an empty corner hand it to the opponent.
pub const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [120, -20, 20, 5, 5, 20, -20, 120],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [5, -5, 3, 3, 3, 3, -5, 5],
    [20, -5, 15, 3, 3, 15, -5, 20],
    [-20, -40, -5, -5, -5, -5, -40, -20],
    [120, -20, 20, 5, 5, 20, -20, 120],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub pos: Position,
    pub captures: CaptureSet,
    pub score: i32,
}

pub fn positional_weight(pos: Position) -> i32 {
    POSITION_WEIGHTS[pos.row as usize][pos.col as usize]
}

/// Scores playing `pos` for `side`.
///
/// `positional weight + 3 * captured discs - 2 * opponent replies`.
pub fn score_move(board: &Board, side: Side, pos: Position, captures: CaptureSet) -> i32 {
    let next = board.apply_move(pos, side, captures);
    let replies = mobility(&next, side.opponent()) as i32;

    positional_weight(pos) + CAPTURE_WEIGHT * captures.len() as i32 - MOBILITY_WEIGHT * replies
}

/// Every candidate with its score, best first. Equal scores keep row-major order.
pub fn rank_moves(legal: &LegalMoves, board: &Board, side: Side) -> Vec<ScoredMove> {
    let mut scored: Vec<ScoredMove> = legal
        .iter()
        .map(|(pos, captures)| ScoredMove {
            pos,
            captures,
            score: score_move(board, side, pos, captures),
        })
        .collect();

    scored.sort_by(|left, right| right.score.cmp(&left.score));
    scored
}

/// Picks the best move for `side`, or `None` when `legal` is empty.
pub fn select_move(legal: &LegalMoves, board: &Board, side: Side) -> Option<Position> {
    let ranked = rank_moves(legal, board, side);
    let chosen = ranked.first()?;

    debug!(
        "{side} evaluator picked {} (score {}) from {:?}",
        chosen.pos,
        chosen.score,
        ranked
            .iter()
            .map(|m| (m.pos.to_string(), m.score))
            .collect::<Vec<_>>()
    );
    Some(chosen.pos)
}

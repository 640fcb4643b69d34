//! Game session: undo history, hints and the delayed computer move.

use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use web_time::Instant;

use crate::board::Board;
use crate::eval::select_move;
use crate::movegen::{CaptureSet, legal_moves};
use crate::turn::{Transition, TurnState, after_move, settle};
use crate::types::{GameSnapshot, Position, Side};

const DEFAULT_COMPUTER_DELAY_MS: u64 = 500;

/// Who plays which side, and how long the computer waits before moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Side played by the computer; `None` for two human players.
    pub computer: Option<Side>,
    pub computer_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            computer: Some(Side::Light),
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
        }
    }
}

impl GameConfig {
    pub fn two_players() -> Self {
        Self {
            computer: None,
            ..Self::default()
        }
    }

    pub fn is_computer(&self, side: Side) -> bool {
        self.computer == Some(side)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },
    #[error("it is the computer's turn")]
    ComputerTurn,
    #[error("illegal move at {0}")]
    IllegalMove(Position),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("no computer move is pending")]
    NoPendingMove,
    #[error("computer move ticket {ticket} is stale (current generation {current})")]
    StaleTicket { ticket: u32, current: u32 },
}

/// Binds a scheduled computer move to the game generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveTicket(pub u32);

/// Issued whenever the side to move is computer-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerMoveRequest {
    pub ticket: MoveTicket,
    pub side: Side,
    pub delay: Duration,
    pub due: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HistoryEntry {
    board: Board,
    side: Side,
}

/// A game in progress: the current position, the undo history and any
/// scheduled computer move.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    turn: TurnState,
    history: Vec<HistoryEntry>,
    /// Bumped on every state change; pending computer moves carry the value
    /// they were issued for.
    generation: u32,
    pending: Option<ComputerMoveRequest>,
    passed: Option<Side>,
    flipped: CaptureSet,
    last_move: Option<Position>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_position(config, Board::new(), Side::Dark)
    }

    /// Starts from an arbitrary position with `side` to move. A side without
    /// legal moves passes immediately.
    pub fn with_position(config: GameConfig, board: Board, side: Side) -> Self {
        let mut game = Self {
            config,
            board,
            turn: TurnState::ToMove(side),
            history: Vec::new(),
            generation: 0,
            pending: None,
            passed: None,
            flipped: CaptureSet::default(),
            last_move: None,
        };
        let transition = settle(side, &game.board);
        game.enter(transition);
        game
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Human move for the side to move.
    pub fn place(&mut self, row: u8, col: u8) -> Result<Transition, GameError> {
        let side = match self.turn {
            TurnState::GameOver(_) => return Err(GameError::GameOver),
            TurnState::ToMove(side) => side,
        };
        if self.config.is_computer(side) {
            return Err(GameError::ComputerTurn);
        }

        let pos = Position::new(row, col).ok_or(GameError::OutOfRange { row, col })?;
        let captures = legal_moves(&self.board, side)
            .captures(pos)
            .ok_or(GameError::IllegalMove(pos))?;

        debug!("{side} plays {pos}");
        Ok(self.play(pos, side, captures))
    }

    /// The outstanding computer move request, if the computer is to move.
    pub fn pending_computer_move(&self) -> Option<ComputerMoveRequest> {
        self.pending
    }

    /// Plays the computer move issued with `ticket`.
    ///
    /// Fails with [`GameError::StaleTicket`] when the game changed after the
    /// ticket was issued; such a move must never be applied.
    pub fn play_computer_move(&mut self, ticket: MoveTicket) -> Result<Transition, GameError> {
        if ticket.0 != self.generation {
            debug!(
                "discarding computer move for generation {} (now {})",
                ticket.0, self.generation
            );
            return Err(GameError::StaleTicket {
                ticket: ticket.0,
                current: self.generation,
            });
        }
        let request = self.pending.ok_or(GameError::NoPendingMove)?;
        Ok(self.play_request(request))
    }

    /// Plays the pending computer move once its delay has elapsed at `now`.
    pub fn tick(&mut self, now: Instant) -> Option<Transition> {
        let request = self.pending?;
        if now < request.due {
            return None;
        }
        Some(self.play_request(request))
    }

    /// Evaluator recommendation for the side to move.
    pub fn hint(&self) -> Option<Position> {
        let side = self.turn.side_to_move()?;
        select_move(&legal_moves(&self.board, side), &self.board, side)
    }

    /// Restores the position before the last move.
    ///
    /// Against the computer, keeps rewinding past the computer's own moves so
    /// that control returns to the human.
    pub fn undo(&mut self) -> Result<(), GameError> {
        let mut entry = self.history.pop().ok_or(GameError::NothingToUndo)?;
        while self.config.is_computer(entry.side) {
            match self.history.pop() {
                Some(earlier) => entry = earlier,
                None => break,
            }
        }

        debug!("undo to {} to move ({} entries left)", entry.side, self.history.len());
        self.board = entry.board;
        self.flipped = CaptureSet::default();
        self.last_move = None;
        self.enter(Transition {
            state: TurnState::ToMove(entry.side),
            passed: None,
        });
        Ok(())
    }

    pub fn restart(&mut self) {
        debug!("restart");
        self.board = Board::new();
        self.history.clear();
        self.flipped = CaptureSet::default();
        self.last_move = None;
        let transition = settle(Side::Dark, &self.board);
        self.enter(transition);
    }

    pub fn state(&self) -> GameSnapshot {
        let (dark_count, light_count) = self.board.count();
        let legal = match self.turn {
            TurnState::ToMove(side) => legal_moves(&self.board, side).positions(),
            TurnState::GameOver(_) => Vec::new(),
        };

        GameSnapshot {
            board: self.board.to_array().to_vec(),
            side_to_move: self.turn.side_to_move(),
            dark_count,
            light_count,
            is_game_over: self.turn.is_game_over(),
            outcome: self.turn.outcome(),
            passed: self.passed,
            flipped: self.flipped.iter().collect(),
            last_move: self.last_move,
            legal_moves: legal,
            computer_to_move: self.pending.is_some(),
            can_undo: self.can_undo(),
        }
    }

    fn play_request(&mut self, request: ComputerMoveRequest) -> Transition {
        let side = request.side;
        let legal = legal_moves(&self.board, side);
        let Some(pos) = select_move(&legal, &self.board, side) else {
            unreachable!("computer was asked to move without legal moves");
        };
        let Some(captures) = legal.captures(pos) else {
            unreachable!("evaluator chose a move outside the legal set");
        };

        debug!("computer ({side}) plays {pos}");
        self.play(pos, side, captures)
    }

    fn play(&mut self, pos: Position, side: Side, captures: CaptureSet) -> Transition {
        self.history.push(HistoryEntry {
            board: self.board,
            side,
        });
        self.board = self.board.apply_move(pos, side, captures);
        self.flipped = captures;
        self.last_move = Some(pos);

        let transition = after_move(side, &self.board);
        self.enter(transition);
        transition
    }

    /// Commits a transition. Any previously issued computer move is cancelled,
    /// and a new one is issued when the computer is to move.
    fn enter(&mut self, transition: Transition) {
        self.turn = transition.state;
        self.passed = transition.passed;
        self.generation = self.generation.wrapping_add(1);

        self.pending = match transition.state {
            TurnState::ToMove(side) if self.config.is_computer(side) => {
                let delay = Duration::from_millis(self.config.computer_delay_ms);
                Some(ComputerMoveRequest {
                    ticket: MoveTicket(self.generation),
                    side,
                    delay,
                    due: Instant::now() + delay,
                })
            }
            _ => None,
        };
    }
}

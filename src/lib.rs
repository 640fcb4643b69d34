use wasm_bindgen::prelude::*;

pub mod board;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod turn;
pub mod types;
mod wasm;

pub use board::{Board, ParseBoardError};
pub use eval::{rank_moves, score_move, select_move};
pub use game::{Game, GameConfig, GameError, MoveTicket};
pub use movegen::{CaptureSet, LegalMoves, legal_moves};
pub use turn::{Transition, TurnState};
pub use types::{Cell, GameSnapshot, Outcome, Position, Side};
pub use wasm::ReversiGame;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

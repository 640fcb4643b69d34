//! JavaScript bindings. Snapshots and configuration cross the boundary as
//! plain objects through `serde-wasm-bindgen`; errors surface as exceptions.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::{Game, GameConfig, MoveTicket};
use crate::types::Side;

/// Computer move request as seen by the front end, which owns the timer.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComputerMoveView {
    ticket: u32,
    side: Side,
    delay_ms: u64,
}

#[wasm_bindgen]
pub struct ReversiGame {
    game: Game,
}

#[wasm_bindgen]
impl ReversiGame {
    /// `config` may be `undefined` or a partial `{ computer, computerDelayMs }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<ReversiGame, JsError> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            game: Game::new(config),
        })
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.state())?)
    }

    /// Human move; returns the new state.
    pub fn place(&mut self, row: u8, col: u8) -> Result<JsValue, JsError> {
        self.game.place(row, col)?;
        self.state()
    }

    pub fn hint(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.game.hint())?)
    }

    pub fn undo(&mut self) -> Result<JsValue, JsError> {
        self.game.undo()?;
        self.state()
    }

    pub fn restart(&mut self) -> Result<JsValue, JsError> {
        self.game.restart();
        self.state()
    }

    /// `{ ticket, side, delayMs }` when the computer is to move, else `undefined`.
    #[wasm_bindgen(js_name = pendingComputerMove)]
    pub fn pending_computer_move(&self) -> Result<JsValue, JsError> {
        let view = self
            .game
            .pending_computer_move()
            .map(|request| ComputerMoveView {
                ticket: request.ticket.0,
                side: request.side,
                delay_ms: request.delay.as_millis() as u64,
            });
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    /// Plays the computer move for `ticket`; throws if the game moved on since.
    #[wasm_bindgen(js_name = playComputerMove)]
    pub fn play_computer_move(&mut self, ticket: u32) -> Result<JsValue, JsError> {
        self.game.play_computer_move(MoveTicket(ticket))?;
        self.state()
    }
}

#![cfg(target_arch = "wasm32")]

use reversi_engine::{GameConfig, ReversiGame, wasm_ready};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::wasm_bindgen_test;

fn field(value: &JsValue, name: &str) -> JsValue {
    js_sys::Reflect::get(value, &JsValue::from_str(name)).unwrap()
}

fn new_game(config: JsValue) -> ReversiGame {
    ReversiGame::new(config).unwrap_or_else(|_| panic!("config must be accepted"))
}

#[wasm_bindgen_test]
fn wasm_is_ready() {
    assert!(wasm_ready());
}

#[wasm_bindgen_test]
fn default_game_starts_with_four_dark_moves() {
    let game = new_game(JsValue::UNDEFINED);
    let state = game.state().unwrap_or_else(|_| panic!("state"));

    assert_eq!(field(&state, "sideToMove").as_string().as_deref(), Some("dark"));
    assert_eq!(js_sys::Array::from(&field(&state, "legalMoves")).length(), 4);
    assert_eq!(field(&state, "darkCount").as_f64(), Some(2.0));
}

#[wasm_bindgen_test]
fn stale_computer_ticket_throws() {
    let config = serde_wasm_bindgen::to_value(&GameConfig {
        computer: Some(reversi_engine::Side::Light),
        computer_delay_ms: 0,
    })
    .unwrap();
    let mut game = new_game(config);

    game.place(2, 3).unwrap_or_else(|_| panic!("d3 is legal"));
    let pending = game.pending_computer_move().unwrap_or_else(|_| panic!("pending"));
    let ticket = field(&pending, "ticket").as_f64().unwrap() as u32;

    game.undo().unwrap_or_else(|_| panic!("undo"));

    assert!(game.play_computer_move(ticket).is_err());
}

#[wasm_bindgen_test]
fn illegal_move_throws() {
    let mut game = new_game(JsValue::UNDEFINED);

    assert!(game.place(0, 0).is_err());
}

mod config;
mod error;
mod gameplay;
mod model;
mod puzzles;
mod renderer;

use std::sync::OnceLock;

use crate::config::GameConfig;
use crate::gameplay::*;
use crate::model::ControlAction;

use macroquad::prelude::*;

const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::Key6,
    KeyCode::Key7,
    KeyCode::Key8,
    KeyCode::Key9,
];

static CONFIG: OnceLock<GameConfig> = OnceLock::new();

/// Read once; the window setup and the game share it.
fn config() -> &'static GameConfig {
    CONFIG.get_or_init(GameConfig::from_env)
}

fn window_conf() -> Conf {
    config().window_conf()
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config().clone();
    info!("Starting with undo {}", if config.undo_enable { "enabled" } else { "disabled" });
    let mut engine = GameEngine::new(config);
    loop {
        engine.render();
        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            engine.handle_click(x, y);
        }
        for (index, key) in DIGIT_KEYS.iter().enumerate() {
            if is_key_pressed(*key) {
                engine.handle_hit_item(model::HitItem::Pitcher { index });
            }
        }
        if is_key_pressed(KeyCode::Escape) {
            engine.handle_game_action(ControlAction::Deselect);
        }
        if is_key_pressed(KeyCode::R) {
            engine.handle_game_action(ControlAction::Reset);
        }
        if is_key_pressed(KeyCode::Z) {
            engine.handle_game_action(ControlAction::Undo);
        }
        if is_key_pressed(KeyCode::Y) {
            engine.handle_game_action(ControlAction::Redo);
        }
        next_frame().await;
    }
}

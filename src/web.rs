//! Browser bindings
//!
//! The page owns the animation frame loop and the DOM; it forwards key and
//! gamepad events here and receives one JSON frame per tick through its
//! render callback.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::platform::{Frame, Frontend, GameLoop, GamepadSample};
use crate::settings::{LevelAdvanceRule, Settings};

/// Frontend backed by two JS callbacks
struct JsFrontend {
    render: Function,
    on_exit: Function,
}

impl Frontend for JsFrontend {
    fn present(&mut self, frame: &Frame<'_>) {
        let json = match frame.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("Failed to encode frame: {}", e);
                return;
            }
        };
        if let Err(e) = self.render.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            log::warn!("Render callback failed: {:?}", e);
        }
    }

    fn return_to_menu(&mut self) {
        if let Err(e) = self.on_exit.call0(&JsValue::NULL) {
            log::warn!("Return-to-menu callback failed: {:?}", e);
        }
    }
}

/// Game instance exported to JS
#[wasm_bindgen]
pub struct WebGame {
    game: GameLoop,
    frontend: JsFrontend,
    last_time: f64,
}

#[wasm_bindgen]
impl WebGame {
    /// `render(frameJson)` is called once per tick, `onExit()` when the
    /// player leaves the game
    #[wasm_bindgen(constructor)]
    pub fn new(render: Function, on_exit: Function) -> WebGame {
        let settings = Settings::load();
        WebGame {
            game: GameLoop::new(&settings),
            frontend: JsFrontend { render, on_exit },
            last_time: 0.0,
        }
    }

    /// Feed a `requestAnimationFrame` timestamp (ms). Returns ticks run.
    pub fn frame(&mut self, time_ms: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time_ms;
        self.game.frame(dt, &mut self.frontend)
    }

    pub fn key_down(&mut self, key: &str) {
        self.game.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.game.key_up(key);
    }

    /// One `navigator.getGamepads()[0]` poll (standard mapping)
    pub fn gamepad(&mut self, axis_x: f32, axis_y: f32, a: bool, b: bool, start: bool) {
        self.game.poll_gamepad(GamepadSample {
            axis_x,
            axis_y,
            a,
            b,
            start,
        });
    }

    pub fn gamepad_disconnected(&mut self) {
        self.game.input.set_gamepad_connected(false);
    }

    pub fn set_demo(&mut self, demo: bool) {
        self.game.set_demo(demo);
    }

    /// Switch and persist the level advance rule ("crossed" or "exact").
    /// Returns false for an unknown name.
    pub fn set_level_advance(&mut self, rule: &str) -> bool {
        let Some(rule) = LevelAdvanceRule::parse(rule) else {
            log::warn!("Unknown level advance rule: {}", rule);
            return false;
        };
        let mut settings = Settings::load();
        settings.level_advance = rule;
        settings.save();
        self.game.state.advance_rule = rule;
        true
    }

    pub fn running(&self) -> bool {
        self.game.is_running()
    }

    /// Resume timing after the tab was hidden, without a catch-up burst
    pub fn reset_clock(&mut self) {
        self.last_time = 0.0;
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Retro Platformer loaded");
}

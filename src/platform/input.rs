//! Keyboard and gamepad ingestion
//!
//! Events arrive between ticks and only update pending intent (horizontal
//! speed, jump edges, pause, menu commands). `take_tick_input` hands the
//! intent to the next tick and clears the one-shot edges.

use serde::Serialize;

use crate::consts::ANALOG_RESPONSE_EXPONENT;
use crate::settings::Settings;
use crate::sim::{GamePhase, TickInput};

/// Logical action a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
    Exit,
    /// Move the game-over selection
    MenuToggle,
    /// Activate the game-over selection
    MenuConfirm,
}

/// Map a DOM `KeyboardEvent.key` value to an action.
///
/// Arrow keys and the numeric keypad both work; the game-over screen uses
/// its own bindings.
pub fn action_for_key(key: &str, game_over: bool) -> Option<Action> {
    if game_over {
        return match key {
            "ArrowUp" | "ArrowDown" | "8" | "2" => Some(Action::MenuToggle),
            "Enter" | "5" => Some(Action::MenuConfirm),
            "9" | "Escape" => Some(Action::Exit),
            _ => None,
        };
    }

    match key {
        "ArrowLeft" | "4" => Some(Action::MoveLeft),
        "ArrowRight" | "6" => Some(Action::MoveRight),
        "ArrowUp" | "8" => Some(Action::Jump),
        "5" => Some(Action::Pause),
        "9" | "Escape" => Some(Action::Exit),
        _ => None,
    }
}

/// Entries on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MenuOption {
    #[default]
    PlayAgain,
    ReturnToMenu,
}

impl MenuOption {
    pub fn toggled(self) -> Self {
        match self {
            MenuOption::PlayAgain => MenuOption::ReturnToMenu,
            MenuOption::ReturnToMenu => MenuOption::PlayAgain,
        }
    }
}

/// Requests that leave the simulation itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a fresh run
    Restart,
    /// Hand control back to the game menu
    ReturnToMenu,
}

/// One poll of a standard-mapping gamepad
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadSample {
    /// Left stick, -1 (left) to 1 (right)
    pub axis_x: f32,
    /// Left stick, -1 (up) to 1 (down)
    pub axis_y: f32,
    /// A / cross
    pub a: bool,
    /// B / circle
    pub b: bool,
    pub start: bool,
}

/// Map a stick deflection to horizontal speed.
///
/// Inside the deadzone the result is zero; outside it follows
/// `sign(axis) * min(|axis|^1.8 * multiplier, max_speed)`.
pub fn analog_response(axis: f32, deadzone: f32, multiplier: f32, max_speed: f32) -> f32 {
    if axis.abs() <= deadzone {
        return 0.0;
    }
    axis.signum() * (axis.abs().powf(ANALOG_RESPONSE_EXPONENT) * multiplier).min(max_speed)
}

/// Pending input between ticks
#[derive(Debug, Clone)]
pub struct InputState {
    settings: Settings,
    move_x: f32,
    jump_down: bool,
    jump_pressed: bool,
    jump_released: bool,
    pause: bool,
    menu: MenuOption,
    command: Option<Command>,
    gamepad_connected: bool,
    last_pad: GamepadSample,
}

impl InputState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            settings: settings.clone(),
            move_x: 0.0,
            jump_down: false,
            jump_pressed: false,
            jump_released: false,
            pause: false,
            menu: MenuOption::default(),
            command: None,
            gamepad_connected: false,
            last_pad: GamepadSample::default(),
        }
    }

    pub fn menu_selection(&self) -> MenuOption {
        self.menu
    }

    pub fn gamepad_connected(&self) -> bool {
        self.gamepad_connected
    }

    /// While a pad is connected the keyboard is ignored
    pub fn set_gamepad_connected(&mut self, connected: bool) {
        if connected != self.gamepad_connected {
            log::info!("Gamepad {}", if connected { "connected" } else { "disconnected" });
        }
        self.gamepad_connected = connected;
        self.last_pad = GamepadSample::default();
    }

    pub fn key_down(&mut self, key: &str, phase: GamePhase) {
        if self.gamepad_connected {
            return;
        }
        let Some(action) = action_for_key(key, phase.is_terminal()) else {
            return;
        };

        match action {
            Action::MoveLeft => self.move_x = -self.settings.keyboard_move_speed,
            Action::MoveRight => self.move_x = self.settings.keyboard_move_speed,
            Action::Jump => {
                // Auto-repeat keydowns are not new presses
                if !self.jump_down {
                    self.jump_down = true;
                    self.jump_pressed = true;
                }
            }
            Action::Pause => self.pause = true,
            Action::Exit => self.command = Some(Command::ReturnToMenu),
            Action::MenuToggle => self.menu = self.menu.toggled(),
            Action::MenuConfirm => self.confirm_menu(),
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if self.gamepad_connected {
            return;
        }
        match action_for_key(key, false) {
            // Releasing one direction only stops motion in that direction
            Some(Action::MoveLeft) if self.move_x < 0.0 => self.move_x = 0.0,
            Some(Action::MoveRight) if self.move_x > 0.0 => self.move_x = 0.0,
            Some(Action::Jump) => {
                self.jump_down = false;
                self.jump_released = true;
            }
            _ => {}
        }
    }

    /// Feed one gamepad poll. Buttons act on their press/release edges.
    pub fn poll_gamepad(&mut self, pad: GamepadSample, phase: GamePhase) {
        if !self.gamepad_connected {
            self.set_gamepad_connected(true);
        }
        let last = self.last_pad;
        self.last_pad = pad;
        let deadzone = self.settings.analog_deadzone;

        if phase.is_terminal() {
            let stick_pushed = pad.axis_y.abs() > deadzone && last.axis_y.abs() <= deadzone;
            if stick_pushed {
                self.menu = self.menu.toggled();
            }
            if pad.a && !last.a {
                self.confirm_menu();
            }
            if pad.b && !last.b {
                self.command = Some(Command::ReturnToMenu);
            }
            return;
        }

        self.move_x = analog_response(
            pad.axis_x,
            deadzone,
            self.settings.analog_multiplier,
            self.settings.analog_max_speed,
        );

        if pad.a && !last.a {
            self.jump_down = true;
            self.jump_pressed = true;
        } else if !pad.a && last.a {
            self.jump_down = false;
            self.jump_released = true;
        }
        if pad.start && !last.start {
            self.pause = true;
        }
        if pad.b && !last.b {
            self.command = Some(Command::ReturnToMenu);
        }
    }

    fn confirm_menu(&mut self) {
        self.command = Some(match self.menu {
            MenuOption::PlayAgain => Command::Restart,
            MenuOption::ReturnToMenu => Command::ReturnToMenu,
        });
    }

    /// Pending menu/exit request, if any
    pub fn take_command(&mut self) -> Option<Command> {
        self.command.take()
    }

    /// Input for the next tick; one-shot edges are cleared
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_x: self.move_x,
            jump_pressed: self.jump_pressed,
            jump_released: self.jump_released,
            pause: self.pause,
        };
        self.jump_pressed = false;
        self.jump_released = false;
        self.pause = false;
        input
    }

    /// Input for a tick that starts paused or finished.
    ///
    /// Only movement and the pause toggle are handed over. A pending jump release stays
    /// queued for the first playing tick; a press made meanwhile is dropped.
    pub fn take_idle_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            move_x: self.move_x,
            pause: self.pause,
            ..Default::default()
        };
        self.jump_pressed = false;
        self.pause = false;
        input
    }

    /// Forget motion and menu state (new run)
    pub fn reset(&mut self) {
        self.move_x = 0.0;
        self.jump_pressed = false;
        self.jump_released = false;
        self.pause = false;
        self.menu = MenuOption::default();
        self.command = None;
    }
}

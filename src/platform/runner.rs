//! Fixed-step loop
//!
//! Host frames arrive at whatever rate the platform manages; the loop
//! accumulates their durations and runs whole simulation ticks. Each tick
//! runs the spawner source, then the tick itself, then presents a snapshot.

use serde::Serialize;

use super::input::{Command, GamepadSample, InputState, MenuOption};
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, Snapshot, TickEvents, autopilot_input, run_spawner, tick};

/// What the loop hands to the presentation layer each tick
#[derive(Debug, Serialize)]
pub struct Frame<'a> {
    #[serde(flatten)]
    pub snapshot: Snapshot<'a>,
    /// Highlighted game-over entry, present only once the run has ended
    pub menu: Option<MenuOption>,
}

impl Frame<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Rendering and navigation collaborator
pub trait Frontend {
    /// Draw one tick's state. Must not keep the borrow.
    fn present(&mut self, frame: &Frame<'_>);

    /// The player asked to leave; the loop has stopped
    fn return_to_menu(&mut self);
}

/// Game instance holding all state
pub struct GameLoop {
    pub state: GameState,
    pub input: InputState,
    accumulator: f32,
    running: bool,
    /// Autopilot drives instead of the player
    demo: bool,
}

impl GameLoop {
    pub fn new(settings: &Settings) -> Self {
        log::info!("Starting run (level advance rule: {})", settings.level_advance.as_str());
        Self {
            state: GameState::with_rule(settings.level_advance),
            input: InputState::new(settings),
            accumulator: 0.0,
            running: true,
            demo: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_demo(&mut self, demo: bool) {
        if demo != self.demo {
            log::info!("Demo mode: {}", demo);
        }
        self.demo = demo;
    }

    pub fn key_down(&mut self, key: &str) {
        self.input.key_down(key, self.state.phase);
    }

    pub fn key_up(&mut self, key: &str) {
        self.input.key_up(key);
    }

    pub fn poll_gamepad(&mut self, pad: GamepadSample) {
        self.input.poll_gamepad(pad, self.state.phase);
    }

    /// Advance by a host frame of `frame_dt` seconds. Returns ticks run.
    pub fn frame<F: Frontend>(&mut self, frame_dt: f32, frontend: &mut F) -> u32 {
        if !self.running {
            return 0;
        }

        self.handle_command(frontend);
        if !self.running {
            return 0;
        }

        let dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.step(frontend);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        // Drop the backlog rather than spiral
        if substeps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run exactly one tick and present it
    pub fn step<F: Frontend>(&mut self, frontend: &mut F) -> TickEvents {
        let input = if self.demo {
            autopilot_input(&self.state)
        } else if self.state.phase == GamePhase::Playing {
            self.input.take_tick_input()
        } else {
            self.input.take_idle_tick_input()
        };

        run_spawner(&mut self.state);
        let events = tick(&mut self.state, &input);

        let menu = self.state.phase.is_terminal().then(|| self.input.menu_selection());
        let frame = Frame {
            snapshot: Snapshot::capture(&self.state),
            menu,
        };
        frontend.present(&frame);

        events
    }

    fn handle_command<F: Frontend>(&mut self, frontend: &mut F) {
        match self.input.take_command() {
            Some(Command::Restart) if self.state.phase.is_terminal() => {
                self.state.restart();
                self.input.reset();
                self.accumulator = 0.0;
            }
            Some(Command::Restart) => {}
            Some(Command::ReturnToMenu) => {
                log::info!("Returning to menu (score {})", self.state.score);
                self.running = false;
                frontend.return_to_menu();
            }
            None => {}
        }
    }
}

//! Retro Platformer - side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic fixed-step simulation (physics, collisions, levels)
//! - `platform`: Input ingestion and the fixed-step loop driving the sim
//! - `settings`: Player-adjustable input tuning and rules
//! - `web`: WebAssembly bindings for a browser frontend

pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::{LevelAdvanceRule, Settings};

/// Game configuration constants
///
/// World units are pixels of the 800x600 play field, y pointing up
/// from the bottom edge. Velocities are in units per tick.
pub mod consts {
    use super::ms_to_ticks;

    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// World and viewport dimensions
    pub const WORLD_WIDTH: f32 = 3200.0;
    pub const WORLD_HEIGHT: f32 = 600.0;
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    /// Player distance from the left viewport edge before the camera scrolls
    pub const CAMERA_BUFFER: f32 = 400.0;

    /// Top of the ground strip
    pub const GROUND_HEIGHT: f32 = 80.0;
    pub const PLATFORM_HEIGHT: f32 = 40.0;
    /// How far below a platform's base a falling player still snaps onto it
    pub const PLATFORM_SNAP_MARGIN: f32 = 8.0;

    /// Player box
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 32.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;

    /// Hostile box
    pub const HOSTILE_WIDTH: f32 = 32.0;
    pub const HOSTILE_HEIGHT: f32 = 32.0;

    /// Coin box (square)
    pub const COIN_SIZE: f32 = 20.0;
    pub const POINTS_PER_COIN: u64 = 100;
    /// Score multiple that completes a level
    pub const LEVEL_ADVANCE_SCORE: u64 = 500;

    /// Gravity while the jump button is held inside the hold window
    pub const GRAVITY: f32 = 1.2;
    /// Multiplier once the hold window closes or the button is released
    pub const STRONG_GRAVITY_FACTOR: f32 = 1.5;
    /// Launch velocity
    pub const JUMP_FORCE: f32 = 20.0;
    /// Floor applied to vertical velocity by an early release
    pub const MIN_JUMP_FORCE: f32 = 15.0;
    pub const JUMP_CANCEL_FORCE: f32 = -3.0;
    /// Variable-height window (250 ms)
    pub const JUMP_HOLD_TICKS: u64 = ms_to_ticks(250) as u64;

    /// Keyboard walking speed
    pub const MOVE_SPEED: f32 = 6.0;
    /// Hard cap on horizontal speed regardless of input source
    pub const MAX_MOVE_SPEED: f32 = 20.0;

    /// Gamepad defaults
    pub const ANALOG_DEADZONE: f32 = 0.15;
    pub const ANALOG_MOVE_MULTIPLIER: f32 = 20.0;
    pub const ANALOG_RESPONSE_EXPONENT: f32 = 1.8;
}

/// Convert a millisecond duration to whole simulation ticks
#[inline]
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms * consts::TICK_RATE_HZ / 1000
}


//! Platform abstraction layer
//!
//! Handles the host-facing side of the game:
//! - Input events (keyboard, gamepad) into pending tick input
//! - The fixed-step loop that drives the simulation and presents frames

pub mod input;
pub mod runner;

pub use input::{Command, GamepadSample, InputState, MenuOption, analog_response};
pub use runner::{Frame, Frontend, GameLoop};

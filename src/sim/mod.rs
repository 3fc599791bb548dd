//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (level order for platforms/pickups, spawn order for hostiles)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, Landing, resolve_landing};
pub use level::{LEVELS, LevelDef, Platform};
pub use snapshot::{PlayerView, Snapshot};
pub use spawner::{SpawnTimer, run_spawner};
pub use state::{
    Facing, GamePhase, GameState, Hostile, JumpState, Outcome, Pickup, PickupKind, Player,
};
pub use tick::{TickEvents, TickInput, camera_offset, tick};

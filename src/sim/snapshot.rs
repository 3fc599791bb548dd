//! Read-only view of the simulation handed to the frontend once per tick

use serde::Serialize;

use super::level::Platform;
use super::state::{Facing, GamePhase, GameState, Hostile, Pickup};

/// Player fields a renderer needs
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub facing: Facing,
    pub jumping: bool,
    pub moving: bool,
}

/// Immutable snapshot borrowing the state it was captured from
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub tick: u64,
    /// 1-based level number for display
    pub level: usize,
    pub score: u64,
    pub phase: GamePhase,
    pub camera_x: f32,
    pub player: PlayerView,
    pub platforms: &'a [Platform],
    pub hostiles: &'a [Hostile],
    pub pickups: &'a [Pickup],
    pub background_color: u32,
    pub ground_color: u32,
}

impl<'a> Snapshot<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        let player = &state.player;
        let level = state.level();
        Self {
            tick: state.time_ticks,
            level: state.level_index() + 1,
            score: state.score,
            phase: state.phase,
            camera_x: state.camera_x,
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                facing: player.facing,
                jumping: !player.is_grounded(),
                moving: player.is_moving(),
            },
            platforms: level.platforms,
            hostiles: &state.hostiles,
            pickups: &state.pickups,
            background_color: level.background_color,
            ground_color: level.ground_color,
        }
    }

    /// Active hostiles only
    pub fn visible_hostiles(&self) -> impl Iterator<Item = &Hostile> {
        self.hostiles.iter().filter(|h| h.active)
    }

    /// Uncollected pickups only
    pub fn visible_pickups(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter().filter(|p| p.active)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

//! Interval-driven hostile spawner
//!
//! Runs as its own source alongside the tick: each call counts one tick and,
//! once the level's interval has elapsed, drops a hostile just past the
//! right edge of the view.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};
use crate::consts::{GROUND_HEIGHT, HOSTILE_WIDTH, VIEWPORT_WIDTH};

/// Tick counter for the spawn interval
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpawnTimer {
    elapsed_ticks: u32,
}

impl SpawnTimer {
    pub fn reset(&mut self) {
        self.elapsed_ticks = 0;
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Count one tick. Returns true (and restarts) when `interval_ticks` have passed.
    pub fn advance(&mut self, interval_ticks: u32) -> bool {
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= interval_ticks.max(1) {
            self.elapsed_ticks = 0;
            true
        } else {
            false
        }
    }
}

/// Where a new hostile appears for a given camera offset
pub fn spawn_position(camera_x: f32) -> Vec2 {
    Vec2::new(camera_x + VIEWPORT_WIDTH + HOSTILE_WIDTH, GROUND_HEIGHT)
}

/// Advance the spawn timer by one tick, spawning when due.
///
/// Suspended (the timer does not advance) unless the game is playing.
/// Returns the new hostile's ID.
pub fn run_spawner(state: &mut GameState) -> Option<u32> {
    if state.phase != GamePhase::Playing {
        return None;
    }

    let interval = state.level().spawn_interval_ticks;
    if !state.spawn_timer.advance(interval) {
        return None;
    }

    let pos = spawn_position(state.camera_x);
    let id = state.spawn_hostile(pos);
    log::debug!("Spawned hostile {} at x={:.0} (level {})", id, pos.x, state.level_index() + 1);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Outcome;

    #[test]
    fn test_spawns_on_interval() {
        let mut state = GameState::new();
        let interval = state.level().spawn_interval_ticks;

        for _ in 0..interval - 1 {
            assert_eq!(run_spawner(&mut state), None);
        }
        assert!(run_spawner(&mut state).is_some());
        assert_eq!(state.hostiles.len(), 1);

        let hostile = &state.hostiles[0];
        assert_eq!(hostile.pos, Vec2::new(VIEWPORT_WIDTH + HOSTILE_WIDTH, GROUND_HEIGHT));
        assert!(hostile.active);
    }

    #[test]
    fn test_spawn_tracks_camera() {
        let mut state = GameState::new();
        state.camera_x = 640.0;
        let interval = state.level().spawn_interval_ticks;
        for _ in 0..interval {
            run_spawner(&mut state);
        }
        assert_eq!(state.hostiles[0].pos.x, 640.0 + VIEWPORT_WIDTH + HOSTILE_WIDTH);
    }

    #[test]
    fn test_suspended_while_paused() {
        let mut state = GameState::new();
        state.phase = GamePhase::Paused;
        let interval = state.level().spawn_interval_ticks;
        for _ in 0..interval * 3 {
            assert_eq!(run_spawner(&mut state), None);
        }
        assert_eq!(state.spawn_timer.elapsed_ticks(), 0);
    }

    #[test]
    fn test_suspended_when_terminal() {
        let mut state = GameState::new();
        state.phase = GamePhase::Terminal(Outcome::GameOver);
        for _ in 0..1000 {
            run_spawner(&mut state);
        }
        assert!(state.hostiles.is_empty());
    }

    #[test]
    fn test_level_load_resets_timer() {
        let mut state = GameState::new();
        for _ in 0..100 {
            run_spawner(&mut state);
        }
        assert_eq!(state.spawn_timer.elapsed_ticks(), 100);
        state.load_level(1);
        assert_eq!(state.spawn_timer.elapsed_ticks(), 0);
    }
}

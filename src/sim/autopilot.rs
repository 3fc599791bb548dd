//! Demo mode: generates input that walks right and hops over hostiles
//!
//! Used for the attract screen and the headless native run.

use super::state::GameState;
use super::tick::TickInput;
use crate::consts::{JUMP_HOLD_TICKS, MOVE_SPEED, PLAYER_WIDTH, WORLD_WIDTH};

/// Gap ahead of the player at which an approaching hostile triggers a jump
const HOSTILE_REACTION_DISTANCE: f32 = 90.0;
/// Gap ahead at which a platform edge triggers a jump
const PLATFORM_REACTION_DISTANCE: f32 = 40.0;

/// Decide this tick's input from the current state
pub fn autopilot_input(state: &GameState) -> TickInput {
    let player = &state.player;
    let front = player.pos.x + PLAYER_WIDTH;

    let hostile_ahead = state
        .hostiles
        .iter()
        .filter(|h| h.active)
        .any(|h| (0.0..HOSTILE_REACTION_DISTANCE).contains(&(h.pos.x - front)));

    let ledge_ahead = state
        .platforms()
        .iter()
        .any(|p| (0.0..PLATFORM_REACTION_DISTANCE).contains(&(p.x - front)));

    let move_x = if front < WORLD_WIDTH { MOVE_SPEED } else { 0.0 };

    // Let go once the hold window closes so the next jump can start
    let held_long_enough =
        player.jump_held && state.time_ticks.saturating_sub(player.jump_start_tick) >= JUMP_HOLD_TICKS;

    TickInput {
        move_x,
        jump_pressed: player.is_grounded() && !player.jump_held && (hostile_ahead || ledge_ahead),
        jump_released: held_long_enough,
        pause: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::GROUND_HEIGHT;
    use crate::sim::tick::tick;
    use glam::Vec2;

    #[test]
    fn test_walks_right_when_clear() {
        let mut state = GameState::new();
        state.player.pos.x = 20.0;
        let input = autopilot_input(&state);
        assert_eq!(input.move_x, MOVE_SPEED);
        assert!(!input.jump_pressed);
    }

    #[test]
    fn test_jumps_at_close_hostile() {
        let mut state = GameState::new();
        state.player.pos.x = 20.0;
        state.spawn_hostile(Vec2::new(20.0 + PLAYER_WIDTH + 50.0, GROUND_HEIGHT));
        assert!(autopilot_input(&state).jump_pressed);
    }

    #[test]
    fn test_releases_after_hold_window() {
        let mut state = GameState::new();
        state.player.pos.x = 20.0;
        state.spawn_hostile(Vec2::new(120.0, GROUND_HEIGHT));

        let first = autopilot_input(&state);
        tick(&mut state, &first);
        assert!(state.player.jump_held);

        let mut released = false;
        for _ in 0..JUMP_HOLD_TICKS + 2 {
            let input = autopilot_input(&state);
            released |= input.jump_released;
            tick(&mut state, &input);
        }
        assert!(released);
        assert!(!state.player.jump_held);
    }
}

//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Processing order:
//!   1. Hostiles walk left; off-screen ones are dropped
//!   2. Player integrates velocity, clamped to the world
//!   3. Camera follows
//!   4. Gravity, vertical clamp
//!   5. Ground / platform landing
//!   6. Pickups
//!   7. Hostile contact (fatal, ends the tick)
//!   8. Level progression

use super::collision::{Landing, resolve_landing};
use super::state::{Facing, GamePhase, GameState, Outcome};
use crate::consts::*;
use crate::settings::LevelAdvanceRule;

/// Input commands for a single tick (deterministic)
///
/// Built between ticks by the input layer; edges are one-shot.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Requested horizontal velocity (units per tick)
    pub move_x: f32,
    /// Jump button went down
    pub jump_pressed: bool,
    /// Jump button came up
    pub jump_released: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Notable things that happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickEvents {
    pub jumped: bool,
    pub landed: Option<Landing>,
    pub coins_collected: u32,
    /// Hostile the player ran into
    pub hit_hostile: Option<u32>,
    pub level_advanced: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickEvents {
    let mut events = TickEvents::default();

    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at tick {}", state.time_ticks);
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed at tick {}", state.time_ticks);
            }
            GamePhase::Terminal(_) => {}
        }
    }

    // Don't tick if paused or finished
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.time_ticks += 1;
    let now = state.time_ticks;

    apply_input(state, input, now, &mut events);
    advance_hostiles(state);
    integrate_player(state, now, &mut events);
    collect_pickups(state, &mut events);

    if let Some(id) = check_hostile_contact(state) {
        events.hit_hostile = Some(id);
        state.phase = GamePhase::Terminal(Outcome::GameOver);
        log::info!(
            "Game over: hit hostile {} on level {} with score {}",
            id,
            state.level_index() + 1,
            state.score
        );
        return events;
    }

    let score_before = state.score - u64::from(events.coins_collected) * POINTS_PER_COIN;
    events.level_advanced = check_level_progress(state, score_before);

    events
}

/// Jump edges and horizontal velocity
fn apply_input(state: &mut GameState, input: &TickInput, now: u64, events: &mut TickEvents) {
    let player = &mut state.player;

    if input.jump_pressed {
        events.jumped = player.start_jump(now);
    }
    if input.jump_released {
        player.release_jump(now);
    }

    player.vel.x = input.move_x.clamp(-MAX_MOVE_SPEED, MAX_MOVE_SPEED);
    if player.vel.x > 0.0 {
        player.facing = Facing::Right;
    } else if player.vel.x < 0.0 {
        player.facing = Facing::Left;
    }
}

/// Walk hostiles left at the level's speed and drop those past the left edge
fn advance_hostiles(state: &mut GameState) {
    let speed = state.level().hostile_speed;
    for hostile in state.hostiles.iter_mut().filter(|h| h.active) {
        hostile.pos.x -= speed;
        if hostile.pos.x <= -HOSTILE_WIDTH {
            hostile.active = false;
        }
    }
    state.hostiles.retain(|h| h.active);
}

/// Camera offset for a player x-position, kept inside the world
pub fn camera_offset(player_x: f32) -> f32 {
    (player_x - CAMERA_BUFFER).clamp(0.0, WORLD_WIDTH - VIEWPORT_WIDTH)
}

/// Move, clamp, follow with the camera, apply gravity and land
fn integrate_player(state: &mut GameState, now: u64, events: &mut TickEvents) {
    let platforms = state.platforms();
    let player = &mut state.player;

    let mut pos = player.pos + player.vel;
    pos.x = pos.x.clamp(0.0, WORLD_WIDTH - PLAYER_WIDTH);

    state.camera_x = camera_offset(pos.x);

    player.vel.y -= player.gravity(now);

    pos.y = pos.y.clamp(GROUND_HEIGHT, WORLD_HEIGHT - PLAYER_HEIGHT);
    player.pos = pos;

    if let Some(landing) = resolve_landing(pos, PLAYER_WIDTH, platforms) {
        player.land(landing.surface());
        events.landed = Some(landing);
    }
}

fn collect_pickups(state: &mut GameState, events: &mut TickEvents) {
    let bounds = state.player.bounds();
    for pickup in state.pickups.iter_mut().filter(|p| p.active) {
        if !bounds.overlaps(&pickup.bounds()) {
            continue;
        }
        if let Some(points) = pickup.collect() {
            state.score += points;
            events.coins_collected += 1;
            log::debug!("Collected pickup {} (+{}), score {}", pickup.id, points, state.score);
        }
    }
}

/// First active hostile touching the player, which is deactivated
fn check_hostile_contact(state: &mut GameState) -> Option<u32> {
    let bounds = state.player.bounds();
    let hostile = state
        .hostiles
        .iter_mut()
        .find(|h| h.active && bounds.overlaps(&h.bounds()))?;
    hostile.active = false;
    Some(hostile.id)
}

/// Advance to the next level (or finish) when the score target is reached.
///
/// At most one transition per tick: the next target becomes the first
/// multiple strictly above the current score, so a jump past two multiples
/// still counts once.
fn check_level_progress(state: &mut GameState, score_before: u64) -> bool {
    let reached = match state.advance_rule {
        LevelAdvanceRule::Crossed => state.score >= state.next_advance_score,
        LevelAdvanceRule::ExactMultiple => {
            state.score != score_before && state.score > 0 && state.score % LEVEL_ADVANCE_SCORE == 0
        }
    };
    if !reached {
        return false;
    }

    state.next_advance_score = (state.score / LEVEL_ADVANCE_SCORE + 1) * LEVEL_ADVANCE_SCORE;

    if state.has_next_level() {
        let next = state.level_index() + 1;
        log::info!("Level {} complete (score {}), loading level {}", next, state.score, next + 1);
        state.load_level(next);
    } else {
        state.phase = GamePhase::Terminal(Outcome::Victory);
        log::info!("All levels complete, final score {}", state.score);
    }
    true
}

//! Game state and core simulation types
//!
//! The whole simulation is one aggregate value owned by the loop and mutated
//! only by the tick (and the spawner between ticks).

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use super::collision::Aabb;
use super::level::{LEVELS, LevelDef, Platform};
use super::spawner::SpawnTimer;
use crate::consts::*;
use crate::settings::LevelAdvanceRule;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended; no further ticks are meaningful
    Terminal(Outcome),
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Terminal(_))
    }
}

/// How a run ended. Both are shown as the game-over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Touched a hostile
    GameOver,
    /// Completed the last level
    Victory,
}

/// Which way the avatar faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Vertical movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpState {
    #[default]
    Grounded,
    Ascending,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Bottom-left corner
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub facing: Facing,
    pub jump: JumpState,
    /// Jump button still down since the jump started
    pub jump_held: bool,
    pub jump_start_tick: u64,
}

impl Default for Player {
    fn default() -> Self {
        Self::spawn()
    }
}

impl Player {
    /// Fresh player at the level start position
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, GROUND_HEIGHT),
            vel: Vec2::ZERO,
            facing: Facing::Right,
            jump: JumpState::Grounded,
            jump_held: false,
            jump_start_tick: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    pub fn is_moving(&self) -> bool {
        self.vel.x != 0.0
    }

    pub fn is_grounded(&self) -> bool {
        self.jump == JumpState::Grounded
    }

    /// Launch a jump. Ignored unless grounded and the button was released
    /// since the previous jump. Returns whether the jump started.
    pub fn start_jump(&mut self, now: u64) -> bool {
        if self.jump != JumpState::Grounded || self.jump_held {
            return false;
        }
        self.vel.y = JUMP_FORCE;
        self.jump = JumpState::Ascending;
        self.jump_held = true;
        self.jump_start_tick = now;
        true
    }

    /// Jump button released. An early release inside the hold window applies
    /// the cancel impulse, floored at `MIN_JUMP_FORCE`.
    pub fn release_jump(&mut self, now: u64) {
        self.jump_held = false;
        if self.jump == JumpState::Ascending && now.saturating_sub(self.jump_start_tick) < JUMP_HOLD_TICKS {
            self.vel.y = (self.vel.y + JUMP_CANCEL_FORCE).max(MIN_JUMP_FORCE);
        }
    }

    /// Gravity to apply this tick. Holding jump inside the hold window
    /// keeps the lighter coefficient for a higher arc.
    pub fn gravity(&self, now: u64) -> f32 {
        let window_open = now.saturating_sub(self.jump_start_tick) <= JUMP_HOLD_TICKS;
        if self.jump_held && window_open {
            GRAVITY
        } else {
            GRAVITY * STRONG_GRAVITY_FACTOR
        }
    }

    /// Snap onto a surface
    pub fn land(&mut self, surface: f32) {
        self.pos.y = surface;
        self.vel.y = 0.0;
        self.jump = JumpState::Grounded;
    }
}

/// A hostile walker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub pos: Vec2,
    /// False marks it for removal
    pub active: bool,
}

impl Hostile {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(HOSTILE_WIDTH, HOSTILE_HEIGHT))
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Coin,
}

impl PickupKind {
    pub fn points(&self) -> u64 {
        match self {
            PickupKind::Coin => POINTS_PER_COIN,
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            PickupKind::Coin => Vec2::splat(COIN_SIZE),
        }
    }
}

/// A collectable item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    /// Flips to false once, on collection
    pub active: bool,
}

impl Pickup {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.kind.size())
    }

    /// Deactivate and return the points awarded; `None` if already taken
    pub fn collect(&mut self) -> Option<u64> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.kind.points())
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Index into the level table, always in range
    #[serde(deserialize_with = "level_index_in_range")]
    level_index: usize,
    /// Cumulative score (kept across levels)
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// Horizontal scroll offset
    pub camera_x: f32,
    /// Active hostiles (spawn order)
    pub hostiles: Vec<Hostile>,
    /// Current level's pickups (level order)
    pub pickups: Vec<Pickup>,
    /// Hostile spawn interval timer
    pub spawn_timer: SpawnTimer,
    /// How level completion is detected
    pub advance_rule: LevelAdvanceRule,
    /// Score at which the next level starts (crossed rule)
    pub next_advance_score: u64,
    /// Next entity ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a new run at the first level
    pub fn new() -> Self {
        Self::with_rule(LevelAdvanceRule::default())
    }

    /// Create a new run using the given level-completion rule
    pub fn with_rule(advance_rule: LevelAdvanceRule) -> Self {
        let mut state = Self {
            level_index: 0,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            player: Player::spawn(),
            camera_x: 0.0,
            hostiles: Vec::new(),
            pickups: Vec::new(),
            spawn_timer: SpawnTimer::default(),
            advance_rule,
            next_advance_score: LEVEL_ADVANCE_SCORE,
            next_id: 1,
        };
        state.load_level(0);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Static definition of the current level
    pub fn level(&self) -> &'static LevelDef {
        &LEVELS[self.level_index]
    }

    pub fn platforms(&self) -> &'static [Platform] {
        self.level().platforms
    }

    pub fn has_next_level(&self) -> bool {
        self.level_index + 1 < LEVELS.len()
    }

    /// Enter a level: resets all per-level state, keeps the score.
    /// An index past the level table is ignored.
    pub fn load_level(&mut self, index: usize) {
        if index >= LEVELS.len() {
            log::warn!("No level {}; staying on level {}", index + 1, self.level_index + 1);
            return;
        }
        self.level_index = index;
        self.player = Player::spawn();
        self.camera_x = 0.0;
        self.hostiles.clear();
        self.spawn_timer.reset();

        let coins = self.level().coins;
        self.pickups.clear();
        for coin in coins {
            let id = self.next_entity_id();
            self.pickups.push(Pickup {
                id,
                kind: PickupKind::Coin,
                pos: coin.pos(),
                active: true,
            });
        }
    }

    /// Start over from the first level with a zero score
    pub fn restart(&mut self) {
        log::info!("Restarting run (previous score {})", self.score);
        *self = Self::with_rule(self.advance_rule);
    }

    /// Add a hostile at the given position
    pub fn spawn_hostile(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.hostiles.push(Hostile { id, pos, active: true });
        id
    }

    /// Pickups still waiting to be collected
    pub fn remaining_pickups(&self) -> usize {
        self.pickups.iter().filter(|p| p.active).count()
    }
}

fn level_index_in_range<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let index = usize::deserialize(deserializer)?;
    if index < LEVELS.len() {
        Ok(index)
    } else {
        Err(serde::de::Error::custom(format!("level index {} out of range (0..{})", index, LEVELS.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_loads_first_level() {
        let state = GameState::new();
        assert_eq!(state.level_index(), 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.pickups.len(), LEVELS[0].coins.len());
        assert!(state.pickups.iter().all(|p| p.active));
        assert_eq!(state.player.pos, Vec2::new(100.0, GROUND_HEIGHT));
    }

    #[test]
    fn test_jump_from_ground() {
        let mut player = Player::spawn();
        assert!(player.start_jump(10));
        assert_eq!(player.vel.y, JUMP_FORCE);
        assert_eq!(player.jump, JumpState::Ascending);
        assert!(player.jump_held);
        assert_eq!(player.jump_start_tick, 10);
    }

    #[test]
    fn test_no_double_jump() {
        let mut player = Player::spawn();
        assert!(player.start_jump(0));
        player.vel.y = 5.0;
        assert!(!player.start_jump(3));
        assert_eq!(player.vel.y, 5.0);
    }

    #[test]
    fn test_held_button_blocks_rejump_after_landing() {
        let mut player = Player::spawn();
        player.start_jump(0);
        player.land(GROUND_HEIGHT);
        assert!(!player.start_jump(30));
        player.release_jump(31);
        assert!(player.start_jump(32));
    }

    #[test]
    fn test_early_release_floors_velocity() {
        let mut player = Player::spawn();
        player.start_jump(0);
        player.vel.y = 12.0;
        player.release_jump(5);
        assert_eq!(player.vel.y, MIN_JUMP_FORCE);
        assert!(!player.jump_held);
    }

    #[test]
    fn test_late_release_keeps_velocity() {
        let mut player = Player::spawn();
        player.start_jump(0);
        player.vel.y = 2.0;
        player.release_jump(JUMP_HOLD_TICKS + 1);
        assert_eq!(player.vel.y, 2.0);
    }

    #[test]
    fn test_gravity_window() {
        let mut player = Player::spawn();
        assert_eq!(player.gravity(100), GRAVITY * STRONG_GRAVITY_FACTOR);
        player.start_jump(100);
        assert_eq!(player.gravity(100 + JUMP_HOLD_TICKS), GRAVITY);
        assert_eq!(player.gravity(101 + JUMP_HOLD_TICKS), GRAVITY * STRONG_GRAVITY_FACTOR);
        player.release_jump(105);
        assert_eq!(player.gravity(106), GRAVITY * STRONG_GRAVITY_FACTOR);
    }

    #[test]
    fn test_pickup_collects_once() {
        let mut pickup = Pickup {
            id: 1,
            kind: PickupKind::Coin,
            pos: Vec2::ZERO,
            active: true,
        };
        assert_eq!(pickup.collect(), Some(POINTS_PER_COIN));
        assert_eq!(pickup.collect(), None);
        assert!(!pickup.active);
    }

    #[test]
    fn test_load_level_keeps_score() {
        let mut state = GameState::new();
        state.score = 500;
        state.spawn_hostile(Vec2::new(300.0, GROUND_HEIGHT));
        state.camera_x = 120.0;
        state.player.pos = Vec2::new(700.0, 300.0);

        state.load_level(1);
        assert_eq!(state.score, 500);
        assert!(state.hostiles.is_empty());
        assert_eq!(state.camera_x, 0.0);
        assert_eq!(state.player.pos, Vec2::new(100.0, GROUND_HEIGHT));
        assert_eq!(state.pickups.len(), LEVELS[1].coins.len());
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::with_rule(LevelAdvanceRule::ExactMultiple);
        state.load_level(2);
        state.score = 1300;
        state.phase = GamePhase::Terminal(Outcome::GameOver);

        state.restart();
        assert_eq!(state.level_index(), 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.advance_rule, LevelAdvanceRule::ExactMultiple);
    }

    #[test]
    fn test_load_level_past_table_is_ignored() {
        let mut state = GameState::new();
        state.load_level(1);
        state.score = 700;
        state.load_level(LEVELS.len());
        assert_eq!(state.level_index(), 1);
        assert_eq!(state.score, 700);
        assert_eq!(state.level().spawn_interval_ticks, LEVELS[1].spawn_interval_ticks);
    }

    #[test]
    fn test_deserialize_rejects_unknown_level() {
        let mut state = GameState::new();
        state.load_level(2);
        let json = serde_json::to_string(&state).expect("serializes");
        let restored: GameState = serde_json::from_str(&json).expect("valid state");
        assert_eq!(restored.level_index(), 2);

        let mut value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        value["level_index"] = serde_json::json!(LEVELS.len() + 4);
        assert!(serde_json::from_value::<GameState>(value).is_err());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new();
        let a = state.spawn_hostile(Vec2::ZERO);
        let b = state.spawn_hostile(Vec2::ZERO);
        assert_ne!(a, b);
        assert!(state.pickups.iter().all(|p| p.id != a && p.id != b));
    }
}

//! Compiled-in level table
//!
//! Levels are static data: loading one copies its pickups into the live
//! state, while platforms are borrowed straight from the table.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{COIN_SIZE, GROUND_HEIGHT, PLATFORM_HEIGHT};
use crate::ms_to_ticks;

/// A static platform. Height is always `PLATFORM_HEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32) -> Self {
        Self { x, y, width }
    }

    /// Surface a landing player snaps to
    #[inline]
    pub fn top(&self) -> f32 {
        self.y + PLATFORM_HEIGHT
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Where a coin sits when its level loads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinSpawn {
    pub x: f32,
    pub y: f32,
}

impl CoinSpawn {
    const fn at(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Coin resting just above the ground strip
    const fn on_ground(x: f32) -> Self {
        Self {
            x,
            y: GROUND_HEIGHT + 50.0,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size() -> Vec2 {
        Vec2::splat(COIN_SIZE)
    }
}

/// One level's layout and difficulty
#[derive(Debug)]
pub struct LevelDef {
    pub platforms: &'static [Platform],
    pub coins: &'static [CoinSpawn],
    /// Ticks between hostile spawns
    pub spawn_interval_ticks: u32,
    /// Hostile leftward speed (units per tick)
    pub hostile_speed: f32,
    /// Presentation colors (0xRRGGBB)
    pub background_color: u32,
    pub ground_color: u32,
}

/// All levels, in play order
pub static LEVELS: [LevelDef; 3] = [
    // Basic introduction
    LevelDef {
        platforms: &[
            Platform::new(200.0, 200.0, 100.0),
            Platform::new(400.0, 300.0, 100.0),
            Platform::new(600.0, 250.0, 100.0),
            Platform::new(900.0, 200.0, 150.0),
        ],
        coins: &[
            CoinSpawn::at(200.0, 250.0),
            CoinSpawn::at(400.0, 350.0),
            CoinSpawn::at(600.0, 300.0),
            CoinSpawn::at(900.0, 250.0),
            CoinSpawn::on_ground(300.0),
            CoinSpawn::on_ground(700.0),
        ],
        spawn_interval_ticks: ms_to_ticks(4000),
        hostile_speed: 2.0,
        background_color: 0x5c94fc,
        ground_color: 0xc84c0c,
    },
    // Narrower platforms, higher climbs
    LevelDef {
        platforms: &[
            Platform::new(200.0, 250.0, 80.0),
            Platform::new(400.0, 350.0, 80.0),
            Platform::new(600.0, 450.0, 80.0),
            Platform::new(800.0, 350.0, 80.0),
            Platform::new(1000.0, 250.0, 80.0),
            Platform::new(1200.0, 400.0, 100.0),
        ],
        coins: &[
            CoinSpawn::at(200.0, 300.0),
            CoinSpawn::at(400.0, 400.0),
            CoinSpawn::at(600.0, 500.0),
            CoinSpawn::at(800.0, 400.0),
            CoinSpawn::at(1000.0, 300.0),
            CoinSpawn::at(1200.0, 450.0),
            CoinSpawn::on_ground(300.0),
            CoinSpawn::on_ground(900.0),
        ],
        spawn_interval_ticks: ms_to_ticks(3000),
        hostile_speed: 3.0,
        background_color: 0x4169e1,
        ground_color: 0x8b4513,
    },
    // Expert
    LevelDef {
        platforms: &[
            Platform::new(200.0, 200.0, 60.0),
            Platform::new(400.0, 300.0, 60.0),
            Platform::new(600.0, 400.0, 60.0),
            Platform::new(800.0, 500.0, 60.0),
            Platform::new(1000.0, 400.0, 60.0),
            Platform::new(1200.0, 300.0, 60.0),
            Platform::new(1400.0, 200.0, 60.0),
            Platform::new(1600.0, 350.0, 100.0),
        ],
        coins: &[
            CoinSpawn::at(200.0, 250.0),
            CoinSpawn::at(400.0, 350.0),
            CoinSpawn::at(600.0, 450.0),
            CoinSpawn::at(800.0, 550.0),
            CoinSpawn::at(1000.0, 450.0),
            CoinSpawn::at(1200.0, 350.0),
            CoinSpawn::at(1400.0, 250.0),
            CoinSpawn::at(1600.0, 400.0),
            CoinSpawn::on_ground(300.0),
            CoinSpawn::on_ground(700.0),
            CoinSpawn::on_ground(1100.0),
            CoinSpawn::on_ground(1500.0),
        ],
        spawn_interval_ticks: ms_to_ticks(2000),
        hostile_speed: 4.0,
        background_color: 0x483d8b,
        ground_color: 0x8b0000,
    },
];

/// Look up a level by index
pub fn level(index: usize) -> Option<&'static LevelDef> {
    LEVELS.get(index)
}

/// Number of levels in the table
pub fn level_count() -> usize {
    LEVELS.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{LEVEL_ADVANCE_SCORE, POINTS_PER_COIN};

    #[test]
    fn test_spawn_intervals_in_ticks() {
        assert_eq!(LEVELS[0].spawn_interval_ticks, 240);
        assert_eq!(LEVELS[1].spawn_interval_ticks, 180);
        assert_eq!(LEVELS[2].spawn_interval_ticks, 120);
    }

    #[test]
    fn test_every_level_can_be_completed() {
        // Each level must hold enough coins to reach the next score multiple
        for def in &LEVELS {
            let available = def.coins.len() as u64 * POINTS_PER_COIN;
            assert!(available >= LEVEL_ADVANCE_SCORE);
        }
    }

    #[test]
    fn test_platform_top() {
        let p = Platform::new(200.0, 200.0, 100.0);
        assert_eq!(p.top(), 240.0);
        assert_eq!(p.right(), 300.0);
    }

    #[test]
    fn test_level_lookup() {
        assert!(level(0).is_some());
        assert!(level(level_count()).is_none());
    }
}

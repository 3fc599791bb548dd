//! Collision detection against static geometry and other actors
//!
//! Everything here is axis-aligned: actors are boxes anchored at their
//! bottom-left corner, platforms are one-way ledges the player snaps onto.

use glam::Vec2;

use super::level::Platform;
use crate::consts::{GROUND_HEIGHT, PLATFORM_HEIGHT, PLATFORM_SNAP_MARGIN};

/// Axis-aligned bounding box (bottom-left origin, y up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }
}

/// What the player came to rest on this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Landing {
    /// Ground strip
    Ground,
    /// Platform at the given index of the level's platform list
    Platform { index: usize, top: f32 },
}

impl Landing {
    /// Height the player is snapped to
    pub fn surface(&self) -> f32 {
        match *self {
            Landing::Ground => GROUND_HEIGHT,
            Landing::Platform { top, .. } => top,
        }
    }
}

/// Does the player's box sit in a platform's landing band?
///
/// The band runs from just below the platform base up to its top surface,
/// so a player crossing the top from above is caught the same tick.
pub fn player_in_platform_band(pos: Vec2, player_width: f32, platform: &Platform) -> bool {
    let horizontal = pos.x + player_width > platform.x && pos.x < platform.right();
    let vertical = pos.y <= platform.y + PLATFORM_HEIGHT && pos.y > platform.y - PLATFORM_SNAP_MARGIN;
    horizontal && vertical
}

/// Resolve what (if anything) the player lands on at `pos`.
///
/// Ground wins outright; otherwise the first platform in level order whose
/// landing band contains the player.
pub fn resolve_landing(pos: Vec2, player_width: f32, platforms: &[Platform]) -> Option<Landing> {
    if pos.y <= GROUND_HEIGHT {
        return Some(Landing::Ground);
    }

    platforms
        .iter()
        .position(|p| player_in_platform_band(pos, player_width, p))
        .map(|index| Landing::Platform {
            index,
            top: platforms[index].top(),
        })
}

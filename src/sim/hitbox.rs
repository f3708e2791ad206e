//! Hitbox geometry
//!
//! Sprites are much larger than what should register a hit, so combat uses
//! tight boxes offset inside the visual bounds. Despite the 2D placement on
//! height planes, range checks are 1D: only the horizontal distance between
//! hitbox centers matters.

use glam::Vec2;

use crate::consts::*;

/// Fixed descriptor placing a combat box inside a sprite
#[derive(Debug, Clone, Copy)]
pub struct HitboxSpec {
    pub width: f32,
    pub height: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

/// Player sprite is 180x120; center a 30x30 box inside it
pub const PLAYER_HITBOX: HitboxSpec = HitboxSpec {
    width: 30.0,
    height: 30.0,
    offset_x: 75.0,
    offset_y: 45.0,
};

/// Skeleton sprite is ~150x150; a 25x25 box centered and lowered toward the feet
pub const SKELETON_HITBOX: HitboxSpec = HitboxSpec {
    width: 25.0,
    height: 25.0,
    offset_x: 62.5,
    offset_y: 87.5,
};

/// An axis-aligned box in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub max: Vec2,
}

impl HitboxSpec {
    /// Place the box relative to a sprite anchor (top-left corner)
    pub fn at(&self, anchor: Vec2) -> Hitbox {
        let min = anchor + Vec2::new(self.offset_x, self.offset_y);
        Hitbox {
            min,
            max: min + Vec2::new(self.width, self.height),
        }
    }
}

impl Hitbox {
    /// Box from a top-left corner and a square side (power-ups)
    pub fn square(top_left: Vec2, size: f32) -> Self {
        Self {
            min: top_left,
            max: top_left + Vec2::splat(size),
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Standard AABB overlap test (touching edges do not count)
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Horizontal distance between two hitbox centers - the combat range metric
#[inline]
pub fn center_distance(a: &Hitbox, b: &Hitbox) -> f32 {
    (a.center().x - b.center().x).abs()
}

/// Player hitbox for a character standing at `x` on the ground line
pub fn player_hitbox(x: f32) -> Hitbox {
    PLAYER_HITBOX.at(Vec2::new(x, PLAYER_BASELINE_Y))
}

/// Skeleton hitbox at its current position (y diverges from the plane mid-arc)
pub fn skeleton_hitbox(x: f32, y: f32) -> Hitbox {
    SKELETON_HITBOX.at(Vec2::new(x, y))
}

//! Bonewalk - a side-view wave-survival brawler
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, enemy AI, combat, waves)
//! - `highscores`: Persisted high score
//! - `persistence`: File-backed storage with soft failure
//! - `audio`: Sound cue sink

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod sim;

pub use highscores::HighScore;

/// Game configuration constants
pub mod consts {
    /// Fixed combat resolution timestep (10ms for responsive hit detection)
    pub const COMBAT_TICK_DT: f32 = 0.010;
    /// Maximum combat substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 300.0;

    /// Visual sprite sizes (hitboxes are tighter, see `sim::hitbox`)
    pub const PLAYER_SPRITE_WIDTH: f32 = 180.0;
    pub const PLAYER_SPRITE_HEIGHT: f32 = 120.0;
    pub const SKELETON_SPRITE_WIDTH: f32 = 150.0;

    /// Player spawn position and ground line
    pub const PLAYER_START_X: f32 = 20.0;
    pub const PLAYER_BASELINE_Y: f32 = ARENA_HEIGHT - PLAYER_SPRITE_HEIGHT;

    /// Player movement and action timings
    pub const PLAYER_MOVE_SPEED: f32 = 400.0; // px per second
    pub const PLAYER_START_HP: u32 = 10;
    pub const PLAYER_ATTACK_POWER: u32 = 1;
    pub const JUMP_DURATION: f32 = 0.5;
    pub const JUMP_DEBOUNCE: f32 = 0.2;
    pub const ROLL_DURATION: f32 = 0.5;
    pub const ROLL_SPEED: f32 = 400.0; // px per second during roll
    pub const ATTACK_DURATION: f32 = 0.4;
    pub const HIT_FLASH_DURATION: f32 = 0.3;
    /// Invincibility after an unshielded hit
    pub const HIT_INVINCIBILITY: f32 = 1.5;
    /// Shorter invincibility after a shield block
    pub const SHIELD_INVINCIBILITY: f32 = 1.0;

    /// Combat ranges (1D distance between hitbox centers)
    pub const SKELETON_ATTACK_RANGE: f32 = 25.0;
    pub const PLAYER_ATTACK_RANGE: f32 = 50.0;

    /// Skeleton stats - speed ramps with score so all enemies speed up together
    pub const SKELETON_HP: u32 = 3;
    pub const SKELETON_ATTACK_POWER: u32 = 1;
    pub const SKELETON_BASE_SPEED: f32 = 80.0;
    pub const SKELETON_SPEED_PER_SCORE: f32 = 1.0;
    pub const SKELETON_SPEED_CAP: f32 = 160.0;

    /// Skeleton attack animation: 600ms total, damage only inside the strike window
    pub const SKELETON_ATTACK_DURATION: f32 = 0.6;
    pub const STRIKE_WINDOW_START: f32 = 0.18;
    pub const STRIKE_WINDOW_END: f32 = 0.36;
    pub const SKELETON_ATTACK_COOLDOWN: f32 = 0.5;

    /// Skeleton dodge behavior
    pub const DODGE_CHANCE_PER_SEC: f32 = 0.35;
    pub const DODGE_COOLDOWN: f32 = 2.0;
    pub const DODGE_DISTANCE: f32 = 60.0;
    pub const DODGE_DURATION: f32 = 0.6;
    pub const DODGE_ARC_HEIGHT: f32 = 80.0;

    /// Leap-over behavior for every 3rd skeleton
    pub const LEAP_TRIGGER_DISTANCE: f32 = 110.0;
    pub const LEAP_DURATION: f32 = 0.7;
    pub const LEAP_ARC_HEIGHT: f32 = 120.0;
    /// Landing point distance beyond the player's hitbox center
    pub const LEAP_LANDING_OFFSET: f32 = 30.0;
    /// Grace delay between landing and the follow-up attack
    pub const LEAP_ATTACK_DELAY: f32 = 0.08;

    /// Skeletons scrolling past this x count as a scored pass and respawn
    pub const WRAP_X: f32 = -200.0;
    /// Fresh spawns land this far beyond the right edge
    pub const SPAWN_OFFSET_MIN: f32 = 150.0;
    pub const SPAWN_OFFSET_MAX: f32 = 550.0;
    /// Wrapped skeletons respawn closer in
    pub const RESPAWN_OFFSET_MIN: f32 = 100.0;
    pub const RESPAWN_OFFSET_MAX: f32 = 300.0;
    /// The three height planes skeletons are assigned to
    pub const HEIGHT_PLANES: [f32; 3] = [155.0, 160.0, 165.0];
    /// Dead skeletons linger this long for the death animation
    pub const DEATH_LINGER: f32 = 1.5;

    /// Power-up tuning
    pub const POWER_UP_CHANCE: f32 = 0.35;
    /// Probability the spawn roll picks Life; otherwise Shield
    pub const POWER_UP_LIFE_WEIGHT: f32 = 0.6;
    pub const POWER_UP_SIZE: f32 = 24.0;
    pub const POWER_UP_LIFETIME: f32 = 5.0;

    /// Parallax scroll factors (smaller = farther away)
    pub const PARALLAX_FACTOR_BACK: f32 = 0.03;
    pub const PARALLAX_FACTOR_FAR: f32 = 0.06;
    /// Background tile width for wrapping the accumulators
    pub const PARALLAX_TILE_WIDTH: f32 = 180.0;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame advance driven only by the caller's `dt`
//! - Fixed timestep for combat resolution
//! - Seeded RNG only
//! - Stable iteration order (roster in spawn order)
//! - No rendering or platform dependencies

pub mod combat;
pub mod hitbox;
pub mod player;
pub mod skeleton;
pub mod state;
pub mod tick;

pub use combat::combat_tick;
pub use hitbox::{Hitbox, HitboxSpec, PLAYER_HITBOX, SKELETON_HITBOX, center_distance};
pub use state::{
    Facing, GamePhase, GameState, Life, Motion, Parallax, Player, PlayerAction, PowerUp,
    PowerUpKind, Skeleton, SoundCue,
};
pub use tick::{TickInput, frame};

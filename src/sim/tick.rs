//! Continuous-time frame advance
//!
//! `frame` is the render-cadence half of the loop: player movement, enemy AI,
//! power-up lifetimes and roster compaction. Combat resolution runs on its
//! own fixed tick in `combat`. Pausing gates both; because elapsed time comes
//! from the caller per frame, resuming never fast-forwards across the pause.

use super::state::{GamePhase, GameState, Life};
use super::{player, skeleton};
use crate::consts::*;

/// Input commands for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub left: bool,
    pub right: bool,
    /// Edge-triggered actions
    pub jump: bool,
    pub roll: bool,
    pub attack: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart the run (works from game over)
    pub restart: bool,
    /// Toggle the debug hitbox overlay
    pub debug: bool,
    /// Demo mode - the sim plays itself
    pub demo: bool,
}

/// Advance the game by one frame of elapsed time
pub fn frame(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.restart {
        log::info!("restarting run (high score {})", state.high_score);
        state.reset_run();
        return;
    }
    if input.debug {
        state.debug_hitboxes = !state.debug_hitboxes;
    }

    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Running,
            GamePhase::GameOver => {}
        }
    }

    if state.phase != GamePhase::Running {
        return;
    }

    // Demo mode - chase the nearest skeleton and swing when close
    let input = if input.demo {
        demo_input(state, input)
    } else {
        input.clone()
    };

    player::update(&mut state.player, &mut state.scroll, &input, dt);
    skeleton::update_all(state, dt);

    // Uncollected power-ups fade out
    for p in state.power_ups.iter_mut() {
        p.ttl_secs -= dt;
    }
    state.power_ups.retain(|p| p.ttl_secs > 0.0);

    compact_roster(state, dt);
}

/// Age lingering corpses and remove them after the death animation. Runs as
/// a separate pass so nothing mutates the roster while AI or combat iterate
/// it. When a removal leaves no living skeleton, the wave escalates.
fn compact_roster(state: &mut GameState, dt: f32) {
    for s in state.skeletons.iter_mut() {
        if let Life::Dying { age } = &mut s.life {
            *age += dt;
        }
    }

    let before = state.skeletons.len();
    state.skeletons.retain(|s| match s.life {
        Life::Dying { age } => age < DEATH_LINGER,
        Life::Alive => true,
    });
    let removed = state.skeletons.len() < before;

    if removed && state.alive_skeletons().next().is_none() {
        state.wave_size += 1;
        let count = state.wave_size;
        log::info!("wave cleared, next wave size {}", count);
        state.spawn_wave(count);
    }
}

/// Simple self-play: walk toward the nearest living skeleton and attack once
/// inside swing range
fn demo_input(state: &GameState, base: &TickInput) -> TickInput {
    let mut input = base.clone();
    let player_cx = state.player.hitbox().center().x;

    let target = state.alive_skeletons().min_by(|a, b| {
        let da = (a.hitbox().center().x - player_cx).abs();
        let db = (b.hitbox().center().x - player_cx).abs();
        da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(target) = target {
        let dx = target.hitbox().center().x - player_cx;
        if dx.abs() > PLAYER_ATTACK_RANGE * 0.8 {
            input.left = dx < 0.0;
            input.right = dx > 0.0;
        } else {
            input.attack = true;
        }
    }
    input
}

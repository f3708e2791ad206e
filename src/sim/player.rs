//! Player state machine
//!
//! Guarded edge-triggered actions (jump/roll/attack reject silently when an
//! exclusive action already holds), continuous movement integration clamped
//! to the arena, and countdown timers advanced every frame.

use super::state::{Facing, Parallax, Player, PlayerAction};
use super::tick::TickInput;
use crate::consts::*;

/// Advance the player by one frame of elapsed time
pub fn update(player: &mut Player, scroll: &mut Parallax, input: &TickInput, dt: f32) {
    if !player.is_alive() {
        return;
    }

    // Facing flips on movement input independent of motion state
    if input.left {
        player.facing = Facing::Left;
    }
    if input.right {
        player.facing = Facing::Right;
    }

    // Countdown timers
    player.invincible_secs = (player.invincible_secs - dt).max(0.0);
    player.hit_flash_secs = (player.hit_flash_secs - dt).max(0.0);
    player.jump_gap_secs = (player.jump_gap_secs - dt).max(0.0);

    // Edge-triggered action requests
    if input.jump {
        try_jump(player);
    }
    if input.roll {
        try_roll(player);
    }
    if input.attack {
        try_attack(player);
    }

    integrate_movement(player, scroll, input, dt);

    // Age the exclusive action and fall back to Idle when it completes
    player.action = match player.action {
        PlayerAction::Rolling { age, facing } => {
            let age = age + dt;
            if age >= ROLL_DURATION {
                PlayerAction::Idle
            } else {
                PlayerAction::Rolling { age, facing }
            }
        }
        PlayerAction::Attacking { age } => {
            let age = age + dt;
            if age >= ATTACK_DURATION {
                PlayerAction::Idle
            } else {
                PlayerAction::Attacking { age }
            }
        }
        PlayerAction::Jumping { age } => {
            let age = age + dt;
            if age >= JUMP_DURATION {
                PlayerAction::Idle
            } else {
                PlayerAction::Jumping { age }
            }
        }
        other => other,
    };

    // Idle/Running are derived from movement input when nothing exclusive holds
    if !player.exclusive_action() {
        player.action = if input.left || input.right {
            PlayerAction::Running
        } else {
            PlayerAction::Idle
        };
    }
}

/// Jump: debounced, blocked by any exclusive action, never blocks movement
fn try_jump(player: &mut Player) {
    if player.exclusive_action() || player.jump_gap_secs > 0.0 {
        return;
    }
    player.jump_gap_secs = JUMP_DEBOUNCE;
    player.action = PlayerAction::Jumping { age: 0.0 };
}

/// Roll: scripted velocity in the current facing direction
fn try_roll(player: &mut Player) {
    if player.exclusive_action() {
        return;
    }
    player.action = PlayerAction::Rolling {
        age: 0.0,
        facing: player.facing,
    };
}

/// Attack: opens a fresh swing so each skeleton can be struck at most once
fn try_attack(player: &mut Player) {
    if player.exclusive_action() {
        return;
    }
    player.swing_hits.clear();
    player.action = PlayerAction::Attacking { age: 0.0 };
}

/// Move the player and feed the parallax layers. The scroll advances by the
/// intended motion even when the arena boundary clamps the character, which
/// keeps the background drifting while running against the edge.
fn integrate_movement(player: &mut Player, scroll: &mut Parallax, input: &TickInput, dt: f32) {
    let step = match player.action {
        // Roll overrides normal movement with its own velocity
        PlayerAction::Rolling { facing, .. } => facing.sign() * ROLL_SPEED * dt,
        // Attacking suppresses movement input; jumping does not
        PlayerAction::Attacking { .. } | PlayerAction::Dead => 0.0,
        _ => {
            let mut vx = 0.0;
            if input.left {
                vx -= PLAYER_MOVE_SPEED;
            }
            if input.right {
                vx += PLAYER_MOVE_SPEED;
            }
            vx * dt
        }
    };

    if step != 0.0 {
        player.x = (player.x + step).clamp(0.0, ARENA_WIDTH - PLAYER_SPRITE_WIDTH);
        scroll.advance(step);
    }
}

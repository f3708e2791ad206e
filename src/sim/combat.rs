//! Collision and combat resolution
//!
//! Runs on its own fixed 10ms tick, independent of the render-rate frame
//! loop. Ordering inside a tick matters: the per-tick hit gate is set before
//! later skeletons are evaluated, so at most one damage event reaches the
//! player per tick no matter how many strike windows are open.

use super::hitbox::center_distance;
use super::state::{GamePhase, GameState, PlayerAction, PowerUpKind, SoundCue};
use crate::consts::*;

/// One fixed combat tick. No-op unless the session is running.
pub fn combat_tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    resolve_enemy_strikes(state);
    resolve_player_swing(state);
    collect_power_ups(state);
}

/// Skeleton strikes landing on the player
fn resolve_enemy_strikes(state: &mut GameState) {
    let player_hb = state.player.hitbox();
    let mut hit_this_tick = false;

    for i in 0..state.skeletons.len() {
        let striking = {
            let s = &state.skeletons[i];
            s.is_alive()
                && s.attack_active()
                && center_distance(&s.hitbox(), &player_hb) <= SKELETON_ATTACK_RANGE
        };
        if !striking {
            continue;
        }

        let player = &state.player;
        if hit_this_tick
            || !player.is_alive()
            || player.is_invincible()
            || player.is_rolling()
            || player.is_jumping()
        {
            continue;
        }
        // Gate set before the remaining skeletons are evaluated
        hit_this_tick = true;

        if state.player.shields > 0 {
            state.player.shields -= 1;
            state.player.invincible_secs = SHIELD_INVINCIBILITY;
            state.cues.push(SoundCue::ShieldBlock);
        } else {
            state.player.hp = state.player.hp.saturating_sub(SKELETON_ATTACK_POWER);
            state.player.hit_flash_secs = HIT_FLASH_DURATION;
            state.player.invincible_secs = HIT_INVINCIBILITY;
            state.cues.push(SoundCue::Hit);
            if state.player.hp == 0 {
                game_over(state);
            }
        }
    }
}

/// Player attack swing connecting with skeletons
fn resolve_player_swing(state: &mut GameState) {
    if !state.player.is_attacking() {
        return;
    }
    let player_hb = state.player.hitbox();
    let player_cx = player_hb.center().x;
    let mut kills = 0u32;

    for i in 0..state.skeletons.len() {
        let (id, in_range, cx) = {
            let s = &state.skeletons[i];
            (
                s.id,
                s.is_alive()
                    && center_distance(&s.hitbox(), &player_hb) <= PLAYER_ATTACK_RANGE,
                s.hitbox().center().x,
            )
        };
        if !in_range || state.player.swing_hits.contains(&id) {
            continue;
        }
        // Each skeleton takes at most one hit per swing
        state.player.swing_hits.push(id);

        let skeleton = &mut state.skeletons[i];
        skeleton.hp = skeleton.hp.saturating_sub(PLAYER_ATTACK_POWER);
        if skeleton.hp == 0 {
            log::debug!("skeleton {} killed", skeleton.id);
            skeleton.kill();
            kills += 1;
        } else if skeleton.hp == 1 && !skeleton.low_hp_dodged {
            // Forced one-shot dodge on first reaching 1 HP. Orthogonal to the
            // dodge cooldown: neither checked nor reset here.
            skeleton.low_hp_dodged = true;
            let away = if cx > player_cx { 1.0 } else { -1.0 };
            skeleton.begin_dodge(away);
        }
    }

    // Scoring and power-up rolls deferred past the roster borrow
    for _ in 0..kills {
        state.add_score();
        state.try_spawn_power_up();
    }
}

/// Power-up pickup by box overlap
fn collect_power_ups(state: &mut GameState) {
    let player_hb = state.player.hitbox();
    let mut collected: Vec<PowerUpKind> = Vec::new();
    state.power_ups.retain(|p| {
        if p.hitbox().overlaps(&player_hb) {
            collected.push(p.kind);
            false
        } else {
            true
        }
    });
    for kind in collected {
        match kind {
            PowerUpKind::Life => state.player.hp += 1,
            PowerUpKind::Shield => state.player.shields += 1,
        }
        state.cues.push(SoundCue::PowerUp);
    }
}

fn game_over(state: &mut GameState) {
    log::info!(
        "game over at score {} (high score {})",
        state.score,
        state.high_score
    );
    state.phase = GamePhase::GameOver;
    state.player.action = PlayerAction::Dead;
    state.cues.push(SoundCue::GameOver);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Life, PowerUp, Skeleton};
    use glam::Vec2;

    /// Skeleton parked 10px from the player with its strike window open
    fn striking_skeleton(id: u32) -> Skeleton {
        let mut s = Skeleton::new(id, 45.0, 160.0, SKELETON_BASE_SPEED);
        s.attack_age = Some(0.2);
        s
    }

    fn running_state() -> GameState {
        let mut state = GameState::new(99, 0);
        state.skeletons.clear();
        state
    }

    #[test]
    fn test_single_damage_event_per_tick() {
        // Two skeletons strike simultaneously; only one hit may land
        let mut state = running_state();
        state.skeletons.push(striking_skeleton(1));
        state.skeletons.push(striking_skeleton(2));

        combat_tick(&mut state);

        assert_eq!(state.player.hp, 9);
        assert_eq!(state.player.invincible_secs, HIT_INVINCIBILITY);
        assert!(state.cues.contains(&SoundCue::Hit));
    }

    #[test]
    fn test_invincibility_blocks_followup_hits() {
        let mut state = running_state();
        state.skeletons.push(striking_skeleton(1));

        combat_tick(&mut state);
        assert_eq!(state.player.hp, 9);

        // Window still open on the next tick, but the player is invincible
        combat_tick(&mut state);
        assert_eq!(state.player.hp, 9);
    }

    #[test]
    fn test_shield_absorbs_the_hit() {
        let mut state = running_state();
        state.player.shields = 2;
        state.skeletons.push(striking_skeleton(1));

        combat_tick(&mut state);

        assert_eq!(state.player.hp, 10);
        assert_eq!(state.player.shields, 1);
        assert_eq!(state.player.invincible_secs, SHIELD_INVINCIBILITY);
        assert!(state.cues.contains(&SoundCue::ShieldBlock));
        assert!(!state.cues.contains(&SoundCue::Hit));
    }

    #[test]
    fn test_rolling_and_jumping_avoid_damage() {
        let mut state = running_state();
        state.skeletons.push(striking_skeleton(1));
        state.player.action = PlayerAction::Rolling {
            age: 0.1,
            facing: crate::sim::state::Facing::Right,
        };
        combat_tick(&mut state);
        assert_eq!(state.player.hp, 10);

        state.player.action = PlayerAction::Jumping { age: 0.1 };
        combat_tick(&mut state);
        assert_eq!(state.player.hp, 10);
    }

    #[test]
    fn test_closed_window_deals_no_damage() {
        let mut state = running_state();
        let mut s = striking_skeleton(1);
        s.attack_age = Some(0.05); // before the strike frame
        state.skeletons.push(s);
        combat_tick(&mut state);
        assert_eq!(state.player.hp, 10);

        state.skeletons[0].attack_age = Some(0.5); // after it
        combat_tick(&mut state);
        assert_eq!(state.player.hp, 10);
    }

    #[test]
    fn test_swing_hits_each_skeleton_once() {
        let mut state = running_state();
        state.skeletons.push(Skeleton::new(1, 45.0, 160.0, 80.0));
        state.player.action = PlayerAction::Attacking { age: 0.1 };
        state.player.swing_hits.clear();

        combat_tick(&mut state);
        assert_eq!(state.skeletons[0].hp, 2);

        // Same swing re-evaluated: the registry blocks a second hit
        combat_tick(&mut state);
        assert_eq!(state.skeletons[0].hp, 2);
        assert_eq!(state.player.swing_hits, vec![1]);
    }

    #[test]
    fn test_three_swings_kill_with_one_forced_dodge() {
        let mut state = running_state();
        state.skeletons.push(Skeleton::new(1, 45.0, 160.0, 80.0));
        state.player.action = PlayerAction::Attacking { age: 0.1 };

        // Swing 1: 3 -> 2, no forced dodge
        state.player.swing_hits.clear();
        combat_tick(&mut state);
        assert_eq!(state.skeletons[0].hp, 2);
        assert!(!state.skeletons[0].is_dodging());

        // Swing 2: 2 -> 1, forced dodge fires exactly once
        state.player.swing_hits.clear();
        combat_tick(&mut state);
        assert_eq!(state.skeletons[0].hp, 1);
        assert!(state.skeletons[0].is_dodging());
        assert!(state.skeletons[0].low_hp_dodged);

        // Swing 3: 1 -> 0, death and score
        state.skeletons[0].motion = crate::sim::state::Motion::Grounded;
        state.player.swing_hits.clear();
        combat_tick(&mut state);
        assert!(matches!(state.skeletons[0].life, Life::Dying { .. }));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_forced_dodge_ignores_dodge_cooldown() {
        let mut state = running_state();
        let mut s = Skeleton::new(1, 45.0, 160.0, 80.0);
        s.hp = 2;
        s.dodge_cooldown = DODGE_COOLDOWN; // normal dodges are locked out
        state.skeletons.push(s);
        state.player.action = PlayerAction::Attacking { age: 0.1 };
        state.player.swing_hits.clear();

        combat_tick(&mut state);

        let s = &state.skeletons[0];
        assert_eq!(s.hp, 1);
        assert!(s.is_dodging());
        // Orthogonal one-shot: the cooldown timer is left alone
        assert_eq!(s.dodge_cooldown, DODGE_COOLDOWN);
    }

    #[test]
    fn test_forced_dodge_cancels_open_swing() {
        let mut state = running_state();
        let mut s = striking_skeleton(1);
        s.hp = 2;
        state.skeletons.push(s);
        state.player.action = PlayerAction::Attacking { age: 0.1 };
        state.player.swing_hits.clear();
        // The player is inside the skeleton's strike range, but the forced
        // dodge fires after the enemy strike resolution already hit us this
        // tick; what matters is the swing cancellation
        combat_tick(&mut state);
        let s = &state.skeletons[0];
        assert!(s.is_dodging());
        assert!(!s.is_attacking());
    }

    #[test]
    fn test_kill_triggers_game_over_sequence_for_player() {
        let mut state = running_state();
        state.player.hp = 1;
        state.skeletons.push(striking_skeleton(1));

        combat_tick(&mut state);

        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.action, PlayerAction::Dead);
        assert!(state.cues.contains(&SoundCue::GameOver));
    }

    #[test]
    fn test_no_resolution_while_paused() {
        let mut state = running_state();
        state.skeletons.push(striking_skeleton(1));
        state.phase = GamePhase::Paused;
        combat_tick(&mut state);
        assert_eq!(state.player.hp, 10);
    }

    #[test]
    fn test_power_up_pickup() {
        let mut state = running_state();
        let player_hb = state.player.hitbox();
        state.power_ups.push(PowerUp {
            kind: PowerUpKind::Life,
            pos: player_hb.min,
            ttl_secs: POWER_UP_LIFETIME,
        });
        state.power_ups.push(PowerUp {
            kind: PowerUpKind::Shield,
            pos: Vec2::new(700.0, 200.0), // out of reach
            ttl_secs: POWER_UP_LIFETIME,
        });

        combat_tick(&mut state);

        assert_eq!(state.player.hp, 11);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].kind, PowerUpKind::Shield);
        assert!(state.cues.contains(&SoundCue::PowerUp));
    }

    #[test]
    fn test_shield_pickup_adds_charge() {
        let mut state = running_state();
        let player_hb = state.player.hitbox();
        state.power_ups.push(PowerUp {
            kind: PowerUpKind::Shield,
            pos: player_hb.min,
            ttl_secs: POWER_UP_LIFETIME,
        });
        combat_tick(&mut state);
        assert_eq!(state.player.shields, 1);
        assert_eq!(state.player.hp, 10);
    }
}

//! Skeleton AI
//!
//! Per-enemy, per-frame decisions driven by the 1D distance to the player:
//! leap check first (leapers only, preempts the rest of the tick), then
//! chase, attack, and the probabilistic dodge. Dodge and leap arcs are
//! tick-driven motion phases; while one runs it owns the skeleton's position
//! and suppresses every other decision.

use rand::Rng;

use super::state::{Facing, GameState, Motion, Skeleton};
use crate::consts::*;

/// Chase speed for the current score - recomputed every frame so all
/// skeletons speed up together as the score rises
pub fn speed_for_score(score: u32) -> f32 {
    (SKELETON_BASE_SPEED + score as f32 * SKELETON_SPEED_PER_SCORE)
        .clamp(SKELETON_BASE_SPEED, SKELETON_SPEED_CAP)
}

/// Parabolic arc height at normalized time t in [0, 1]
#[inline]
fn arc_height(peak: f32, t: f32) -> f32 {
    4.0 * peak * t * (1.0 - t)
}

/// Advance every living skeleton by one frame
pub fn update_all(state: &mut GameState, dt: f32) {
    let player_cx = state.player.hitbox().center().x;
    let speed = speed_for_score(state.score);

    // One dodge roll per skeleton per frame, drawn up front so the RNG
    // stream does not depend on which skeletons happen to be eligible
    let rolls: Vec<f32> = (0..state.skeletons.len())
        .map(|_| state.rng.random())
        .collect();

    for (skeleton, roll) in state.skeletons.iter_mut().zip(rolls) {
        if !skeleton.is_alive() {
            continue;
        }
        skeleton.speed = speed;
        update_one(skeleton, player_cx, roll, dt);
    }

    // Wrap/respawn: a skeleton that scrolled past the left boundary alive
    // counts as a scored pass. Collected first because scoring and the
    // power-up roll need the whole session.
    let passes: Vec<usize> = state
        .skeletons
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_alive() && s.x < WRAP_X)
        .map(|(i, _)| i)
        .collect();
    for i in passes {
        state.add_score();
        state.try_spawn_power_up();
        let offset = state
            .rng
            .random_range(RESPAWN_OFFSET_MIN..RESPAWN_OFFSET_MAX);
        let speed = speed_for_score(state.score);
        state.skeletons[i].reset_life(ARENA_WIDTH + offset, speed);
        log::debug!(
            "skeleton {} passed the arena, score now {}",
            state.skeletons[i].id,
            state.score
        );
    }
}

fn update_one(skeleton: &mut Skeleton, player_cx: f32, dodge_roll: f32, dt: f32) {
    // Independent per-enemy timers
    skeleton.attack_cooldown = (skeleton.attack_cooldown - dt).max(0.0);
    if !skeleton.is_dodging() {
        skeleton.dodge_cooldown = (skeleton.dodge_cooldown - dt).max(0.0);
    }
    if let Some(age) = skeleton.attack_age.as_mut() {
        *age += dt;
        if *age >= SKELETON_ATTACK_DURATION {
            skeleton.attack_age = None;
        }
    }
    if let Some(grace) = skeleton.post_leap_attack.as_mut() {
        *grace -= dt;
        if *grace <= 0.0 {
            skeleton.post_leap_attack = None;
            skeleton.begin_attack();
        }
    }

    // A running arc owns the position and suppresses all decisions
    match skeleton.motion {
        Motion::Dodging { age, from_x, to_x } => {
            let age = age + dt;
            let t = (age / DODGE_DURATION).clamp(0.0, 1.0);
            skeleton.x = from_x + (to_x - from_x) * t;
            skeleton.y = skeleton.plane - arc_height(DODGE_ARC_HEIGHT, t);
            if age >= DODGE_DURATION {
                skeleton.motion = Motion::Grounded;
                skeleton.y = skeleton.plane;
            } else {
                skeleton.motion = Motion::Dodging { age, from_x, to_x };
            }
            return;
        }
        Motion::Leaping { age, from_x, to_x } => {
            let age = age + dt;
            let t = (age / LEAP_DURATION).clamp(0.0, 1.0);
            skeleton.x = from_x + (to_x - from_x) * t;
            skeleton.y = skeleton.plane - arc_height(LEAP_ARC_HEIGHT, t);
            if age >= LEAP_DURATION {
                // Land on the plane, face the player, attack after the grace
                skeleton.motion = Motion::Grounded;
                skeleton.y = skeleton.plane;
                let cx = skeleton.hitbox().center().x;
                skeleton.facing = Facing::toward(cx, player_cx);
                skeleton.post_leap_attack = Some(LEAP_ATTACK_DELAY);
            } else {
                skeleton.motion = Motion::Leaping { age, from_x, to_x };
            }
            return;
        }
        Motion::Grounded => {}
    }

    let cx = skeleton.hitbox().center().x;
    let dx = cx - player_cx;
    let distance = dx.abs();

    // Leap check: one-shot per life, preempts chase/attack/dodge this frame
    if skeleton.leaper && !skeleton.leaped && distance <= LEAP_TRIGGER_DISTANCE {
        let to_x = if cx < player_cx {
            player_cx + LEAP_LANDING_OFFSET
        } else {
            player_cx - SKELETON_SPRITE_WIDTH - LEAP_LANDING_OFFSET
        };
        skeleton.begin_leap(to_x.clamp(0.0, ARENA_WIDTH - SKELETON_SPRITE_WIDTH));
        return;
    }

    // Chase until within attack range
    if distance > SKELETON_ATTACK_RANGE {
        skeleton.facing = Facing::toward(cx, player_cx);
        skeleton.x += skeleton.facing.sign() * skeleton.speed * dt;
        return;
    }

    // In range. Attack and dodge are mutually exclusive within a tick, so
    // both decisions look at the swing state from the start of the tick - a
    // dodge triggered below cancels an attack begun just above.
    let was_attacking = skeleton.is_attacking();

    if !was_attacking && skeleton.attack_cooldown <= 0.0 {
        skeleton.begin_attack();
    }

    if !was_attacking
        && skeleton.dodge_cooldown <= 0.0
        && dodge_roll < DODGE_CHANCE_PER_SEC * dt
    {
        let away = if dx > 0.0 { 1.0 } else { -1.0 };
        skeleton.begin_dodge(away);
        skeleton.dodge_cooldown = DODGE_COOLDOWN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Life;

    /// One skeleton at `x` on the middle plane, player at the start position
    /// (player hitbox center sits at x = 110)
    fn state_with_skeleton(x: f32) -> GameState {
        let mut state = GameState::new(1234, 0);
        state.skeletons.clear();
        state
            .skeletons
            .push(Skeleton::new(1, x, 160.0, SKELETON_BASE_SPEED));
        state
    }

    #[test]
    fn test_speed_scales_with_score_and_caps() {
        assert_eq!(speed_for_score(0), SKELETON_BASE_SPEED);
        assert_eq!(speed_for_score(40), 120.0);
        assert_eq!(speed_for_score(500), SKELETON_SPEED_CAP);
    }

    #[test]
    fn test_chase_moves_toward_player() {
        let mut state = state_with_skeleton(600.0);
        update_all(&mut state, 0.1);
        let s = &state.skeletons[0];
        assert!(s.x < 600.0);
        assert_eq!(s.facing, Facing::Left);
    }

    #[test]
    fn test_chase_stops_inside_attack_range() {
        // Skeleton center is x + 75, so x = 45 puts it 10px from the player
        let mut state = state_with_skeleton(45.0);
        update_all(&mut state, 0.016);
        assert_eq!(state.skeletons[0].x, 45.0);
    }

    #[test]
    fn test_attack_starts_in_range_and_resets_cooldown() {
        let mut state = state_with_skeleton(45.0);
        state.skeletons[0].dodge_cooldown = 1000.0;
        update_all(&mut state, 0.016);
        let s = &state.skeletons[0];
        assert!(s.is_attacking());
        assert_eq!(s.attack_cooldown, SKELETON_ATTACK_COOLDOWN);
    }

    #[test]
    fn test_strike_window_opens_and_closes_with_age() {
        let mut state = state_with_skeleton(45.0);
        state.skeletons[0].dodge_cooldown = 1000.0;
        update_all(&mut state, 0.016);
        assert!(!state.skeletons[0].attack_active());

        // Advance into the strike window
        let mut elapsed = 0.016;
        while elapsed < 0.2 {
            update_all(&mut state, 0.016);
            elapsed += 0.016;
        }
        assert!(state.skeletons[0].attack_active());

        // And past it: damage-capable only between 180ms and 360ms
        while elapsed < 0.45 {
            update_all(&mut state, 0.016);
            elapsed += 0.016;
        }
        assert!(state.skeletons[0].is_attacking());
        assert!(!state.skeletons[0].attack_active());
    }

    #[test]
    fn test_leaper_leaps_once_and_lands_behind_player() {
        let mut state = state_with_skeleton(140.0);
        state.skeletons[0] = Skeleton::new(3, 140.0, 160.0, SKELETON_BASE_SPEED);
        assert!(state.skeletons[0].leaper);

        // Skeleton center 215, player center 110: inside trigger distance
        update_all(&mut state, 0.016);
        assert!(state.skeletons[0].is_leaping());
        assert!(state.skeletons[0].leaped);

        // Run through the leap; it must land on the far side of the player,
        // settle on its plane, and attack after the grace delay
        for _ in 0..60 {
            update_all(&mut state, 0.016);
        }
        let s = &state.skeletons[0];
        assert!(!s.is_leaping());
        assert_eq!(s.y, s.plane);
        assert!(s.hitbox().center().x < 110.0);
        assert!(s.is_attacking());
    }

    #[test]
    fn test_leap_target_clamped_inside_arena() {
        // Player at the left edge; the left-side landing point would be
        // negative without the clamp
        let mut state = state_with_skeleton(100.0);
        state.skeletons[0] = Skeleton::new(3, 100.0, 160.0, SKELETON_BASE_SPEED);
        state.player.x = 0.0;
        update_all(&mut state, 0.016);
        match state.skeletons[0].motion {
            Motion::Leaping { to_x, .. } => assert_eq!(to_x, 0.0),
            other => panic!("expected leap, got {other:?}"),
        }
    }

    #[test]
    fn test_dodge_arc_retreats_and_returns_to_plane() {
        let mut state = state_with_skeleton(45.0);
        state.skeletons[0].begin_dodge(1.0);
        state.skeletons[0].dodge_cooldown = DODGE_COOLDOWN;

        let mut peaked = false;
        let mut frames = 0;
        while state.skeletons[0].is_dodging() {
            update_all(&mut state, 0.016);
            if state.skeletons[0].y < state.skeletons[0].plane - 60.0 {
                peaked = true;
            }
            frames += 1;
            assert!(frames < 100, "dodge never completed");
        }
        let s = &state.skeletons[0];
        assert!(peaked, "dodge arc never rose near its apex");
        assert_eq!(s.x, 105.0); // 45 + 60px retreat
        assert_eq!(s.y, s.plane);
    }

    #[test]
    fn test_dodge_triggers_when_roll_succeeds() {
        // A large dt makes the per-tick dodge probability exceed 1, so the
        // roll always passes once the skeleton is eligible
        let mut state = state_with_skeleton(45.0);
        state.skeletons[0].attack_cooldown = 50.0; // keep it from attacking
        update_all(&mut state, 3.0);
        let s = &state.skeletons[0];
        assert!(s.is_dodging());
        assert_eq!(s.dodge_cooldown, DODGE_COOLDOWN);
    }

    #[test]
    fn test_dodge_and_attack_never_coexist() {
        // Dodge and attack are mutually exclusive within a tick: whatever the
        // rolls do, a dodging skeleton must never hold an open swing
        let mut state = state_with_skeleton(45.0);
        for _ in 0..600 {
            update_all(&mut state, 0.05);
            let s = &state.skeletons[0];
            assert!(!(s.is_dodging() && s.is_attacking()));
        }
    }

    #[test]
    fn test_wrap_scores_and_respawns() {
        let mut state = state_with_skeleton(-250.0);
        state.score = 4;
        state.skeletons[0].hp = 1;
        state.skeletons[0].leaped = true;
        state.skeletons[0].low_hp_dodged = true;

        update_all(&mut state, 0.016);

        assert_eq!(state.score, 5);
        assert_eq!(state.high_score, 5);
        let s = &state.skeletons[0];
        assert!(s.x >= ARENA_WIDTH + RESPAWN_OFFSET_MIN);
        assert!(s.x < ARENA_WIDTH + RESPAWN_OFFSET_MAX);
        assert_eq!(s.hp, SKELETON_HP);
        assert!(!s.leaped);
        assert!(!s.low_hp_dodged);
        assert_eq!(s.id, 1); // identity survives the wrap
    }

    #[test]
    fn test_dying_skeletons_are_skipped() {
        let mut state = state_with_skeleton(600.0);
        state.skeletons[0].life = Life::Dying { age: 0.0 };
        update_all(&mut state, 0.1);
        assert_eq!(state.skeletons[0].x, 600.0);
    }
}

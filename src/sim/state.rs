//! Game state and core simulation types
//!
//! The session context owns everything: the player, the skeleton roster,
//! power-ups, score, RNG and pending sound cues. All simulation code receives
//! it explicitly - there is no ambient state.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::hitbox::{self, Hitbox};
use crate::consts::*;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Both loops suspended; resuming does not fast-forward elapsed time
    Paused,
    /// Run ended, only restart works
    GameOver,
}

/// Horizontal facing; flips on left/right input and steers rolls and dodges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing that looks from `from_x` toward `to_x`
    pub fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x < from_x { Facing::Left } else { Facing::Right }
    }
}

/// Player action channel. Rolling, Attacking and Jumping are mutually
/// exclusive; Idle/Running are derived from movement input when none of the
/// exclusive actions hold. Dead is terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    Idle,
    Running,
    /// Scripted velocity in the facing direction captured at roll start
    Rolling { age: f32, facing: Facing },
    Attacking { age: f32 },
    Jumping { age: f32 },
    Dead,
}

/// The player character. `x` is the sprite's left edge; y is fixed to the
/// ground line.
#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub facing: Facing,
    pub action: PlayerAction,
    pub hp: u32,
    pub shields: u32,
    /// Damage immunity countdown after a hit or shield block
    pub invincible_secs: f32,
    /// Cosmetic opacity dip countdown
    pub hit_flash_secs: f32,
    /// Jump trigger debounce countdown
    pub jump_gap_secs: f32,
    /// Skeleton ids already struck by the current attack swing
    pub swing_hits: Vec<u32>,
}

impl Player {
    pub fn new() -> Self {
        Self {
            x: PLAYER_START_X,
            facing: Facing::Right,
            action: PlayerAction::Idle,
            hp: PLAYER_START_HP,
            shields: 0,
            invincible_secs: 0.0,
            hit_flash_secs: 0.0,
            jump_gap_secs: 0.0,
            swing_hits: Vec::new(),
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        hitbox::player_hitbox(self.x)
    }

    pub fn is_alive(&self) -> bool {
        !matches!(self.action, PlayerAction::Dead)
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self.action, PlayerAction::Rolling { .. })
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.action, PlayerAction::Attacking { .. })
    }

    pub fn is_jumping(&self) -> bool {
        matches!(self.action, PlayerAction::Jumping { .. })
    }

    /// True while one of the mutually exclusive actions holds
    pub fn exclusive_action(&self) -> bool {
        self.is_rolling() || self.is_attacking() || self.is_jumping()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_secs > 0.0
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Skeleton locomotion phase. Dodge and leap arcs are tick-driven: the age is
/// advanced every frame and position is a pure function of it, so there are
/// no pending callbacks to cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    Grounded,
    /// Short retreat away from the player with a low parabolic arc
    Dodging { age: f32, from_x: f32, to_x: f32 },
    /// One-shot jump across the player with a high parabolic arc
    Leaping { age: f32, from_x: f32, to_x: f32 },
}

/// Alive or lingering for the death animation before roster compaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Life {
    Alive,
    Dying { age: f32 },
}

/// A skeleton enemy. `x` is the sprite's left edge; `y` equals the assigned
/// height plane except mid-dodge/leap.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Assigned height plane, restored after every arc
    pub plane: f32,
    pub hp: u32,
    /// Chase speed, recomputed from the score every frame
    pub speed: f32,
    pub facing: Facing,
    pub motion: Motion,
    /// Some while the attack animation runs; damage lands only inside the
    /// strike window
    pub attack_age: Option<f32>,
    pub attack_cooldown: f32,
    pub dodge_cooldown: f32,
    /// Grace countdown between leap landing and the follow-up attack
    pub post_leap_attack: Option<f32>,
    /// Every 3rd spawned id, permanent for the skeleton's lifetime
    pub leaper: bool,
    /// Leap is one-shot per life
    pub leaped: bool,
    /// The forced dodge at 1 HP fires once per life
    pub low_hp_dodged: bool,
    pub life: Life,
}

impl Skeleton {
    pub fn new(id: u32, x: f32, plane: f32, speed: f32) -> Self {
        Self {
            id,
            x,
            y: plane,
            plane,
            hp: SKELETON_HP,
            speed,
            facing: Facing::Left,
            motion: Motion::Grounded,
            attack_age: None,
            attack_cooldown: 0.0,
            dodge_cooldown: 0.0,
            post_leap_attack: None,
            leaper: id % 3 == 0,
            leaped: false,
            low_hp_dodged: false,
            life: Life::Alive,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        hitbox::skeleton_hitbox(self.x, self.y)
    }

    pub fn is_alive(&self) -> bool {
        matches!(self.life, Life::Alive)
    }

    pub fn is_dodging(&self) -> bool {
        matches!(self.motion, Motion::Dodging { .. })
    }

    pub fn is_leaping(&self) -> bool {
        matches!(self.motion, Motion::Leaping { .. })
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_age.is_some()
    }

    /// True only inside the strike window of a running attack
    pub fn attack_active(&self) -> bool {
        match self.attack_age {
            Some(age) => (STRIKE_WINDOW_START..STRIKE_WINDOW_END).contains(&age),
            None => false,
        }
    }

    /// Start an attack swing and reset the attack cooldown
    pub fn begin_attack(&mut self) {
        self.attack_age = Some(0.0);
        self.attack_cooldown = SKELETON_ATTACK_COOLDOWN;
    }

    /// Drop any running or pending attack so no stale strike window survives
    /// a state transition
    pub fn cancel_attack(&mut self) {
        self.attack_age = None;
        self.post_leap_attack = None;
    }

    /// Start a dodge retreat in `dir` (+1 right, -1 left). Cancels the attack;
    /// does not touch the dodge cooldown - callers decide that.
    pub fn begin_dodge(&mut self, dir: f32) {
        if !self.is_alive() || self.is_dodging() {
            return;
        }
        self.cancel_attack();
        let to_x = (self.x + dir * DODGE_DISTANCE).clamp(0.0, ARENA_WIDTH - SKELETON_SPRITE_WIDTH);
        self.motion = Motion::Dodging {
            age: 0.0,
            from_x: self.x,
            to_x,
        };
    }

    /// Start the one-shot leap toward `to_x` (already clamped by the caller)
    pub fn begin_leap(&mut self, to_x: f32) {
        self.cancel_attack();
        self.leaped = true;
        self.motion = Motion::Leaping {
            age: 0.0,
            from_x: self.x,
            to_x,
        };
    }

    /// Enter the dying state; the roster keeps the corpse until compaction
    pub fn kill(&mut self) {
        self.cancel_attack();
        self.motion = Motion::Grounded;
        self.y = self.plane;
        self.life = Life::Dying { age: 0.0 };
    }

    /// Fresh life after a wrap: full HP, cleared flags, leap and low-HP dodge
    /// re-armed. Id and leaper status are permanent.
    pub fn reset_life(&mut self, x: f32, speed: f32) {
        self.x = x;
        self.y = self.plane;
        self.hp = SKELETON_HP;
        self.speed = speed;
        self.facing = Facing::Left;
        self.motion = Motion::Grounded;
        self.attack_age = None;
        self.attack_cooldown = 0.0;
        self.dodge_cooldown = 0.0;
        self.post_leap_attack = None;
        self.leaped = false;
        self.low_hp_dodged = false;
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// +1 HP on pickup
    Life,
    /// +1 shield charge on pickup
    Shield,
}

/// A spawned power-up waiting to be collected
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    /// Top-left corner of the 24x24 pickup box
    pub pos: Vec2,
    /// Despawn countdown for uncollected power-ups
    pub ttl_secs: f32,
}

impl PowerUp {
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::square(self.pos, POWER_UP_SIZE)
    }
}

/// Named cue events for an external sound player. Playback failure must not
/// affect game state, so the sim only records intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Start,
    Hit,
    ShieldBlock,
    PowerUp,
    GameOver,
}

/// Background scroll accumulators the renderer turns into layer offsets
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallax {
    pub back: f32,
    pub far: f32,
}

impl Parallax {
    /// Feed horizontal player motion (signed px) into both layers
    pub fn advance(&mut self, px: f32) {
        self.back += px * PARALLAX_FACTOR_BACK;
        self.far += px * PARALLAX_FACTOR_FAR;
        // Wrap to keep the accumulators small
        self.back %= PARALLAX_TILE_WIDTH;
        self.far %= PARALLAX_TILE_WIDTH;
    }

    /// Background x positions for the two layers
    pub fn offsets(&self) -> (f32, f32) {
        (
            -(self.back % PARALLAX_TILE_WIDTH),
            -(self.far % PARALLAX_TILE_WIDTH),
        )
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Sole randomness source - seeded so runs are deterministic
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Mirror of the persisted high score; the shell writes it back when it
    /// grows past the stored value
    pub high_score: u32,
    /// Enemies per wave; +1 every time the roster is fully cleared
    pub wave_size: u32,
    pub player: Player,
    /// Spawn order is iteration order; membership changes only via spawn and
    /// compaction
    pub skeletons: Vec<Skeleton>,
    pub power_ups: Vec<PowerUp>,
    pub scroll: Parallax,
    /// Pending sound cues, drained by the shell
    pub cues: Vec<SoundCue>,
    pub debug_hitboxes: bool,
    next_id: u32,
}

impl GameState {
    /// Fresh session with the persisted high score and one skeleton on field
    pub fn new(seed: u64, high_score: u32) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            high_score,
            wave_size: 1,
            player: Player::new(),
            skeletons: Vec::new(),
            power_ups: Vec::new(),
            scroll: Parallax::default(),
            cues: Vec::new(),
            debug_hitboxes: false,
            next_id: 0,
        };
        state.spawn_wave(1);
        state.cues.push(SoundCue::Start);
        state
    }

    /// Allocate the next skeleton id; ids are monotonic and never reused
    pub fn next_skeleton_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Spawn `count` skeletons beyond the right edge with staggered offsets
    /// and random height planes so they do not bunch up
    pub fn spawn_wave(&mut self, count: u32) {
        let speed = super::skeleton::speed_for_score(self.score);
        for _ in 0..count {
            let id = self.next_skeleton_id();
            let offset = self.rng.random_range(SPAWN_OFFSET_MIN..SPAWN_OFFSET_MAX);
            let plane = HEIGHT_PLANES[self.rng.random_range(0..HEIGHT_PLANES.len())];
            let skeleton = Skeleton::new(id, ARENA_WIDTH + offset, plane, speed);
            log::debug!(
                "spawning skeleton {} at x={:.0} plane={} leaper={}",
                id,
                skeleton.x,
                plane,
                skeleton.leaper
            );
            self.skeletons.push(skeleton);
        }
    }

    /// Bump the score and pull the high score along with it
    pub fn add_score(&mut self) {
        self.score += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Roll for a power-up spawn. Skipped entirely when the roll fails or an
    /// instance of the chosen kind is already on field.
    pub fn try_spawn_power_up(&mut self) {
        if self.rng.random::<f32>() >= POWER_UP_CHANCE {
            return;
        }
        let kind = if self.rng.random::<f32>() < POWER_UP_LIFE_WEIGHT {
            PowerUpKind::Life
        } else {
            PowerUpKind::Shield
        };
        if self.power_ups.iter().any(|p| p.kind == kind) {
            return;
        }
        let x = self.rng.random_range(0.0..ARENA_WIDTH - POWER_UP_SIZE);
        let y = self.rng.random_range(50.0..ARENA_HEIGHT - 50.0);
        self.power_ups.push(PowerUp {
            kind,
            pos: Vec2::new(x, y),
            ttl_secs: POWER_UP_LIFETIME,
        });
    }

    /// Drain pending sound cues for the shell to play
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn alive_skeletons(&self) -> impl Iterator<Item = &Skeleton> {
        self.skeletons.iter().filter(|s| s.is_alive())
    }

    /// Discard the run and rebuild everything except the high score and RNG
    pub fn reset_run(&mut self) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.wave_size = 1;
        self.player = Player::new();
        self.skeletons.clear();
        self.power_ups.clear();
        self.scroll = Parallax::default();
        self.spawn_wave(1);
        self.cues.push(SoundCue::Start);
    }
}

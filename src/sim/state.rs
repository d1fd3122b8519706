//! Game state and core simulation types
//!
//! One run of the level lives in a single `GameState`. It is serializable
//! for debug snapshots only; nothing is ever written to storage.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player hit a hazard; death animation is running
    Crashed,
    /// Run ended
    GameOver,
}

/// The player's box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity (pixels/s, +y is down)
    pub vel_y: f32,
    /// Standing on the ground, a platform or a block
    pub grounded: bool,
    /// Jumps used since last touching down (0..=MAX_JUMPS)
    pub jumps_used: u8,
    /// Ticks left on a buffered jump press
    pub jump_buffer_ticks: u32,
    /// Visual spin (radians)
    pub rotation: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y - PLAYER_SIZE),
            vel_y: 0.0,
            grounded: true,
            jumps_used: 0,
            jump_buffer_ticks: 0,
            rotation: 0.0,
        }
    }
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + PLAYER_SIZE
    }

    /// Put the player's feet on a surface
    pub fn land_on(&mut self, surface_y: f32) {
        self.pos.y = surface_y - PLAYER_SIZE;
        self.vel_y = 0.0;
        self.grounded = true;
        self.jumps_used = 0;
    }

    pub fn can_jump(&self) -> bool {
        self.jumps_used < MAX_JUMPS
    }

    /// Snap the spin to the nearest quarter turn
    pub fn settle_rotation(&mut self) {
        let quarter = std::f32::consts::FRAC_PI_2;
        self.rotation = ((self.rotation / quarter).round() * quarter) % std::f32::consts::TAU;
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Triangular hazard, deadly on any contact
    Spike,
    /// Solid box - safe to land on, deadly to run into
    Block,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
}

/// One-way floating platform (land from above only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub pos: Vec2,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Absorbs one crash
    Shield,
    /// Pulls nearby coins in
    Magnet,
    /// Slows the scroll
    SlowMotion,
    /// Doubles bonus points
    DoubleScore,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
        PowerUpKind::SlowMotion,
        PowerUpKind::DoubleScore,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
}

/// Active power-up effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub shield_active: bool,
    /// Post-shield invulnerability
    pub grace_ticks: u32,
    pub magnet_ticks: u32,
    pub slow_ticks: u32,
    pub double_score_ticks: u32,
}

impl ActiveEffects {
    pub fn apply(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::Shield => self.shield_active = true,
            PowerUpKind::Magnet => self.magnet_ticks = crate::secs_to_ticks(MAGNET_DURATION),
            PowerUpKind::SlowMotion => {
                self.slow_ticks = crate::secs_to_ticks(SLOW_MOTION_DURATION)
            }
            PowerUpKind::DoubleScore => {
                self.double_score_ticks = crate::secs_to_ticks(DOUBLE_SCORE_DURATION)
            }
        }
    }

    /// Count every timer down by one tick
    pub fn decay(&mut self) {
        self.grace_ticks = self.grace_ticks.saturating_sub(1);
        self.magnet_ticks = self.magnet_ticks.saturating_sub(1);
        self.slow_ticks = self.slow_ticks.saturating_sub(1);
        self.double_score_ticks = self.double_score_ticks.saturating_sub(1);
    }

    pub fn score_multiplier(&self) -> u64 {
        if self.double_score_ticks > 0 { 2 } else { 1 }
    }
}

/// Particle colors map onto theme slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    Player,
    Coin,
    Shield,
    PowerUp(PowerUpKind),
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: ParticleColor,
    pub life: f32, // 0-1, decreases over time
    pub size: f32,
}

/// Maximum particles
pub const MAX_PARTICLES: usize = 256;

/// Things that happened during a tick, for audio and HUD feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    DoubleJumped,
    Landed,
    CoinCollected,
    PowerUpCollected(PowerUpKind),
    ShieldBroken,
    Crashed,
    GameOver,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Generator RNG
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks left in the crash animation
    pub crash_ticks: u32,
    pub player: Player,
    /// Active obstacles (sorted by id for determinism)
    pub obstacles: Vec<Obstacle>,
    pub platforms: Vec<Platform>,
    pub coins: Vec<Coin>,
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    /// Base scroll speed (before slow motion)
    pub speed: f32,
    /// Pixels scrolled so far
    pub distance: f32,
    /// Screen x where the next generated chunk may start
    pub spawn_cursor: f32,
    /// Total score (distance points + bonus)
    pub score: u64,
    /// Points from coins and power-ups
    pub bonus: u64,
    pub coins_collected: u32,
    /// Obstacles that scrolled off the left edge
    pub obstacles_cleared: u32,
    /// Screen shake intensity (0-1)
    pub screen_shake: f32,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            crash_ticks: 0,
            player: Player::default(),
            obstacles: Vec::new(),
            platforms: Vec::new(),
            coins: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            speed: BASE_SCROLL_SPEED,
            distance: 0.0,
            spawn_cursor: CANVAS_WIDTH + START_RUNWAY,
            score: 0,
            bonus: 0,
            coins_collected: 0,
            obstacles_cleared: 0,
            screen_shake: 0.0,
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        super::generate::extend_level(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn spawn_obstacle(&mut self, kind: ObstacleKind, rect: Rect) {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle { id, kind, rect });
    }

    pub fn spawn_platform(&mut self, rect: Rect) {
        let id = self.next_entity_id();
        self.platforms.push(Platform { id, rect });
    }

    pub fn spawn_coin(&mut self, pos: Vec2) {
        let id = self.next_entity_id();
        self.coins.push(Coin { id, pos });
    }

    pub fn spawn_powerup(&mut self, kind: PowerUpKind, pos: Vec2) {
        let id = self.next_entity_id();
        self.powerups.push(PowerUp { id, kind, pos });
    }

    /// Scroll speed after slow motion
    pub fn effective_speed(&self) -> f32 {
        if self.effects.slow_ticks > 0 {
            self.speed * SLOW_MOTION_FACTOR
        } else {
            self.speed
        }
    }

    /// Add bonus points (respects double score)
    pub fn award(&mut self, points: u64) {
        self.bonus += points * self.effects.score_multiplier();
        self.refresh_score();
    }

    /// Recompute score from distance and bonus
    pub fn refresh_score(&mut self) {
        self.score = (self.distance / DISTANCE_PER_POINT) as u64 + self.bonus;
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
        self.platforms.sort_by_key(|p| p.id);
        self.coins.sort_by_key(|c| c.id);
        self.powerups.sort_by_key(|p| p.id);
    }
}

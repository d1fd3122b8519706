//! Geo Tax Flash 2 - A side-scrolling jump-and-dodge platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, scrolling world, collisions)
//! - `app`: Screen flow (menu, level select, play) and the fixed-timestep driver
//! - `renderer`: WebGPU rendering pipeline
//! - `theme` / `level`: Static color palettes and the level table
//! - `settings`: Runtime configuration

pub mod app;
pub mod audio;
pub mod highscores;
pub mod level;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod theme;

pub use app::{App, Key, Screen};
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Logical canvas size; everything is laid out in these pixels
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Top of the ground strip
    pub const GROUND_Y: f32 = 480.0;

    /// Player box - fixed horizontal position, the world scrolls past it
    pub const PLAYER_X: f32 = 160.0;
    pub const PLAYER_SIZE: f32 = 30.0;

    /// Gravity (pixels/s², +y is down)
    pub const GRAVITY: f32 = 2600.0;
    /// Initial upward velocity of the first jump
    pub const JUMP_VELOCITY: f32 = -760.0;
    /// Initial upward velocity of the mid-air jump
    pub const DOUBLE_JUMP_VELOCITY: f32 = -680.0;
    /// Terminal fall speed
    pub const MAX_FALL_SPEED: f32 = 1400.0;
    /// Ground jump + one air jump
    pub const MAX_JUMPS: u8 = 2;
    /// How long a jump press is remembered while no jump is available (seconds)
    pub const JUMP_BUFFER: f32 = 0.1;
    /// Airborne spin (radians/s)
    pub const SPIN_RATE: f32 = 7.5;

    /// Scroll speed (pixels/s)
    pub const BASE_SCROLL_SPEED: f32 = 360.0;
    pub const MAX_SCROLL_SPEED: f32 = 660.0;
    /// Scroll speed gained per second of play
    pub const SPEED_RAMP: f32 = 4.0;
    /// Scroll multiplier while slow motion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.6;

    /// Obstacle sizes
    pub const SPIKE_WIDTH: f32 = 30.0;
    pub const SPIKE_HEIGHT: f32 = 30.0;
    pub const BLOCK_SIZE: f32 = 40.0;
    pub const PLATFORM_THICKNESS: f32 = 16.0;
    pub const COIN_RADIUS: f32 = 10.0;
    pub const POWERUP_RADIUS: f32 = 14.0;

    /// Collision tuning
    pub const SPIKE_FORGIVENESS: f32 = 4.0;
    pub const BLOCK_FORGIVENESS: f32 = 3.0;
    pub const LANDING_TOLERANCE: f32 = 6.0;

    /// Scoring
    pub const DISTANCE_PER_POINT: f32 = 10.0;
    pub const COIN_VALUE: u64 = 10;
    pub const POWERUP_VALUE: u64 = 25;

    /// Power-up durations (seconds)
    pub const MAGNET_DURATION: f32 = 8.0;
    pub const SLOW_MOTION_DURATION: f32 = 5.0;
    pub const DOUBLE_SCORE_DURATION: f32 = 10.0;
    /// Invulnerability after a shield absorbs a hit (seconds)
    pub const SHIELD_GRACE: f32 = 0.5;
    /// Magnet reach and pull speed
    pub const MAGNET_RADIUS: f32 = 180.0;
    pub const MAGNET_PULL_SPEED: f32 = 700.0;

    /// Death animation before the run is over (seconds)
    pub const CRASH_DURATION: f32 = 0.75;

    /// Procedural generation
    pub const START_RUNWAY: f32 = 300.0;
    pub const SPAWN_LOOKAHEAD: f32 = 400.0;
    pub const MIN_CHUNK_GAP: f32 = 220.0;
    pub const MAX_EXTRA_GAP: f32 = 200.0;
}

/// Seconds to whole simulation ticks (rounded, at least one)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    ((secs / consts::SIM_DT).round() as u32).max(1)
}

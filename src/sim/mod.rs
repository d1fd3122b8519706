//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod generate;
pub mod geometry;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_jump;
pub use collision::{aabb_overlap, circle_rect_overlap, landing_on, spike_hit};
pub use generate::{ChunkKind, extend_level};
pub use geometry::{Rect, Spike};
pub use state::{
    ActiveEffects, Coin, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Particle,
    ParticleColor, Platform, Player, PowerUp, PowerUpKind,
};
pub use tick::{TickInput, tick};

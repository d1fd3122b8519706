//! Procedural level extension
//!
//! The level is an endless strip assembled from small hand-made chunks.
//! Chunks are appended at `spawn_cursor` (a screen x that scrolls with the
//! world) whenever it gets close to the right edge of the screen.

use glam::Vec2;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_pcg::Pcg32;

use super::geometry::Rect;
use super::state::{GameState, ObstacleKind, PowerUpKind};
use crate::consts::*;

/// Chunk templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Spike,
    SpikeRow,
    Block,
    PlatformRun,
    CoinArc,
    PowerUp,
}

impl ChunkKind {
    pub const ALL: [ChunkKind; 6] = [
        ChunkKind::Spike,
        ChunkKind::SpikeRow,
        ChunkKind::Block,
        ChunkKind::PlatformRun,
        ChunkKind::CoinArc,
        ChunkKind::PowerUp,
    ];
}

/// Distance after which three-spike rows appear
pub const TRIPLE_SPIKE_DISTANCE: f32 = 1500.0;
/// Distance after which platforms get spikes underneath
pub const PLATFORM_SPIKES_DISTANCE: f32 = 1000.0;
/// Distance after which power-ups appear
pub const POWERUP_DISTANCE: f32 = 800.0;

/// One object to place, relative to the chunk origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spawn {
    Obstacle { kind: ObstacleKind, rect: Rect },
    Platform { rect: Rect },
    Coin { pos: Vec2 },
    PowerUp { kind: PowerUpKind, pos: Vec2 },
}

/// A built chunk: objects with x measured from the chunk's left edge
#[derive(Debug, Clone, Default)]
pub struct Chunk {
    pub spawns: Vec<Spawn>,
    pub width: f32,
}

/// Selection weights for the current distance (difficulty ramp)
pub fn chunk_weights(distance: f32) -> [u32; 6] {
    ChunkKind::ALL.map(|kind| match kind {
        ChunkKind::Spike => 30,
        ChunkKind::SpikeRow => {
            if distance < 400.0 {
                0
            } else {
                20
            }
        }
        ChunkKind::Block => 15,
        ChunkKind::PlatformRun => 15,
        ChunkKind::CoinArc => 10,
        ChunkKind::PowerUp => {
            if distance < POWERUP_DISTANCE {
                0
            } else {
                5
            }
        }
    })
}

/// Pick a chunk template
pub fn choose_chunk(rng: &mut Pcg32, distance: f32) -> ChunkKind {
    match WeightedIndex::new(chunk_weights(distance)) {
        Ok(dist) => ChunkKind::ALL[dist.sample(rng)],
        Err(err) => {
            log::warn!("Bad chunk weights at distance {distance}: {err}");
            ChunkKind::Spike
        }
    }
}

/// Empty space before the next chunk; grows with speed so jumps stay possible
pub fn chunk_gap(rng: &mut Pcg32, speed: f32) -> f32 {
    let min_gap = MIN_CHUNK_GAP * (speed / BASE_SCROLL_SPEED).max(1.0);
    min_gap + rng.random_range(0.0..MAX_EXTRA_GAP)
}

/// Lay out a chunk template
pub fn build_chunk(rng: &mut Pcg32, kind: ChunkKind, distance: f32) -> Chunk {
    let mut chunk = Chunk::default();
    match kind {
        ChunkKind::Spike => {
            chunk.spawns.push(spike(0.0));
            if rng.random_bool(0.5) {
                chunk.spawns.push(Spawn::Coin {
                    pos: Vec2::new(SPIKE_WIDTH / 2.0, GROUND_Y - 110.0),
                });
            }
            chunk.width = SPIKE_WIDTH;
        }
        ChunkKind::SpikeRow => {
            let count = if distance >= TRIPLE_SPIKE_DISTANCE && rng.random_bool(0.4) {
                3
            } else {
                2
            };
            for i in 0..count {
                chunk.spawns.push(spike(i as f32 * SPIKE_WIDTH));
            }
            chunk.width = count as f32 * SPIKE_WIDTH;
        }
        ChunkKind::Block => {
            chunk.spawns.push(Spawn::Obstacle {
                kind: ObstacleKind::Block,
                rect: Rect::on_surface(0.0, GROUND_Y, BLOCK_SIZE, BLOCK_SIZE),
            });
            chunk.width = BLOCK_SIZE;
            // Sometimes a spike right behind it, to be cleared from the block top
            if rng.random_bool(0.35) {
                chunk.spawns.push(spike(BLOCK_SIZE + 40.0));
                chunk.width = BLOCK_SIZE + 40.0 + SPIKE_WIDTH;
            }
        }
        ChunkKind::PlatformRun => {
            let width = rng.random_range(160.0..=260.0f32);
            let height = rng.random_range(70.0..=150.0f32);
            let top = GROUND_Y - height;
            chunk.spawns.push(Spawn::Platform {
                rect: Rect::new(0.0, top, width, PLATFORM_THICKNESS),
            });

            let coin_count = (width / 50.0) as usize;
            let spacing = width / coin_count as f32;
            for i in 0..coin_count {
                chunk.spawns.push(Spawn::Coin {
                    pos: Vec2::new(spacing * (i as f32 + 0.5), top - 25.0),
                });
            }

            if distance >= PLATFORM_SPIKES_DISTANCE {
                // Ground spikes under the middle, leaving room at both ends
                let spikes = ((width - 80.0) / 60.0).max(1.0) as usize;
                for i in 0..spikes {
                    chunk.spawns.push(spike(40.0 + i as f32 * 60.0));
                }
            }
            chunk.width = width;
        }
        ChunkKind::CoinArc => {
            // Coins along the path of a jump started 60px before the chunk
            let count = 5;
            let airtime = 2.0 * -JUMP_VELOCITY / GRAVITY;
            let span = 200.0;
            for i in 0..count {
                let t = (i as f32 + 1.0) / (count as f32 + 1.0);
                let secs = t * airtime;
                let rise = -JUMP_VELOCITY * secs - 0.5 * GRAVITY * secs * secs;
                chunk.spawns.push(Spawn::Coin {
                    pos: Vec2::new(t * span, GROUND_Y - PLAYER_SIZE / 2.0 - rise),
                });
            }
            chunk.width = span;
        }
        ChunkKind::PowerUp => {
            let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
            chunk.spawns.push(Spawn::PowerUp {
                kind,
                pos: Vec2::new(POWERUP_RADIUS, GROUND_Y - 90.0),
            });
            chunk.width = POWERUP_RADIUS * 2.0;
        }
    }
    chunk
}

fn spike(x: f32) -> Spawn {
    Spawn::Obstacle {
        kind: ObstacleKind::Spike,
        rect: Rect::on_surface(x, GROUND_Y, SPIKE_WIDTH, SPIKE_HEIGHT),
    }
}

/// Append chunks until the cursor is past the lookahead line
pub fn extend_level(state: &mut GameState) {
    while state.spawn_cursor < CANVAS_WIDTH + SPAWN_LOOKAHEAD {
        let gap = chunk_gap(&mut state.rng, state.speed);
        let kind = choose_chunk(&mut state.rng, state.distance);
        let chunk = build_chunk(&mut state.rng, kind, state.distance);
        let origin = state.spawn_cursor + gap;

        log::debug!(
            "Chunk {:?} at x={:.0} (distance {:.0}, {} objects)",
            kind,
            origin,
            state.distance,
            chunk.spawns.len()
        );

        place_chunk(state, &chunk, origin);
        state.spawn_cursor = origin + chunk.width;
    }
}

/// Insert a chunk's objects with their x shifted to `origin`
pub fn place_chunk(state: &mut GameState, chunk: &Chunk, origin: f32) {
    for spawn in &chunk.spawns {
        match *spawn {
            Spawn::Obstacle { kind, mut rect } => {
                rect.translate_x(origin);
                state.spawn_obstacle(kind, rect);
            }
            Spawn::Platform { mut rect } => {
                rect.translate_x(origin);
                state.spawn_platform(rect);
            }
            Spawn::Coin { pos } => state.spawn_coin(pos + Vec2::new(origin, 0.0)),
            Spawn::PowerUp { kind, pos } => state.spawn_powerup(kind, pos + Vec2::new(origin, 0.0)),
        }
    }
}

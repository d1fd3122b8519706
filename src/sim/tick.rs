//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::autopilot::autopilot_jump;
use super::collision::{aabb_overlap, circle_rect_overlap, landing_on, spike_hit};
use super::generate::extend_level;
use super::state::{
    GameEvent, GamePhase, GameState, MAX_PARTICLES, ObstacleKind, Particle, ParticleColor,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed this tick (click/tap/space)
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - the autopilot plays
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    // Decay screen shake
    state.screen_shake *= 0.9;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Crashed => {
            update_particles(state, dt);
            state.crash_ticks = state.crash_ticks.saturating_sub(1);
            if state.crash_ticks == 0 {
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::GameOver);
                log::info!(
                    "Run over: score {} distance {:.0} coins {}",
                    state.score,
                    state.distance,
                    state.coins_collected
                );
            }
            state.time_ticks += 1;
            return;
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    // Timers and difficulty ramp
    state.effects.decay();
    state.speed = (state.speed + SPEED_RAMP * dt).min(MAX_SCROLL_SPEED);
    let scroll = state.effective_speed() * dt;

    // Jump input, buffered so a press just before touchdown still counts
    let wants_jump = input.jump || (input.idle_mode && autopilot_jump(state));
    if wants_jump {
        state.player.jump_buffer_ticks = crate::secs_to_ticks(JUMP_BUFFER);
    }
    if state.player.jump_buffer_ticks > 0 {
        if state.player.can_jump() {
            jump(state);
        } else {
            state.player.jump_buffer_ticks -= 1;
        }
    }

    // Gravity (semi-implicit Euler)
    let was_grounded = state.player.grounded;
    let prev_bottom = state.player.bottom();
    state.player.vel_y = (state.player.vel_y + GRAVITY * dt).min(MAX_FALL_SPEED);
    state.player.pos.y += state.player.vel_y * dt;
    if state.player.pos.y < 0.0 {
        state.player.pos.y = 0.0;
        state.player.vel_y = state.player.vel_y.max(0.0);
    }

    scroll_world(state, scroll);
    state.refresh_score();

    resolve_landing(state, prev_bottom, was_grounded);

    check_hazards(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    collect_coins(state, dt);
    collect_powerups(state);

    remove_off_screen(state);
    extend_level(state);

    if !state.player.grounded {
        state.player.rotation += SPIN_RATE * dt;
    }

    update_particles(state, dt);

    // Ensure deterministic ordering
    state.normalize_order();
}

fn jump(state: &mut GameState) {
    let player = &mut state.player;
    let first = player.jumps_used == 0;
    player.vel_y = if first {
        JUMP_VELOCITY
    } else {
        DOUBLE_JUMP_VELOCITY
    };
    player.jumps_used += 1;
    player.grounded = false;
    player.jump_buffer_ticks = 0;
    state.events.push(if first {
        GameEvent::Jumped
    } else {
        GameEvent::DoubleJumped
    });
}

/// Move every object left by `dx`
fn scroll_world(state: &mut GameState, dx: f32) {
    for obstacle in &mut state.obstacles {
        obstacle.rect.translate_x(-dx);
    }
    for platform in &mut state.platforms {
        platform.rect.translate_x(-dx);
    }
    for coin in &mut state.coins {
        coin.pos.x -= dx;
    }
    for powerup in &mut state.powerups {
        powerup.pos.x -= dx;
    }
    for particle in &mut state.particles {
        particle.pos.x -= dx;
    }
    state.distance += dx;
    state.spawn_cursor -= dx;
}

/// Snap onto the ground, a platform or a block top
fn resolve_landing(state: &mut GameState, prev_bottom: f32, was_grounded: bool) {
    let player_rect = state.player.rect();
    let vel_y = state.player.vel_y;

    let mut surface: Option<f32> = None;
    if player_rect.bottom() >= GROUND_Y {
        surface = Some(GROUND_Y);
    }
    let tops = state
        .platforms
        .iter()
        .map(|p| &p.rect)
        .chain(
            state
                .obstacles
                .iter()
                .filter(|o| o.kind == ObstacleKind::Block)
                .map(|o| &o.rect),
        );
    for rect in tops {
        if let Some(top) = landing_on(prev_bottom, &player_rect, vel_y, rect) {
            // Highest surface wins
            surface = Some(surface.map_or(top, |s| s.min(top)));
        }
    }

    match surface {
        Some(top) => {
            state.player.land_on(top);
            if !was_grounded {
                state.player.settle_rotation();
                state.events.push(GameEvent::Landed);
            }
        }
        None => {
            state.player.grounded = false;
            // Walking off a ledge uses up the ground jump
            if state.player.jumps_used == 0 {
                state.player.jumps_used = 1;
            }
        }
    }
}

/// Spike and block-body contact
fn check_hazards(state: &mut GameState) {
    if state.effects.grace_ticks > 0 {
        return;
    }
    let player_rect = state.player.rect();
    let body = player_rect.inset(BLOCK_FORGIVENESS);

    let hit = state.obstacles.iter().position(|o| match o.kind {
        ObstacleKind::Spike => spike_hit(&player_rect, &o.rect),
        ObstacleKind::Block => aabb_overlap(&body, &o.rect),
    });

    let Some(index) = hit else {
        return;
    };

    if state.effects.shield_active {
        let obstacle = state.obstacles.remove(index);
        state.effects.shield_active = false;
        state.effects.grace_ticks = crate::secs_to_ticks(SHIELD_GRACE);
        state.screen_shake = (state.screen_shake + 0.4).min(1.0);
        state.events.push(GameEvent::ShieldBroken);
        spawn_burst(state, obstacle.rect.center(), ParticleColor::Shield, 16);
        log::debug!("Shield absorbed {:?} {}", obstacle.kind, obstacle.id);
        return;
    }

    crash(state);
}

fn crash(state: &mut GameState) {
    state.phase = GamePhase::Crashed;
    state.crash_ticks = crate::secs_to_ticks(CRASH_DURATION);
    state.screen_shake = 1.0;
    state.events.push(GameEvent::Crashed);
    let center = state.player.rect().center();
    spawn_burst(state, center, ParticleColor::Player, 40);
    log::info!(
        "Crashed at distance {:.0} (tick {})",
        state.distance,
        state.time_ticks
    );
}

fn collect_coins(state: &mut GameState, dt: f32) {
    let player_rect = state.player.rect();
    let player_center = player_rect.center();

    if state.effects.magnet_ticks > 0 {
        for coin in &mut state.coins {
            let to_player = player_center - coin.pos;
            let dist = to_player.length();
            if dist < MAGNET_RADIUS && dist > 0.0 {
                let step = (MAGNET_PULL_SPEED * dt).min(dist);
                coin.pos += to_player / dist * step;
            }
        }
    }

    let mut collected = Vec::new();
    state.coins.retain(|coin| {
        if circle_rect_overlap(coin.pos, COIN_RADIUS, &player_rect) {
            collected.push(coin.pos);
            false
        } else {
            true
        }
    });

    for pos in collected {
        state.coins_collected += 1;
        state.award(COIN_VALUE);
        state.events.push(GameEvent::CoinCollected);
        spawn_burst(state, pos, ParticleColor::Coin, 8);
    }
}

fn collect_powerups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut collected = Vec::new();
    state.powerups.retain(|p| {
        if circle_rect_overlap(p.pos, POWERUP_RADIUS, &player_rect) {
            collected.push((p.kind, p.pos));
            false
        } else {
            true
        }
    });

    for (kind, pos) in collected {
        state.effects.apply(kind);
        state.award(POWERUP_VALUE);
        state.events.push(GameEvent::PowerUpCollected(kind));
        spawn_burst(state, pos, ParticleColor::PowerUp(kind), 12);
        log::debug!("Power-up {:?} collected", kind);
    }
}

/// Drop everything whose right edge has left the screen
fn remove_off_screen(state: &mut GameState) {
    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.rect.is_off_screen_left());
    state.obstacles_cleared += (before - state.obstacles.len()) as u32;

    state.platforms.retain(|p| !p.rect.is_off_screen_left());
    state.coins.retain(|c| c.pos.x + COIN_RADIUS >= 0.0);
    state.powerups.retain(|p| p.pos.x + POWERUP_RADIUS >= 0.0);
}

/// Scatter particles from a point, spread by an integer hash
fn spawn_burst(state: &mut GameState, center: Vec2, color: ParticleColor, count: u32) {
    let seed = state.time_ticks as u32;
    for i in 0..count {
        if state.particles.len() >= MAX_PARTICLES {
            // Remove oldest particles to make room
            state.particles.remove(0);
        }
        let hash = seed
            .wrapping_mul(2654435761)
            .wrapping_add(i.wrapping_mul(7919));
        let angle = (hash % 1000) as f32 / 1000.0 * std::f32::consts::TAU;
        let speed = 120.0 + (hash / 1000 % 200) as f32;
        let size = 3.0 + (hash / 100000 % 100) as f32 / 100.0 * 4.0;
        state.particles.push(Particle {
            pos: center,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            color,
            life: 1.0,
            size,
        });
    }
}

fn update_particles(state: &mut GameState, dt: f32) {
    for particle in state.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y += GRAVITY * 0.3 * dt;
        particle.vel *= 0.98;
        particle.life -= dt * 1.5;
    }
    state.particles.retain(|p| p.life > 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::PowerUpKind;
    use proptest::prelude::*;

    /// A state with nothing in the world
    fn empty_state() -> GameState {
        let mut state = GameState::new(12345);
        state.obstacles.clear();
        state.platforms.clear();
        state.coins.clear();
        state.powerups.clear();
        // Keep the generator quiet
        state.spawn_cursor = 1.0e6;
        state
    }

    fn run(state: &mut GameState, ticks: usize, input: &TickInput) {
        for _ in 0..ticks {
            tick(state, input, SIM_DT);
        }
    }

    #[test]
    fn test_jump_and_land() {
        let mut state = empty_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        assert!(!state.player.grounded);
        assert_eq!(state.player.jumps_used, 1);
        assert!(state.events.contains(&GameEvent::Jumped));

        // Rising, then back on the ground within a second
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.bottom() < GROUND_Y);
        run(&mut state, 120, &TickInput::default());
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), GROUND_Y);
        assert_eq!(state.player.jumps_used, 0);
        assert!(state.events.contains(&GameEvent::Landed));
    }

    #[test]
    fn test_double_jump_then_no_more() {
        let mut state = empty_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        run(&mut state, 10, &TickInput::default());
        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.player.jumps_used, 2);
        assert!(state.events.contains(&GameEvent::DoubleJumped));
        let vel_after_double = state.player.vel_y;

        // Third press does nothing
        tick(&mut state, &jump, SIM_DT);
        assert_eq!(state.player.jumps_used, 2);
        assert!(state.player.vel_y > vel_after_double);
    }

    #[test]
    fn test_jump_buffer() {
        let mut state = empty_state();
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        // Use both jumps
        tick(&mut state, &jump, SIM_DT);
        tick(&mut state, &jump, SIM_DT);
        // Fall until just above the ground
        while state.player.vel_y < 0.0 || state.player.bottom() < GROUND_Y - 8.0 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(!state.player.grounded);
        // Press while airborne with no jumps left; it fires after landing
        tick(&mut state, &jump, SIM_DT);
        run(&mut state, 3, &TickInput::default());
        assert_eq!(state.player.jumps_used, 1);
        assert!(state.player.vel_y < 0.0);
    }

    #[test]
    fn test_world_scrolls_and_distance_grows() {
        let mut state = empty_state();
        state.spawn_obstacle(ObstacleKind::Spike, Rect::on_surface(700.0, GROUND_Y, 30.0, 30.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        let x = state.obstacles[0].rect.left();
        assert!(x < 700.0);
        assert!((state.distance - (700.0 - x)).abs() < 1e-3);
    }

    #[test]
    fn test_speed_ramps_to_cap() {
        let mut state = empty_state();
        run(&mut state, 120, &TickInput::default());
        assert!(state.speed > BASE_SCROLL_SPEED);
        state.speed = MAX_SCROLL_SPEED;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.speed, MAX_SCROLL_SPEED);
    }

    #[test]
    fn test_spike_crash_then_game_over() {
        let mut state = empty_state();
        state.spawn_obstacle(
            ObstacleKind::Spike,
            Rect::on_surface(PLAYER_X + 5.0, GROUND_Y, 30.0, 30.0),
        );
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Crashed);
        assert!(state.events.contains(&GameEvent::Crashed));

        run(&mut state, crate::secs_to_ticks(CRASH_DURATION) as usize, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));

        // Nothing moves after game over
        let ticks = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_shield_absorbs_crash() {
        let mut state = empty_state();
        state.effects.apply(PowerUpKind::Shield);
        state.spawn_obstacle(
            ObstacleKind::Spike,
            Rect::on_surface(PLAYER_X + 5.0, GROUND_Y, 30.0, 30.0),
        );
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.effects.shield_active);
        assert!(state.obstacles.is_empty());
        assert!(state.events.contains(&GameEvent::ShieldBroken));
    }

    #[test]
    fn test_shield_grace_ignores_next_hazard() {
        let mut state = empty_state();
        state.effects.apply(PowerUpKind::Shield);
        // Two stacked spikes: the shield takes one, grace covers the other
        for _ in 0..2 {
            state.spawn_obstacle(
                ObstacleKind::Spike,
                Rect::on_surface(PLAYER_X + 5.0, GROUND_Y, 30.0, 30.0),
            );
        }
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.len(), 1);
        assert!(state.effects.grace_ticks > 0);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles.len(), 1);

        // Once grace runs out the same contact is fatal
        state.effects.grace_ticks = 0;
        state.spawn_obstacle(
            ObstacleKind::Spike,
            Rect::on_surface(PLAYER_X + 5.0, GROUND_Y, 30.0, 30.0),
        );
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::Crashed);
    }

    #[test]
    fn test_fall_speed_is_capped() {
        let mut state = empty_state();
        state.player.pos.y = 0.0;
        state.player.grounded = false;
        state.player.jumps_used = MAX_JUMPS;

        let mut max_vel = 0.0f32;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            max_vel = max_vel.max(state.player.vel_y);
            if state.player.grounded {
                break;
            }
        }
        assert!(state.player.grounded);
        assert_eq!(max_vel, MAX_FALL_SPEED);
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut state = empty_state();
        state.player.pos.y = 5.0;
        state.player.vel_y = -2000.0;
        state.player.grounded = false;
        state.player.jumps_used = 1;

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.pos.y, 0.0);
        assert_eq!(state.player.vel_y, 0.0);

        // Falls back down from there
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.player.pos.y > 0.0);
    }

    #[test]
    fn test_running_into_block_crashes() {
        let mut state = empty_state();
        state.spawn_obstacle(
            ObstacleKind::Block,
            Rect::on_surface(PLAYER_X + PLAYER_SIZE + 1.0, GROUND_Y, BLOCK_SIZE, BLOCK_SIZE),
        );
        run(&mut state, 10, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Crashed);
    }

    #[test]
    fn test_land_on_block_and_walk_off() {
        let mut state = empty_state();
        // Player hovering just above a block top, falling
        state.spawn_obstacle(
            ObstacleKind::Block,
            Rect::on_surface(PLAYER_X - 5.0, GROUND_Y, BLOCK_SIZE, BLOCK_SIZE),
        );
        state.player.pos.y = GROUND_Y - BLOCK_SIZE - PLAYER_SIZE - 2.0;
        state.player.grounded = false;
        state.player.jumps_used = 1;
        state.player.vel_y = 100.0;
        run(&mut state, 2, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), GROUND_Y - BLOCK_SIZE);

        // The block scrolls away; the player drops with only the air jump left
        let mut left_ground = false;
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if !state.player.grounded {
                left_ground = true;
                assert_eq!(state.player.jumps_used, 1);
                break;
            }
        }
        assert!(left_ground);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_land_on_platform() {
        let mut state = empty_state();
        let top = GROUND_Y - 100.0;
        state.spawn_platform(Rect::new(PLAYER_X - 50.0, top, 400.0, PLATFORM_THICKNESS));
        state.player.pos.y = top - PLAYER_SIZE - 1.0;
        state.player.grounded = false;
        state.player.jumps_used = 1;
        state.player.vel_y = 50.0;
        run(&mut state, 5, &TickInput::default());
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), top);
        // Stays put while the platform is under the player
        run(&mut state, 20, &TickInput::default());
        assert!(state.player.grounded);
        assert_eq!(state.player.bottom(), top);
    }

    #[test]
    fn test_platform_is_one_way() {
        let mut state = empty_state();
        let top = GROUND_Y - 60.0;
        state.spawn_platform(Rect::new(PLAYER_X - 50.0, top, 400.0, PLATFORM_THICKNESS));
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump, SIM_DT);
        // Jumps up through the platform from below
        let mut min_bottom = f32::MAX;
        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            min_bottom = min_bottom.min(state.player.bottom());
        }
        assert!(min_bottom < top);
    }

    #[test]
    fn test_coin_collection() {
        let mut state = empty_state();
        let center = state.player.rect().center();
        state.spawn_coin(center + Vec2::new(5.0, 0.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.coins.is_empty());
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.bonus, COIN_VALUE);
        assert!(state.events.contains(&GameEvent::CoinCollected));
    }

    #[test]
    fn test_magnet_pulls_coins() {
        let mut state = empty_state();
        state.effects.apply(PowerUpKind::Magnet);
        let center = state.player.rect().center();
        state.spawn_coin(center + Vec2::new(120.0, -80.0));
        run(&mut state, 30, &TickInput::default());
        assert_eq!(state.coins_collected, 1);
    }

    #[test]
    fn test_powerup_collection() {
        let mut state = empty_state();
        let center = state.player.rect().center();
        state.spawn_powerup(PowerUpKind::SlowMotion, center);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.powerups.is_empty());
        assert!(state.effects.slow_ticks > 0);
        assert!(
            state
                .events
                .contains(&GameEvent::PowerUpCollected(PowerUpKind::SlowMotion))
        );
        assert!(state.effective_speed() < state.speed);
    }

    #[test]
    fn test_off_screen_objects_removed() {
        let mut state = empty_state();
        state.spawn_obstacle(ObstacleKind::Spike, Rect::on_surface(-29.0, GROUND_Y, 30.0, 30.0));
        state.spawn_platform(Rect::new(-150.0, 300.0, 151.0, PLATFORM_THICKNESS));
        state.spawn_coin(Vec2::new(-9.0, 300.0));
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.obstacles.is_empty());
        assert!(state.platforms.is_empty());
        assert!(state.coins.is_empty());
        assert_eq!(state.obstacles_cleared, 1);
    }

    #[test]
    fn test_level_keeps_extending() {
        let mut state = GameState::new(777);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, SIM_DT);
            if state.phase != GamePhase::Playing {
                break;
            }
            assert!(state.spawn_cursor >= CANVAS_WIDTH + SPAWN_LOOKAHEAD);
        }
        assert!(state.distance > 0.0);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = empty_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let distance = state.distance;
        run(&mut state, 10, &TickInput::default());
        assert_eq!(state.distance, distance);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.distance > distance);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                jump: true,
                ..Default::default()
            },
            TickInput::default(),
            TickInput {
                idle_mode: true,
                ..Default::default()
            },
        ];

        for i in 0..900 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            presses in proptest::collection::vec(any::<bool>(), 1..400)
        ) {
            let mut state = GameState::new(2024);
            for jump in presses {
                let input = TickInput { jump, ..Default::default() };
                tick(&mut state, &input, SIM_DT);
                prop_assert!(state.player.bottom() <= GROUND_Y + 1e-3);
                prop_assert!(state.player.pos.y >= 0.0);
                prop_assert!(state.player.jumps_used <= MAX_JUMPS);
            }
        }
    }
}

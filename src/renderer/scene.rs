//! Frame building
//!
//! Turns the app state into one triangle list in canvas pixels. Text (title,
//! labels, HUD) lives in the DOM overlay, so only shapes are drawn here.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use crate::app::{App, BACK_BUTTON, PLAY_BUTTON, Screen, level_button};
use crate::consts::*;
use crate::level::LEVELS;
use crate::sim::{GamePhase, GameState, ObstacleKind, ParticleColor, PowerUpKind, Rect, Spike};
use crate::theme::{Theme, with_alpha};

/// Pixels of displacement at full shake
const SHAKE_AMPLITUDE: f32 = 8.0;
const BUTTON_OUTLINE: f32 = 3.0;
const BLOCK_OUTLINE: f32 = 2.0;
const PLAYER_OUTLINE: f32 = 3.0;

/// Build every vertex for the current screen
pub fn build_frame(app: &App) -> Vec<Vertex> {
    let theme = app.theme();
    let segments = app.settings.quality.circle_segments();
    let mut vertices = Vec::with_capacity(4096);

    vertices.extend(shapes::rect(
        &Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
        theme.background,
    ));

    match app.screen {
        Screen::Menu => {
            draw_ground(&mut vertices, theme);
            draw_button(&mut vertices, theme, &PLAY_BUTTON);
        }
        Screen::LevelSelect => {
            draw_ground(&mut vertices, theme);
            for i in 0..LEVELS.len() {
                draw_button(&mut vertices, theme, &level_button(i));
            }
            draw_button(&mut vertices, theme, &BACK_BUTTON);
        }
        Screen::Playing => {
            if let Some(game) = &app.game {
                let start = vertices.len();
                draw_world(&mut vertices, theme, game, segments, app.settings.max_particles());
                if app.settings.effective_screen_shake() {
                    let offset = shake_offset(game);
                    if offset != Vec2::ZERO {
                        translate(&mut vertices[start..], offset);
                    }
                }
            }
        }
    }

    vertices
}

/// Deterministic jitter from the tick counter
fn shake_offset(game: &GameState) -> Vec2 {
    if game.screen_shake <= 0.0 {
        return Vec2::ZERO;
    }
    let t = game.time_ticks as f32 + game.crash_ticks as f32;
    Vec2::new((t * 1.7).sin(), (t * 2.3).cos()) * game.screen_shake * SHAKE_AMPLITUDE
}

fn translate(vertices: &mut [Vertex], offset: Vec2) {
    for v in vertices {
        v.position[0] += offset.x;
        v.position[1] += offset.y;
    }
}

fn draw_ground(out: &mut Vec<Vertex>, theme: &Theme) {
    out.extend(shapes::rect(
        &Rect::new(0.0, GROUND_Y, CANVAS_WIDTH, CANVAS_HEIGHT - GROUND_Y),
        theme.ground,
    ));
    out.extend(shapes::rect(
        &Rect::new(0.0, GROUND_Y, CANVAS_WIDTH, 3.0),
        theme.ground_line,
    ));
}

fn draw_button(out: &mut Vec<Vertex>, theme: &Theme, rect: &Rect) {
    out.extend(shapes::rect(rect, theme.button));
    out.extend(shapes::rect_outline(rect, BUTTON_OUTLINE, theme.button_outline));
}

fn draw_world(
    out: &mut Vec<Vertex>,
    theme: &Theme,
    game: &GameState,
    segments: u32,
    max_particles: usize,
) {
    draw_ground(out, theme);

    for platform in &game.platforms {
        out.extend(shapes::rect(&platform.rect, theme.platform));
    }

    for obstacle in &game.obstacles {
        match obstacle.kind {
            ObstacleKind::Block => {
                out.extend(shapes::rect(&obstacle.rect, theme.block));
                out.extend(shapes::rect_outline(
                    &obstacle.rect,
                    BLOCK_OUTLINE,
                    theme.block_outline,
                ));
            }
            ObstacleKind::Spike => {
                let [apex, left, right] = Spike::new(obstacle.rect).vertices();
                out.extend(shapes::triangle(apex, left, right, theme.spike));
            }
        }
    }

    for coin in &game.coins {
        out.extend(shapes::circle(coin.pos, COIN_RADIUS, theme.coin, segments));
    }

    for powerup in &game.powerups {
        let color = powerup_color(theme, powerup.kind);
        out.extend(shapes::circle(powerup.pos, POWERUP_RADIUS - 4.0, color, segments));
        out.extend(shapes::ring(
            powerup.pos,
            POWERUP_RADIUS - 2.0,
            POWERUP_RADIUS,
            color,
            segments,
        ));
    }

    for particle in game.particles.iter().take(max_particles) {
        let color = with_alpha(particle_color(theme, particle.color), particle.life);
        let radius = (particle.size * particle.life).max(0.5);
        out.extend(shapes::circle(particle.pos, radius, color, segments.min(8)));
    }

    draw_player(out, theme, game, segments);
}

fn draw_player(out: &mut Vec<Vertex>, theme: &Theme, game: &GameState, segments: u32) {
    // The player bursts into particles on a crash
    if matches!(game.phase, GamePhase::Crashed | GamePhase::GameOver) {
        return;
    }

    let center = game.player.rect().center();
    let effects = &game.effects;

    if effects.magnet_ticks > 0 {
        out.extend(shapes::ring(
            center,
            MAGNET_RADIUS - 2.0,
            MAGNET_RADIUS,
            with_alpha(theme.magnet, 0.25),
            segments * 2,
        ));
    }

    // Blink during post-shield grace
    let blink_hidden = effects.grace_ticks > 0 && (effects.grace_ticks / 6) % 2 == 1;
    if !blink_hidden {
        let angle = game.player.rotation;
        out.extend(shapes::rotated_square(
            center,
            PLAYER_SIZE,
            angle,
            theme.player_outline,
        ));
        out.extend(shapes::rotated_square(
            center,
            PLAYER_SIZE - 2.0 * PLAYER_OUTLINE,
            angle,
            theme.player,
        ));
    }

    if effects.shield_active {
        let radius = PLAYER_SIZE * 0.8;
        out.extend(shapes::ring(
            center,
            radius - 3.0,
            radius,
            with_alpha(theme.shield, 0.8),
            segments,
        ));
    }
}

pub fn powerup_color(theme: &Theme, kind: PowerUpKind) -> [f32; 4] {
    match kind {
        PowerUpKind::Shield => theme.shield,
        PowerUpKind::Magnet => theme.magnet,
        PowerUpKind::SlowMotion => theme.slow_motion,
        PowerUpKind::DoubleScore => theme.double_score,
    }
}

fn particle_color(theme: &Theme, color: ParticleColor) -> [f32; 4] {
    match color {
        ParticleColor::Player => theme.player,
        ParticleColor::Coin => theme.coin,
        ParticleColor::Shield => theme.shield,
        ParticleColor::PowerUp(kind) => powerup_color(theme, kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Particle;

    fn playing_app(settings: Settings) -> App {
        let mut app = App::new(settings, 5);
        assert!(app.start_level(0));
        app
    }

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_menu_draws_play_button() {
        let app = App::new(Settings::default(), 1);
        let vertices = build_frame(&app);
        assert_eq!(vertices.len() % 3, 0);
        assert!(has_color(&vertices, app.theme().button));
        // Button vertices stay inside the PLAY rect
        let inside = vertices
            .iter()
            .filter(|v| v.color == app.theme().button)
            .all(|v| PLAY_BUTTON.contains(Vec2::new(v.position[0], v.position[1])));
        assert!(inside);
    }

    #[test]
    fn test_level_select_draws_level_and_back_buttons() {
        let mut app = App::new(Settings::default(), 1);
        app.screen = Screen::LevelSelect;
        let vertices = build_frame(&app);
        let button = app.theme().button;
        let count = vertices.iter().filter(|v| v.color == button).count();
        // One quad per level plus BACK
        assert_eq!(count, 6 * (LEVELS.len() + 1));
    }

    #[test]
    fn test_play_frame_draws_spikes_and_player() {
        let mut app = playing_app(Settings::default());
        let game = app.game.as_mut().unwrap();
        game.spawn_obstacle(
            ObstacleKind::Spike,
            Rect::on_surface(400.0, GROUND_Y, SPIKE_WIDTH, SPIKE_HEIGHT),
        );
        let vertices = build_frame(&app);
        let theme = app.theme();
        assert!(has_color(&vertices, theme.spike));
        assert!(has_color(&vertices, theme.player));
    }

    #[test]
    fn test_particles_respect_cap() {
        let settings = Settings {
            particles: false,
            ..Default::default()
        };
        let mut app = playing_app(settings);
        let game = app.game.as_mut().unwrap();
        game.particles.push(Particle {
            pos: Vec2::new(300.0, 300.0),
            vel: Vec2::ZERO,
            color: ParticleColor::Coin,
            life: 0.5,
            size: 4.0,
        });
        let faded = with_alpha(app.theme().coin, 0.5);
        assert!(!has_color(&build_frame(&app), faded));

        app.settings.particles = true;
        assert!(has_color(&build_frame(&app), faded));
    }

    #[test]
    fn test_reduced_motion_disables_shake() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let mut app = playing_app(settings);
        app.game.as_mut().unwrap().screen_shake = 1.0;
        let ground_line = app.theme().ground_line;
        let vertices = build_frame(&app);
        assert!(
            vertices
                .iter()
                .filter(|v| v.color == ground_line)
                .all(|v| v.position[1] == GROUND_Y || v.position[1] == GROUND_Y + 3.0)
        );
    }

    #[test]
    fn test_player_hidden_after_crash() {
        let mut app = playing_app(Settings::default());
        app.game.as_mut().unwrap().phase = GamePhase::GameOver;
        assert!(!has_color(&build_frame(&app), app.theme().player));
    }
}

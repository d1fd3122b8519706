//! Idle/demo mode player
//!
//! Looks a little way ahead of the player and jumps over whatever is
//! dangerous. Good enough for an attract loop and for soak tests, not a
//! perfect player.

use super::geometry::Rect;
use super::state::{GameState, ObstacleKind};
use crate::consts::*;

/// Seconds of travel the bot looks ahead before taking off
const REACTION_TIME: f32 = 0.16;

/// Should the bot press jump this tick?
pub fn autopilot_jump(state: &GameState) -> bool {
    let player = &state.player;
    let rect = player.rect();
    let lookahead = state.effective_speed() * REACTION_TIME;

    if player.grounded {
        return state
            .obstacles
            .iter()
            .any(|o| {
                is_dangerous(o.kind, &o.rect, &rect)
                    && leading_edge_within(&o.rect, &rect, lookahead)
            });
    }

    // Falling toward a hazard: spend the air jump
    if player.vel_y > 0.0 && player.can_jump() {
        let below = Rect::new(
            rect.left(),
            rect.top(),
            rect.width() + lookahead,
            GROUND_Y - rect.top(),
        );
        return state
            .obstacles
            .iter()
            .any(|o| o.kind == ObstacleKind::Spike && o.rect.overlaps(&below));
    }

    false
}

/// Spikes always; blocks only when they stand taller than the player's feet
fn is_dangerous(kind: ObstacleKind, obstacle: &Rect, player: &Rect) -> bool {
    match kind {
        ObstacleKind::Spike => obstacle.top() < player.bottom(),
        ObstacleKind::Block => obstacle.top() < player.bottom() - 1.0,
    }
}

fn leading_edge_within(obstacle: &Rect, player: &Rect, lookahead: f32) -> bool {
    let gap = obstacle.left() - player.right();
    (0.0..=lookahead).contains(&gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, TickInput, tick};

    fn empty_state() -> GameState {
        let mut state = GameState::new(5);
        state.obstacles.clear();
        state.platforms.clear();
        state.coins.clear();
        state.powerups.clear();
        state.spawn_cursor = 1.0e6;
        state
    }

    #[test]
    fn test_jumps_for_near_spike() {
        let mut state = empty_state();
        state.spawn_obstacle(
            ObstacleKind::Spike,
            Rect::on_surface(PLAYER_X + PLAYER_SIZE + 20.0, GROUND_Y, SPIKE_WIDTH, SPIKE_HEIGHT),
        );
        assert!(autopilot_jump(&state));
    }

    #[test]
    fn test_ignores_far_spike() {
        let mut state = empty_state();
        state.spawn_obstacle(
            ObstacleKind::Spike,
            Rect::on_surface(PLAYER_X + 400.0, GROUND_Y, SPIKE_WIDTH, SPIKE_HEIGHT),
        );
        assert!(!autopilot_jump(&state));
    }

    #[test]
    fn test_clears_single_spike() {
        let mut state = empty_state();
        state.spawn_obstacle(
            ObstacleKind::Spike,
            Rect::on_surface(PLAYER_X + 300.0, GROUND_Y, SPIKE_WIDTH, SPIKE_HEIGHT),
        );
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..240 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.obstacles_cleared, 1);
    }
}

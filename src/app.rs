//! Screen flow and the fixed-timestep driver
//!
//! Menu → level select → play. The platform layer forwards clicks (in
//! logical canvas pixels), keys and frame deltas here; everything below is
//! platform independent.

use glam::Vec2;

use crate::consts::*;
use crate::highscores::{HighScores, RunRecord};
use crate::level::{LEVELS, level};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Rect, TickInput, tick};
use crate::theme::{Theme, ThemeId};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    LevelSelect,
    Playing,
}

/// Platform-neutral keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Space / Enter / Up
    Jump,
    /// P
    Pause,
    /// Escape
    Back,
    /// R
    Restart,
    /// I - demo mode
    ToggleIdle,
}

/// PLAY on the title screen
pub const PLAY_BUTTON: Rect = Rect::new(300.0, 350.0, 200.0, 50.0);
/// BACK on the level select screen
pub const BACK_BUTTON: Rect = Rect::new(300.0, 480.0, 200.0, 40.0);

/// Level select button for level `index`
pub fn level_button(index: usize) -> Rect {
    Rect::new(300.0, 250.0 + 70.0 * index as f32, 200.0, 50.0)
}

/// Golden-ratio stride between run seeds
const SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct App {
    pub screen: Screen,
    pub settings: Settings,
    pub selected_level: usize,
    /// Palette of the selected level
    pub level_theme: ThemeId,
    /// Current run (only while playing)
    pub game: Option<GameState>,
    /// Session leaderboard
    pub highscores: HighScores,
    /// Rank of the last finished run, if it made the board
    pub last_rank: Option<usize>,
    base_seed: u64,
    runs_started: u64,
    accumulator: f32,
    input: TickInput,
    events: Vec<GameEvent>,
}

impl App {
    pub fn new(settings: Settings, base_seed: u64) -> Self {
        Self {
            screen: Screen::Menu,
            settings,
            selected_level: 0,
            level_theme: ThemeId::Default,
            game: None,
            highscores: HighScores::new(),
            last_rank: None,
            base_seed,
            runs_started: 0,
            accumulator: 0.0,
            input: TickInput::default(),
            events: Vec::new(),
        }
    }

    /// Palette in effect (settings override the level)
    pub fn theme(&self) -> &'static Theme {
        Theme::get(self.settings.theme.unwrap_or(self.level_theme))
    }

    pub fn idle_mode(&self) -> bool {
        self.input.idle_mode
    }

    pub fn is_game_over(&self) -> bool {
        self.game.as_ref().is_some_and(|g| g.is_over())
    }

    /// Seed for the next run; fixed when configured
    fn next_seed(&mut self) -> u64 {
        let seed = self.settings.seed.unwrap_or_else(|| {
            self.base_seed
                .wrapping_add(self.runs_started.wrapping_mul(SEED_STRIDE))
        });
        self.runs_started += 1;
        seed
    }

    /// Begin a run of `index`; returns false for an unknown level
    pub fn start_level(&mut self, index: usize) -> bool {
        let Some(lvl) = level(index) else {
            log::warn!("No level {index}");
            return false;
        };
        let seed = self.next_seed();
        self.selected_level = index;
        self.level_theme = lvl.theme;
        self.game = Some(GameState::new(seed));
        self.screen = Screen::Playing;
        self.last_rank = None;
        self.reset_loop();
        log::info!("Starting \"{}\" with seed {}", lvl.name, seed);
        true
    }

    pub fn restart(&mut self) {
        self.start_level(self.selected_level);
    }

    pub fn back_to_menu(&mut self) {
        self.game = None;
        self.screen = Screen::Menu;
        self.reset_loop();
    }

    fn reset_loop(&mut self) {
        self.accumulator = 0.0;
        self.input = TickInput {
            idle_mode: self.input.idle_mode,
            ..Default::default()
        };
    }

    /// Handle a click/tap at logical canvas coordinates.
    /// Returns true when the click did something.
    pub fn handle_click(&mut self, pos: Vec2) -> bool {
        match self.screen {
            Screen::Menu => {
                if PLAY_BUTTON.contains(pos) {
                    self.screen = Screen::LevelSelect;
                    return true;
                }
                false
            }
            Screen::LevelSelect => {
                if let Some(index) = (0..LEVELS.len()).find(|&i| level_button(i).contains(pos)) {
                    return self.start_level(index);
                }
                if BACK_BUTTON.contains(pos) {
                    self.screen = Screen::Menu;
                    return true;
                }
                false
            }
            Screen::Playing => {
                if self.is_game_over() {
                    self.restart();
                } else {
                    self.input.jump = true;
                }
                true
            }
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        match (self.screen, key) {
            (Screen::Menu, Key::Jump) => self.screen = Screen::LevelSelect,
            (Screen::LevelSelect, Key::Jump) => {
                self.start_level(self.selected_level);
            }
            (Screen::LevelSelect, Key::Back) => self.screen = Screen::Menu,
            (Screen::Playing, Key::Jump) => {
                if self.is_game_over() {
                    self.restart();
                } else {
                    self.input.jump = true;
                }
            }
            (Screen::Playing, Key::Pause) => self.input.pause = true,
            (Screen::Playing, Key::Restart) => self.restart(),
            (Screen::Playing, Key::Back) => self.back_to_menu(),
            (_, Key::ToggleIdle) => {
                self.input.idle_mode = !self.input.idle_mode;
                log::info!("Idle mode: {}", self.input.idle_mode);
            }
            _ => {}
        }
    }

    /// Pause a live run (window blur, tab hidden)
    pub fn auto_pause(&mut self) {
        if let Some(game) = &self.game {
            if game.phase == GamePhase::Playing {
                self.input.pause = true;
                log::info!("Auto-paused");
            }
        }
    }

    /// Run simulation ticks for a frame; returns the number of ticks run
    pub fn update(&mut self, frame_dt: f32) -> u32 {
        if self.screen != Screen::Playing {
            return 0;
        }
        let Some(game) = self.game.as_mut() else {
            return 0;
        };

        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let was_over = game.is_over();
            tick(game, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.pause = false;

            self.events.extend(game.drain_events());

            if !was_over && game.is_over() {
                self.last_rank = self.highscores.record(RunRecord::from_state(game));
                if let Some(rank) = self.last_rank {
                    log::info!("New session high score #{rank}: {}", game.score);
                }
            }
        }

        // Drop backlog we couldn't simulate
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        substeps
    }

    /// Put a run that is still going on the board (crashed runs are
    /// recorded as they end). Returns the rank it took.
    pub fn record_current_run(&mut self) -> Option<usize> {
        let game = self.game.as_ref().filter(|g| !g.is_over())?;
        self.highscores.record(RunRecord::from_state(game))
    }

    /// Take events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

//! Geo Tax Flash 2 entry point
//!
//! Handles platform-specific initialization and runs the game loop. The web
//! build draws with WebGPU and overlays text in the DOM; the native build is a
//! headless runner that plays the level with the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Full `class` value for an overlay element: its base classes, plus
/// `hidden` when it should not show.
#[cfg(any(target_arch = "wasm32", test))]
fn overlay_class(base: &str, visible: bool) -> String {
    match (base.is_empty(), visible) {
        (_, true) => base.to_string(),
        (true, false) => "hidden".to_string(),
        (false, false) => format!("{base} hidden"),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use geo_tax_flash::audio::{AudioManager, SoundEffect};
    use geo_tax_flash::consts::*;
    use geo_tax_flash::level::LEVELS;
    use geo_tax_flash::renderer::{RenderState, build_frame};
    use geo_tax_flash::sim::{GameEvent, GamePhase};
    use geo_tax_flash::{App, Key, Screen, Settings};

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Show or hide `id`, keeping the base classes it has in index.html
    fn set_visible(document: &Document, id: &str, base: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", &super::overlay_class(base, visible));
        }
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    /// Game instance holding all state
    struct Game {
        app: App,
        render_state: Option<RenderState>,
        audio: AudioManager,
        last_time: f64,
        /// Canvas pixels per CSS pixel
        dpr: f32,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let audio = AudioManager::new(settings.sfx_volume);
            Self {
                app: App::new(settings, seed),
                render_state: None,
                audio,
                last_time: 0.0,
                dpr: 1.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Click or tap at CSS pixel offsets within the canvas
        fn pointer_down(&mut self, css_x: f32, css_y: f32) {
            self.audio.resume();
            let Some(render_state) = &self.render_state else {
                return;
            };
            let surface = glam::Vec2::new(css_x, css_y) * self.dpr;
            let pos = render_state.viewport.surface_to_canvas(surface);
            let screen = self.app.screen;
            if self.app.handle_click(pos) && screen != Screen::Playing {
                self.audio.play(SoundEffect::Click);
            }
        }

        fn key_down(&mut self, key: Key) {
            self.audio.resume();
            let screen = self.app.screen;
            self.app.handle_key(key);
            if screen != self.app.screen && self.app.screen != Screen::Playing {
                self.audio.play(SoundEffect::Click);
            }
        }

        /// Run simulation ticks and voice what happened
        fn update(&mut self, dt: f32, time: f64) {
            self.app.update(dt);

            for event in self.app.drain_events() {
                self.audio.play_event(event);
                if event == GameEvent::GameOver && self.app.last_rank == Some(1) {
                    self.audio.play(SoundEffect::HighScore);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_frame(&self.app);
            let clear = self.app.theme().background;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices, clear) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD and overlay elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else { return };
            let app = &self.app;

            set_visible(&document, "menu", "overlay", app.screen == Screen::Menu);
            set_visible(
                &document,
                "level-select",
                "overlay",
                app.screen == Screen::LevelSelect,
            );
            set_visible(&document, "hud", "", app.screen == Screen::Playing);
            set_visible(&document, "idle-badge", "", app.idle_mode());

            let Some(game) = app.game.as_ref().filter(|_| app.screen == Screen::Playing) else {
                set_visible(&document, "pause-menu", "panel", false);
                set_visible(&document, "game-over", "panel", false);
                return;
            };

            set_text(&document, "#hud-score .hud-value", &game.score.to_string());
            set_text(&document, "#hud-coins .hud-value", &game.coins_collected.to_string());
            set_text(
                &document,
                "#hud-distance .hud-value",
                &format!("{}m", (game.distance / DISTANCE_PER_POINT) as u64),
            );

            set_visible(&document, "hud-fps", "hud-item", app.settings.show_fps);
            if app.settings.show_fps {
                set_text(&document, "#hud-fps .hud-value", &self.fps.to_string());
            }

            // Active power-ups with seconds left
            let effects = &game.effects;
            let mut active = Vec::new();
            if effects.shield_active {
                active.push("SHIELD".to_string());
            }
            for (label, ticks) in [
                ("MAGNET", effects.magnet_ticks),
                ("SLOW", effects.slow_ticks),
                ("x2", effects.double_score_ticks),
            ] {
                if ticks > 0 {
                    active.push(format!("{label} {:.0}s", (ticks as f32 * SIM_DT).ceil()));
                }
            }
            set_text(&document, "#hud-powerups", &active.join("  "));

            set_visible(&document, "pause-menu", "panel", game.phase == GamePhase::Paused);

            let over = game.phase == GamePhase::GameOver;
            set_visible(&document, "game-over", "panel", over);
            if over {
                set_text(&document, "#final-score", &game.score.to_string());
                set_text(
                    &document,
                    "#final-distance",
                    &format!("{}m", (game.distance / DISTANCE_PER_POINT) as u64),
                );
                set_text(&document, "#final-coins", &game.coins_collected.to_string());
                if let Some(best) = app.highscores.best() {
                    set_text(
                        &document,
                        "#final-best",
                        &format!("{} ({}m)", best.score, best.meters()),
                    );
                }
                set_visible(&document, "new-best", "", app.last_rank == Some(1));
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            if let Some(render_state) = &mut self.render_state {
                render_state.resize(width, height);
            }
        }
    }

    /// Size the canvas backing store to its CSS box
    fn fit_canvas(canvas: &HtmlCanvasElement, dpr: f64) -> (u32, u32) {
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Geo Tax Flash 2 starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Settings come from the URL query (?seed=42&theme=geo&fps=true)
        let mut settings = Settings::default();
        let query = window.location().search().unwrap_or_default();
        if let Err(e) = settings.apply_query(&query) {
            log::warn!("Ignoring bad settings in query: {e}");
            settings = Settings::default();
        }

        // Hide loading indicator
        set_visible(&document, "loading", "overlay", false);

        for (i, level) in LEVELS.iter().enumerate() {
            set_text(&document, &format!("#level-{i}"), level.name);
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let (width, height) = fit_canvas(&canvas, dpr);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        game.borrow_mut().dpr = dpr as f32;
        log::info!("Game initialized with seed: {}", seed);

        let render_state =
            RenderState::init(wgpu::SurfaceTarget::Canvas(canvas.clone()), width, height)
                .await
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_overlay_buttons(&document, game.clone());
        setup_auto_pause(&window, &document, game.clone());
        setup_resize(&window, canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Geo Tax Flash 2 running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut()
                    .pointer_down(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let y = touch.client_y() as f32 - rect.top() as f32;
                    game.borrow_mut().pointer_down(x, y);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = match event.key().as_str() {
                    " " | "Enter" | "ArrowUp" | "w" | "W" => Key::Jump,
                    "p" | "P" => Key::Pause,
                    "Escape" => Key::Back,
                    "r" | "R" => Key::Restart,
                    "i" | "I" => Key::ToggleIdle,
                    _ => return,
                };
                // Keep space and arrows from scrolling the page
                event.prevent_default();
                if event.repeat() && key != Key::Jump {
                    return;
                }
                game.borrow_mut().key_down(key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_overlay_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let buttons: [(&str, Key); 3] = [
            ("resume-btn", Key::Pause),
            ("restart-btn", Key::Restart),
            ("menu-btn", Key::Back),
        ];
        for (id, key) in buttons {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.stop_propagation();
                    game.borrow_mut().key_down(key);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().app.auto_pause();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.app.auto_pause();
                if g.app.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus back
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let (width, height) = fit_canvas(&canvas, dpr);
            let mut g = game.borrow_mut();
            g.dpr = dpr as f32;
            g.resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clap::Parser;

    use geo_tax_flash::consts::*;
    use geo_tax_flash::sim::GameEvent;
    use geo_tax_flash::{App, Key, Settings};

    /// Play the level with the autopilot and report how the runs went
    #[derive(Parser, Debug)]
    #[command(name = "geo-tax-flash", version, about)]
    pub struct Args {
        /// Base seed (runs use successive seeds from it)
        #[arg(long, default_value_t = 1)]
        pub seed: u64,

        /// Number of runs to play
        #[arg(long, default_value_t = 1)]
        pub runs: u32,

        /// Give up on a run after this many simulated seconds
        #[arg(long, default_value_t = 120.0)]
        pub seconds: f32,

        /// Settings as a query string, e.g. "quality=low&theme=geo"
        #[arg(long, default_value = "")]
        pub settings: String,

        /// Print the final state of the last run as JSON
        #[arg(long)]
        pub dump_state: bool,
    }

    pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
        let mut settings = Settings::default();
        settings.apply_query(&args.settings)?;

        let mut app = App::new(settings, args.seed);
        app.handle_key(Key::ToggleIdle);

        let max_ticks = (args.seconds / SIM_DT).ceil() as u64;
        for run in 0..args.runs {
            if !app.start_level(0) {
                return Err("no playable level".into());
            }

            let mut jumps = 0u32;
            let mut ticks = 0u64;
            while !app.is_game_over() && ticks < max_ticks {
                ticks += u64::from(app.update(SIM_DT));
                jumps += app
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::Jumped | GameEvent::DoubleJumped))
                    .count() as u32;
            }

            // Runs that outlast the time limit still count for the session best
            let survived = !app.is_game_over();
            if survived {
                app.record_current_run();
            }

            let Some(game) = app.game.as_ref() else {
                continue;
            };
            let outcome = if survived { "survived" } else { "crashed" };
            log::info!(
                "Run {} (seed {}): {} after {:.1}s, score {}, distance {:.0}, coins {}, jumps {}",
                run + 1,
                game.seed,
                outcome,
                game.time_ticks as f32 * SIM_DT,
                game.score,
                game.distance,
                game.coins_collected,
                jumps,
            );
        }

        if let Some(best) = app.highscores.best() {
            log::info!(
                "Best run this session: score {}, distance {}m, coins {}",
                best.score,
                best.meters(),
                best.coins
            );
        }

        if args.dump_state {
            if let Some(game) = &app.game {
                println!("{}", serde_json::to_string_pretty(game)?);
            }
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Geo Tax Flash 2 (native, headless) starting...");

    let args = headless::Args::parse();
    if let Err(e) = headless::run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_class_keeps_base_classes() {
        assert_eq!(overlay_class("overlay", true), "overlay");
        assert_eq!(overlay_class("overlay", false), "overlay hidden");
        assert_eq!(overlay_class("panel", false), "panel hidden");
        assert_eq!(overlay_class("", true), "");
        assert_eq!(overlay_class("", false), "hidden");
    }

    #[test]
    fn test_overlay_bases_match_page() {
        let page = include_str!("../index.html");
        for (id, base) in [
            ("menu", "overlay"),
            ("level-select", "overlay"),
            ("loading", "overlay"),
            ("pause-menu", "panel"),
            ("game-over", "panel"),
            ("hud-fps", "hud-item"),
        ] {
            let start = page.find(&format!("id=\"{id}\"")).unwrap();
            let tag_end = start + page[start..].find('>').unwrap();
            let tag = &page[start..tag_end];
            assert!(tag.contains(&format!("class=\"{base}")), "{id}: {tag}");
        }
    }
}

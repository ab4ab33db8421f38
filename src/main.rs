//! Neon Dash entry point
//!
//! In the browser: wires the DOM to a `Session` and drives it from
//! `requestAnimationFrame`. Natively: runs one headless autopilot game and
//! writes the leaderboard to a JSON file.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use neon_dash::highscores::HighScores;
    use neon_dash::persistence::{LocalStorage, MemoryStorage, Storage};
    use neon_dash::platform::{Command, SystemClock};
    use neon_dash::renderer::Canvas2d;
    use neon_dash::session::Screen;
    use neon_dash::{Session, SessionUi, Tuning};

    /// Session hooks backed by DOM elements. Missing elements are skipped.
    struct DomUi {
        document: Document,
    }

    impl DomUi {
        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.element(id) {
                let classes = el.class_list();
                let _ = if hidden {
                    classes.add_1("hidden")
                } else {
                    classes.remove_1("hidden")
                };
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        /// Rebuild a `<ol>` of rank / name / score rows
        fn fill_scores(&self, id: &str, scores: &HighScores) {
            let Some(list) = self.element(id) else {
                return;
            };
            list.set_text_content(None);
            for (index, entry) in scores.entries().iter().enumerate() {
                let Ok(item) = self.document.create_element("li") else {
                    continue;
                };
                let rank = format!("{}.", index + 1);
                let score = entry.score.to_string();
                for (class, text) in [
                    ("rank", rank.as_str()),
                    ("name", entry.name.as_str()),
                    ("score", score.as_str()),
                ] {
                    if let Ok(span) = self.document.create_element("span") {
                        span.set_class_name(class);
                        span.set_text_content(Some(text));
                        let _ = item.append_child(&span);
                    }
                }
                let _ = list.append_child(&item);
            }
        }

        fn name_input(&self) -> Option<HtmlInputElement> {
            self.element("player-name")?.dyn_into().ok()
        }
    }

    impl SessionUi for DomUi {
        fn show_name_form(&mut self) {
            self.set_hidden("canvas", true);
            self.set_hidden("controls", true);
            self.set_hidden("player-form", false);
            if let Some(input) = self.name_input() {
                input.set_value("");
                let _ = input.focus();
            }
        }

        fn show_playfield(&mut self) {
            self.set_hidden("player-form", true);
            self.set_hidden("canvas", false);
            self.set_hidden("controls", false);
        }

        fn show_game_over(&mut self, score: u64, scores: &HighScores) {
            self.set_text("final-score", &format!("Your Score: {}", score));
            self.fill_scores("game-over-scores", scores);
            self.set_hidden("game-over", false);
        }

        fn hide_game_over(&mut self) {
            self.set_hidden("game-over", true);
        }

        fn set_score(&mut self, score: u64) {
            self.set_text("score", &format!("Score: {}", score));
        }

        fn set_player_name(&mut self, name: &str) {
            self.set_text("current-player", name);
        }

        fn set_high_scores(&mut self, scores: &HighScores) {
            self.fill_scores("high-scores-list", scores);
            self.fill_scores("game-over-scores", scores);
        }

        fn set_start_visible(&mut self, visible: bool) {
            self.set_hidden("start-button", !visible);
        }
    }

    type WebSession = Session<Box<dyn Storage>, DomUi>;

    struct App {
        session: WebSession,
        canvas: Canvas2d,
        /// A frame callback is pending
        loop_active: bool,
    }

    impl App {
        fn redraw(&mut self) {
            let App {
                session, canvas, ..
            } = self;
            session.render(canvas);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Neon Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let element: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;
        let canvas = Canvas2d::from_canvas(&element).ok_or("no 2d context")?;

        let tuning = Tuning::default();
        element.set_width(tuning.width as u32);
        element.set_height(tuning.height as u32);

        let storage: Box<dyn Storage> = match LocalStorage::open() {
            Some(storage) => Box::new(storage),
            None => {
                log::warn!("LocalStorage unavailable, scores will not persist");
                Box::new(MemoryStorage::new())
            }
        };

        let seed = js_sys::Date::now() as u64;
        let ui = DomUi {
            document: document.clone(),
        };
        let session = Session::new(storage, ui, Box::new(SystemClock), seed, tuning);
        log::info!("Session ready (seed {})", seed);

        let app = Rc::new(RefCell::new(App {
            session,
            canvas,
            loop_active: false,
        }));

        setup_keyboard(&document, app.clone())?;
        setup_canvas_click(&element, app.clone())?;
        setup_buttons(&document, app)?;
        Ok(())
    }

    /// Start the frame loop unless one is already scheduled
    fn ensure_loop(app: &Rc<RefCell<App>>) {
        let start = {
            let mut a = app.borrow_mut();
            let start = a.session.state().is_running() && !a.loop_active;
            if start {
                a.loop_active = true;
            }
            start
        };
        if start {
            request_animation_frame(app.clone());
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One display frame: tick, draw, reschedule while running
    fn game_loop(app: Rc<RefCell<App>>) {
        let keep_going = {
            let mut a = app.borrow_mut();
            let keep_going = a.session.tick();
            a.redraw();
            if !keep_going {
                a.loop_active = false;
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(app);
        }
    }

    /// Run `f` on the session, then kick the loop if a run began
    fn with_session(app: &Rc<RefCell<App>>, f: impl FnOnce(&mut WebSession)) {
        {
            let mut a = app.borrow_mut();
            f(&mut a.session);
            if !a.loop_active {
                a.redraw();
            }
        }
        ensure_loop(app);
    }

    fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let code = event.code();
            let screen = app.borrow().session.screen();

            if code == "Enter" && screen == Screen::NameForm {
                let ui_name = app.borrow().session.ui().name_input().map(|i| i.value());
                with_session(&app, |s| s.submit_name(&ui_name.unwrap_or_default()));
                return;
            }

            if let Some(command) = Command::from_key_code(&code) {
                if command == Command::Fire && screen != Screen::NameForm {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }
                with_session(&app, |s| s.handle_command(command));
            }
        });
        document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_canvas_click(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            with_session(&app, |s| s.handle_command(Command::from_click()));
        });
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn on_click(
        document: &Document,
        id: &str,
        app: Rc<RefCell<App>>,
        action: fn(&mut WebSession, &DomUiName),
    ) -> Result<(), JsValue> {
        let Some(button) = document.get_element_by_id(id) else {
            log::warn!("Missing #{}", id);
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let name = DomUiName(app.borrow().session.ui().name_input().map(|i| i.value()));
            with_session(&app, |s| action(s, &name));
        });
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Contents of the name field at click time
    struct DomUiName(Option<String>);

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        on_click(document, "start-button", app.clone(), |s, _| s.start_run())?;
        on_click(document, "submit-name", app.clone(), |s, name| {
            s.submit_name(name.0.as_deref().unwrap_or_default())
        })?;
        on_click(document, "play-again", app.clone(), |s, _| s.play_again())?;
        on_click(document, "new-player", app, |s, _| s.new_player())?;
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use anyhow::{Context, Result};
    use neon_dash::consts::FRAMES_PER_SECOND;
    use neon_dash::persistence::FileStorage;
    use neon_dash::platform::{Autopilot, SystemClock};
    use neon_dash::renderer::RecordingCanvas;
    use neon_dash::session::NullUi;
    use neon_dash::{QualityPreset, Session, Settings, Tuning};

    #[derive(clap::Parser, Debug)]
    #[command(name = "neon-dash")]
    #[command(about = "Headless Neon Dash run driven by the autopilot")]
    pub struct Cli {
        /// JSON file holding the high-score table and settings
        #[arg(long, default_value = "neon_dash_scores.json")]
        pub scores: PathBuf,
        /// Run seed (defaults to the current time)
        #[arg(long)]
        pub seed: Option<u64>,
        /// Pace the run at 60 frames per second
        #[arg(long)]
        pub realtime: bool,
        /// Partial tuning document overriding the default balance
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Quality preset to apply and persist (low, medium, high)
        #[arg(long, value_parser = parse_quality)]
        pub quality: Option<QualityPreset>,
        /// Stop the run after this many frames (ten minutes of game time)
        #[arg(long, default_value_t = 10 * 60 * FRAMES_PER_SECOND as u64)]
        pub max_ticks: u64,
    }

    fn parse_quality(raw: &str) -> Result<QualityPreset, String> {
        QualityPreset::parse(raw)
            .ok_or_else(|| format!("unknown quality '{raw}'. expected low, medium or high"))
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        Tuning::from_json(&raw).with_context(|| format!("parsing tuning file {}", path.display()))
    }

    pub fn run(cli: Cli) -> Result<()> {
        let tuning = load_tuning(cli.tuning.as_ref())?;
        let seed = cli.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

        log::info!("Neon Dash (native) starting...");
        log::info!(
            "Headless autopilot run, seed {}, scores in {}",
            seed,
            cli.scores.display()
        );

        let mut session = Session::new(
            FileStorage::new(&cli.scores),
            NullUi,
            Box::new(SystemClock),
            seed,
            tuning,
        );
        if let Some(preset) = cli.quality {
            log::info!("Quality preset: {}", preset.as_str());
            session.set_settings(Settings::from_preset(preset));
        }
        session.submit_name("Autopilot");
        session.start_run();

        let pilot = Autopilot::default();
        let mut canvas = RecordingCanvas::default();
        let frame = Duration::from_secs(1) / FRAMES_PER_SECOND;
        let mut ticks = 0;

        while ticks < cli.max_ticks {
            let started = Instant::now();
            if let Some(command) = pilot.decide(session.state()) {
                session.handle_command(command);
            }
            let running = session.tick();
            session.render(&mut canvas);
            ticks += 1;
            if !running {
                break;
            }
            if cli.realtime {
                std::thread::sleep(frame.saturating_sub(started.elapsed()));
            }
        }

        if session.state().is_running() {
            log::info!("Tick limit reached, stopping run");
            session.stop();
        }

        println!(
            "Run ended after {} ticks with score {} ({} shapes in the last frame)",
            ticks,
            session.state().score(),
            canvas.fill_count()
        );
        println!("\nHigh scores:");
        for (index, entry) in session.high_scores().entries().iter().enumerate() {
            println!(
                "{:>2}. {:<16} {:>6}  {}",
                index + 1,
                entry.name,
                entry.score,
                entry.timestamp
            );
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    native::run(native::Cli::parse())
}

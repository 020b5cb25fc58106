//! Gate Glider entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, KeyboardEvent, TouchEvent,
    };

    use gate_glider::audio::AudioManager;
    use gate_glider::consts::SPAWN_INTERVAL_MS;
    use gate_glider::highscore::BestScore;
    use gate_glider::settings::Settings;
    use gate_glider::sim::{
        BackdropCue, GameEvent, GameMode, GameState, Playfield, Snapshot, spawn_gate, tick,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        best: BestScore,
        settings: Settings,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        video: Option<HtmlVideoElement>,
    }

    impl Game {
        /// One animation frame: advance the sim, carry out its queued
        /// requests, redraw
        fn frame(&mut self) {
            let snapshot = tick(&mut self.state);
            self.apply_events();
            self.draw(&snapshot);
        }

        /// Carry out the side-effect requests the sim queued
        fn apply_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::Backdrop(BackdropCue::Resume) => {
                        if let Some(video) = &self.video {
                            let _ = video.play();
                        }
                    }
                    GameEvent::Backdrop(BackdropCue::Suspend) => {
                        if let Some(video) = &self.video {
                            video.pause().ok();
                        }
                    }
                    GameEvent::BestScore(value) => {
                        if self.best.record(value) {
                            self.best.save();
                        }
                    }
                }
            }
        }

        /// Redraw the whole frame from the snapshot
        fn draw(&self, snapshot: &Snapshot) {
            let w = self.state.playfield.width as f64;
            let h = self.state.playfield.height as f64;
            self.ctx.clear_rect(0.0, 0.0, w, h);

            self.ctx.set_fill_style_str("#ffd02a");
            self.ctx.fill_rect(
                snapshot.flyer.pos.x as f64,
                snapshot.flyer.pos.y as f64,
                snapshot.flyer.size.x as f64,
                snapshot.flyer.size.y as f64,
            );

            self.ctx.set_fill_style_str("#2ec441");
            for rect in &snapshot.obstacles {
                self.ctx.fill_rect(
                    rect.pos.x as f64,
                    rect.pos.y as f64,
                    rect.size.x as f64,
                    rect.size.y as f64,
                );
            }

            // Scores in the top-left corner, best score stroked for emphasis
            self.ctx.set_font("bold 20px sans-serif");
            self.ctx.set_line_width(3.0);
            self.ctx.set_stroke_style_str("red");
            let best = format!("Best: {}", snapshot.best_score);
            let _ = self.ctx.stroke_text(&best, 20.0, 80.0);
            self.ctx.set_fill_style_str("white");
            let _ = self.ctx.fill_text(&best, 20.0, 80.0);
            self.ctx.set_fill_style_str("yellow");
            let _ = self
                .ctx
                .fill_text(&format!("Score: {}", snapshot.score), 20.0, 40.0);

            match snapshot.mode {
                GameMode::Over => self.banner("GAME OVER!"),
                GameMode::Paused => self.banner("PAUSED"),
                GameMode::Idle => self.banner("Press play to start"),
                GameMode::Running => {}
            }
        }

        /// Centered banner text, stroked then filled
        fn banner(&self, text: &str) {
            self.ctx.set_font("40px sans-serif");
            self.ctx.set_fill_style_str("red");
            self.ctx.set_stroke_style_str("white");
            self.ctx.set_line_width(5.0);
            let x = self
                .ctx
                .measure_text(text)
                .map(|m| (self.state.playfield.width as f64 - m.width()) / 2.0)
                .unwrap_or(0.0);
            let y = self.state.playfield.height as f64 / 3.0;
            let _ = self.ctx.stroke_text(text, x, y);
            let _ = self.ctx.fill_text(text, x, y);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logging");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("board")
            .expect("missing #board canvas")
            .dyn_into()
            .unwrap();
        let width = window.inner_width().unwrap().as_f64().unwrap() as f32;
        let height = window.inner_height().unwrap().as_f64().unwrap() as f32;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();

        // Background video is optional; the page may omit it
        let video = document
            .get_element_by_id("video")
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());

        let settings = Settings::load();
        let best = BestScore::load();
        let audio = AudioManager::new(settings.master_volume, settings.sfx_volume);
        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(Playfield::new(width, height), seed, best.value);
        log::info!("Gate Glider starting: {width}x{height}, seed {seed}");

        let game = Rc::new(RefCell::new(Game {
            state,
            best,
            settings,
            audio,
            ctx,
            video,
        }));

        setup_input(game.clone());
        setup_buttons(game.clone(), &document);
        setup_auto_pause(game.clone());
        setup_spawn_timer(game.clone());
        start_frame_loop(game);
    }

    /// Keyboard and touch impulse input. Touch always means the
    /// reduced-impulse device class; keyboard uses the settings default.
    fn setup_input(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" || event.code() == "ArrowUp" {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    let reduced = g.settings.reduced_impulse;
                    g.state.request_impulse(reduced);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.state.request_impulse(true);
            });
            let _ = document
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>, document: &web_sys::Document) {
        fn bind(
            document: &web_sys::Document,
            id: &str,
            game: Rc<RefCell<Game>>,
            action: fn(&mut Game),
        ) {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{id} button");
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                action(&mut g);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        bind(document, "playButton", game.clone(), |g| {
            g.state.request_start()
        });
        bind(document, "pauseButton", game.clone(), |g| {
            g.state.request_pause()
        });
        bind(document, "restartButton", game, |g| {
            g.state.request_restart()
        });
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.pause_on_blur {
                        g.state.request_pause();
                    }
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
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.pause_on_blur {
                    g.state.request_pause();
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// The spawn cadence is wall-clock driven, independent of the frame rate;
    /// `spawn_gate` itself ignores the timer while not Running
    fn setup_spawn_timer(game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut()>::new(move || {
            spawn_gate(&mut game.borrow_mut().state);
        });
        web_sys::window()
            .unwrap()
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                SPAWN_INTERVAL_MS as i32,
            )
            .unwrap();
        closure.forget();
    }

    fn start_frame_loop(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move || {
            game.borrow_mut().frame();
            request_animation_frame(f.borrow().as_ref().unwrap());
        }));
        request_animation_frame(g.borrow().as_ref().unwrap());
    }

    fn request_animation_frame(f: &Closure<dyn FnMut()>) {
        web_sys::window()
            .unwrap()
            .request_animation_frame(f.as_ref().unchecked_ref())
            .unwrap();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gate_glider::consts::SPAWN_INTERVAL_MS;
    use gate_glider::sim::{GameMode, GameState, Playfield, spawn_gate, tick};

    env_logger::init();
    log::info!("Gate Glider (native) starting...");
    log::info!("Headless demo run - build for wasm32 to play in the browser");

    let mut state = GameState::new(Playfield::new(750.0, 750.0), 42, 0);
    state.request_start();

    // Roughly one spawn per cadence at the reference frame rate
    let ticks_per_spawn = SPAWN_INTERVAL_MS / 16;
    let mut ticks = 0u32;
    while state.mode == GameMode::Running && ticks < 10_000 {
        if ticks % ticks_per_spawn == 0 {
            spawn_gate(&mut state);
        }
        // Naive pilot: kick whenever the flyer drops below the start line
        if state.flyer.pos.y > state.playfield.flyer_start_y() {
            state.request_impulse(false);
        }
        tick(&mut state);
        ticks += 1;
    }

    for event in state.drain_events() {
        log::debug!("event: {event:?}");
    }
    println!(
        "Demo over after {ticks} ticks: score {}, best {}",
        state.score, state.best_score
    );
}

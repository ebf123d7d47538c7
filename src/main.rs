//! Parallax Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, PageTransitionEvent};

    use parallax_dash::audio::{AudioManager, SoundEffect};
    use parallax_dash::platform::storage::LocalStore;
    use parallax_dash::platform::{
        Command, FrameClock, LoopAction, SurfaceSize, command_for_code,
    };
    use parallax_dash::renderer::canvas2d::SurfaceError;
    use parallax_dash::renderer::{Canvas2d, draw_frame};
    use parallax_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use parallax_dash::{HighScore, Settings, Tuning};

    /// Fatal setup conditions; the loop never starts
    #[derive(Debug, thiserror::Error)]
    pub enum SetupError {
        #[error("no window")]
        NoWindow,
        #[error("no document")]
        NoDocument,
        #[error("no #canvas element")]
        NoCanvas,
        #[error(transparent)]
        Surface(#[from] SurfaceError),
        #[error("js error: {0}")]
        Js(String),
    }

    impl From<JsValue> for SetupError {
        fn from(value: JsValue) -> Self {
            SetupError::Js(format!("{value:?}"))
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: Canvas2d,
        canvas_el: HtmlCanvasElement,
        clock: FrameClock,
        input: TickInput,
        settings: Settings,
        store: LocalStore,
        high_score: HighScore,
        audio: AudioManager,
        last_phase: GamePhase,
    }

    impl Game {
        /// One animation frame: simulate, react to events, draw
        fn frame(&mut self, time: f64) {
            let dt = self.clock.advance(time);
            let input = self.input.clone();
            tick(&mut self.state, &input, dt);
            self.input.clear();

            for event in self.state.drain_events() {
                self.handle_event(event);
            }

            draw_frame(&self.state, &self.settings, &mut self.canvas);

            if self.state.phase != self.last_phase {
                self.last_phase = self.state.phase;
                update_button(self.state.phase);
            }
        }

        fn handle_event(&mut self, event: GameEvent) {
            if let Some(effect) = SoundEffect::for_event(&event) {
                self.audio.play(effect);
            }
            if let GameEvent::GameOver { score } = event {
                if self.high_score.submit(&mut self.store, score) {
                    self.audio.play(SoundEffect::HighScore);
                }
                self.state.high_score = self.high_score.best();
            }
        }

        /// Fresh run with a new seed
        fn restart(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.reset(seed);
            self.state.high_score = self.high_score.best();
            self.clock.reset();
            self.input.clear();
            log::info!("Game restarted with seed: {}", seed);
        }

        /// Re-derive the 2:1 surface from the canvas container
        fn resize(&mut self) {
            let width = self
                .canvas_el
                .parent_element()
                .map(|p| p.client_width())
                .unwrap_or_else(|| self.canvas_el.client_width());
            let surface = SurfaceSize::from_container_width(width as f32);
            if surface != self.state.surface {
                self.state.resize(surface);
                log::info!("Surface resized to {}x{}", surface.width, surface.height);
            }
            self.canvas.resize(surface);
        }
    }

    /// Animation-frame loop that can be torn down
    #[derive(Clone)]
    pub struct FrameLoop {
        callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
        frame_id: Rc<Cell<Option<i32>>>,
    }

    impl FrameLoop {
        fn start(game: Rc<RefCell<Game>>) -> Result<Self, SetupError> {
            let frame_loop = Self {
                callback: Rc::new(RefCell::new(None)),
                frame_id: Rc::new(Cell::new(None)),
            };

            let this = frame_loop.clone();
            let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                this.frame_id.set(None);
                game.borrow_mut().frame(time);
                this.schedule();
            });
            *frame_loop.callback.borrow_mut() = Some(closure);

            frame_loop.schedule();
            if frame_loop.frame_id.get().is_none() {
                return Err(SetupError::Js("requestAnimationFrame failed".into()));
            }
            Ok(frame_loop)
        }

        /// Request the next frame unless the loop was stopped
        fn schedule(&self) {
            let Some(window) = web_sys::window() else { return };
            if let Some(callback) = self.callback.borrow().as_ref() {
                match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                    Ok(id) => self.frame_id.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }

        /// Cancel the pending frame but keep the callback for [`Self::resume`]
        pub fn suspend(&self) {
            if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
                log::info!("Frame loop suspended");
            }
        }

        /// Schedule again after a suspend; no-op once stopped or while a frame is pending
        pub fn resume(&self) {
            if self.frame_id.get().is_none() {
                self.schedule();
                if self.frame_id.get().is_some() {
                    log::info!("Frame loop resumed");
                }
            }
        }

        /// Cancel the pending frame and release the callback
        pub fn stop(&self) {
            self.suspend();
            if self.callback.borrow_mut().take().is_some() {
                log::info!("Frame loop stopped");
            }
        }
    }

    pub fn run() -> Result<FrameLoop, SetupError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialized".into());
        }

        log::info!("Parallax Dash starting...");

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let canvas_el: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(SetupError::NoCanvas)?
            .dyn_into()
            .map_err(|_| SetupError::NoCanvas)?;
        let canvas = Canvas2d::new(canvas_el.clone())?;

        let store = LocalStore::new();
        let settings = Settings::load(&store);
        let tuning = Tuning::load(&store);
        let high_score = HighScore::load(&store);

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed, tuning, SurfaceSize::default());
        state.high_score = high_score.best();
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            canvas,
            canvas_el,
            clock: FrameClock::default(),
            input: TickInput::default(),
            audio: AudioManager::new(settings.effective_volume()),
            settings,
            store,
            high_score,
            last_phase: GamePhase::Running,
        }));
        game.borrow_mut().resize();
        update_button(GamePhase::Running);

        setup_input_handlers(game.clone())?;
        setup_pause_button(game.clone());
        setup_auto_pause(game.clone())?;
        setup_resize(game.clone())?;

        let frame_loop = FrameLoop::start(game.clone())?;
        setup_page_lifecycle(frame_loop.clone(), game)?;

        log::info!("Parallax Dash running!");
        Ok(frame_loop)
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(command) = command_for_code(&event.code()) else {
                return;
            };
            // Space/ArrowUp would otherwise scroll the page
            event.prevent_default();
            let mut g = game.borrow_mut();
            match command {
                Command::Jump => g.input.jump = true,
                Command::Pause => g.input.pause = true,
                Command::ToggleSound => {
                    let g = &mut *g;
                    let volume = g.settings.toggle_sound(&mut g.store);
                    g.audio.set_volume(volume);
                }
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Pause/Resume while running, Restart after game over
    fn setup_pause_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Some(btn) = document.get_element_by_id("pause-btn") else {
            log::warn!("No #pause-btn element; keyboard controls only");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let mut g = game.borrow_mut();
            if g.state.phase == GamePhase::GameOver {
                g.restart();
            } else {
                g.input.pause = true;
            }
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Reflect the session phase on the control button
    fn update_button(phase: GamePhase) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("pause-btn"))
        else {
            return;
        };
        let label = match phase {
            GamePhase::Running => "Pause",
            GamePhase::Paused => "Resume",
            GamePhase::GameOver => "Restart",
        };
        btn.set_text_content(Some(label));
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.auto_pause && g.state.is_running() {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.auto_pause && g.state.is_running() && !g.input.pause {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Suspend on back/forward-cache entry, resume on restore, stop on unload
    fn setup_page_lifecycle(
        frame_loop: FrameLoop,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), SetupError> {
        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            match LoopAction::for_page_transition(&event.type_(), event.persisted()) {
                Some(LoopAction::Suspend) => frame_loop.suspend(),
                Some(LoopAction::Stop) => frame_loop.stop(),
                Some(LoopAction::Resume) => {
                    // Time spent in the cache must not show up as one long frame
                    game.borrow_mut().clock.reset();
                    frame_loop.resume();
                }
                None => {}
            }
        });
        for name in ["pagehide", "pageshow"] {
            window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        }
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Parallax Dash failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Parallax Dash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Simulate one run with a naive auto-jumper and report the result
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use parallax_dash::platform::MemoryStore;
    use parallax_dash::sim::{GameEvent, GameState, TickInput, tick};
    use parallax_dash::{HighScore, Tuning};

    let mut store = MemoryStore::new();
    let mut high_score = HighScore::load(&store);
    let mut state = GameState::new(7, Tuning::default(), Default::default());

    // Two minutes at 60 Hz
    for _ in 0..(120 * 60) {
        let jump = state.obstacles.iter().any(|o| {
            let gap = o.pos.x - (state.player.pos.x + state.player.size.x);
            (0.0..60.0).contains(&gap)
        });
        tick(&mut state, &TickInput { jump, pause: false }, 16.0);

        for event in state.drain_events() {
            if let GameEvent::GameOver { score } = event {
                high_score.submit(&mut store, score);
            }
        }
        if !state.is_running() {
            break;
        }
    }

    println!(
        "Run finished: score {} (best {}), speed {:.1}, {:.1}s",
        state.score,
        high_score.best(),
        state.speed,
        state.elapsed_ms / 1000.0
    );
    if let Ok(json) = serde_json::to_string(&state.snapshot()) {
        println!("{json}");
    }
}

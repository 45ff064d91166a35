//! Screaming Goats entry point
//!
//! Handles platform-specific initialization and runs the animation loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlInputElement, MouseEvent};

    use screaming_goats::audio::{SoundSink, WebAudio};
    use screaming_goats::consts::SOUND_FILES;
    use screaming_goats::renderer::{RenderState, goat_scene};
    use screaming_goats::sim::{SimState, advance_frame};
    use screaming_goats::{Settings, Tuning};

    /// App instance holding all state
    struct App {
        state: SimState,
        render_state: Option<RenderState>,
        audio: Option<WebAudio>,
        settings: Settings,
        canvas: HtmlCanvasElement,
        // Last values written to the HUD
        shown_goats: u64,
        shown_screams: u64,
    }

    impl App {
        fn new(
            seed: u64,
            canvas: HtmlCanvasElement,
            settings: Settings,
            tuning: Tuning,
        ) -> Self {
            let mut state = SimState::with_tuning(seed, tuning);
            state.set_area(canvas.width() as f32, canvas.height() as f32);
            state.set_volume(settings.volume);
            Self {
                state,
                render_state: None,
                audio: None,
                settings,
                canvas,
                shown_goats: u64::MAX,
                shown_screams: u64::MAX,
            }
        }

        /// Mouse position relative to the canvas
        fn canvas_pos(&self, event: &MouseEvent) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            )
        }

        fn pointer_moved(&mut self, x: f32, y: f32) {
            let sink = self.audio.as_mut().map(|a| a as &mut dyn SoundSink);
            self.state.on_pointer_move(x, y, sink);
        }

        /// One tick: update, then render
        fn frame(&mut self) {
            if !self.state.running {
                return;
            }
            advance_frame(&mut self.state);

            if let Some(ref mut render_state) = self.render_state {
                let vertices = goat_scene(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD counters in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let goats = self.state.goats_created();
            if goats != self.shown_goats {
                if let Some(el) = document.get_element_by_id("goatCount") {
                    el.set_text_content(Some(&goats.to_string()));
                }
                self.shown_goats = goats;
            }

            let screams = self.state.sounds_triggered();
            if screams != self.shown_screams {
                if let Some(el) = document.get_element_by_id("screamCount") {
                    el.set_text_content(Some(&screams.to_string()));
                }
                self.shown_screams = screams;
            }
        }
    }

    fn button(id: &str) -> Option<HtmlButtonElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(id)?
            .dyn_into()
            .ok()
    }

    /// Only the button that does something is enabled
    fn sync_buttons(running: bool) {
        if let Some(btn) = button("startBtn") {
            btn.set_disabled(running);
        }
        if let Some(btn) = button("stopBtn") {
            btn.set_disabled(!running);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Screaming Goats starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("goatCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let tuning = Tuning::load();
        let app = Rc::new(RefCell::new(App::new(seed, canvas.clone(), settings, tuning)));
        log::info!("Simulation initialized with seed: {}", seed);

        if let Some(volume) = document
            .get_element_by_id("volume")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            volume.set_value(&app.borrow().settings.volume.to_string());
        }

        if app.borrow().settings.sound_enabled {
            load_audio(app.clone());
        } else {
            log::warn!("Sound disabled in settings");
        }

        setup_input_handlers(&canvas, app.clone());
        setup_controls(app.clone());
        sync_buttons(false);

        app.borrow_mut().state.spawn_initial_goats();
        app.borrow_mut().update_hud();

        request_animation_frame(app.clone());

        // Drawing is optional: without a GPU the herd still runs and screams
        match create_renderer(&canvas).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        log::info!("Screaming Goats running!");
    }

    async fn create_renderer(canvas: &HtmlCanvasElement) -> Result<RenderState, String> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, (width as f32, height as f32))
            .await
            .map_err(|e| e.to_string())
    }

    /// Fetch and decode the scream clips in the background
    fn load_audio(app: Rc<RefCell<App>>) {
        let weak = Rc::downgrade(&app);
        let on_end: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(app) = weak.upgrade() {
                app.borrow_mut().state.sound_finished();
            }
        });

        wasm_bindgen_futures::spawn_local(async move {
            match WebAudio::load(&SOUND_FILES, on_end).await {
                Ok(audio) => {
                    log::info!(
                        "Audio system initialized and {} sounds loaded.",
                        audio.clip_count()
                    );
                    app.borrow_mut().audio = Some(audio);
                }
                Err(e) => log::error!("Audio initialization failed: {}", e),
            }
        });
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer tracking and scaring
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.canvas_pos(&event);
                a.pointer_moved(x, y);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Add goats on click
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.canvas_pos(&event);
                a.state.on_click(x, y);
                a.update_hud();
            });
            let _ = canvas
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        if let Some(btn) = button("startBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().state.start();
                sync_buttons(true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = button("stopBtn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().state.stop();
                sync_buttons(false);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let slider = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("volume"))
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());
        if let Some(slider) = slider {
            let input = slider.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Ok(volume) = input.value().parse::<f32>() else {
                    return;
                };
                let mut a = app.borrow_mut();
                a.state.set_volume(volume);
                a.settings.set_volume(volume);
                a.settings.save();
            });
            let _ = slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |_time: f64| {
            animate(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn animate(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.frame();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Frames a headless scream "plays" before reporting completion
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_CLIP_FRAMES: u32 = 90;

/// Frames the headless demo runs
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 1200;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use screaming_goats::audio::LogSink;
    use screaming_goats::consts::SOUND_FILES;
    use screaming_goats::renderer::goat_scene;
    use screaming_goats::sim::{SimState, advance_frame};
    use screaming_goats::{Settings, SoundSink, Tuning};

    env_logger::init();
    log::info!("Screaming Goats (native) starting...");
    log::info!("Native mode runs headless - serve the wasm build for the canvas version");

    let settings = Settings::load();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut state = SimState::with_tuning(seed, Tuning::load());
    state.set_volume(settings.volume);
    state.spawn_initial_goats();
    state.start();

    let mut sink = settings.sound_enabled.then(|| LogSink::new(SOUND_FILES));
    let mut playing_for: Option<u32> = None;

    let center = glam::Vec2::new(state.width / 2.0, state.height / 2.0);
    for frame in 0..HEADLESS_FRAMES {
        // Pointer sweeps a circle through the herd
        let t = frame as f32 * 0.02;
        let pointer = center + glam::Vec2::new(t.cos(), t.sin()) * 200.0;
        let outcome = state.on_pointer_move(
            pointer.x,
            pointer.y,
            sink.as_mut().map(|s| s as &mut dyn SoundSink),
        );
        if outcome.screamed {
            playing_for = Some(0);
        }

        if frame % 300 == 0 {
            state.on_click(pointer.x, pointer.y);
        }

        advance_frame(&mut state);

        // Simulated end-of-playback
        if let Some(elapsed) = playing_for.as_mut() {
            *elapsed += 1;
            if *elapsed >= HEADLESS_CLIP_FRAMES {
                state.sound_finished();
                playing_for = None;
            }
        }
    }

    let scared = state.goats.iter().filter(|g| g.scared).count();
    let vertices = goat_scene(&state).len();
    log::info!(
        "{} frames: {} goats created, {} screams, {} currently scared, {} vertices per frame",
        HEADLESS_FRAMES,
        state.goats_created(),
        state.sounds_triggered(),
        scared,
        vertices
    );
    println!(
        "Goats: {}  Screams: {}",
        state.goats_created(),
        state.sounds_triggered()
    );
}

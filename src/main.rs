//! Shape Rain entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use shape_rain::Settings;
    use shape_rain::platform::{ControlSignal, PointerEvent, PointerTarget};
    use shape_rain::renderer::{RenderState, Scene};
    use shape_rain::sim::{
        SessionState, Stats, frame_delta_from_ms, handle_pointer, pump_spawns, start_session,
        tick,
    };

    /// App instance holding all state
    struct App {
        state: SessionState,
        scene: Scene,
        render_state: Option<RenderState>,
        settings: Settings,
        last_time: f64,
        stats: Stats,
    }

    impl App {
        fn new(seed: u64, settings: Settings, width: f32, height: f32) -> Self {
            Self {
                state: SessionState::with_settings(seed, &settings),
                scene: Scene::new(width, height, settings.quality.curve_segments()),
                render_state: None,
                settings,
                last_time: 0.0,
                stats: Stats::default(),
            }
        }

        /// Spawn timer, then gravity step and stats for this frame
        fn update(&mut self, time: f64) {
            let elapsed_ms = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;

            pump_spawns(&mut self.state, &mut self.scene, elapsed_ms);
            self.stats = tick(
                &mut self.state,
                &mut self.scene,
                frame_delta_from_ms(elapsed_ms),
            );
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.scene) {
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

        /// Press on the canvas: remove the shape under it, or spawn one there
        fn pointer_down(&mut self, x: f32, y: f32) {
            let pos = Vec2::new(x, y);
            let target = self
                .state
                .shape_at(pos)
                .map_or(PointerTarget::Canvas, PointerTarget::Shape);
            handle_pointer(&mut self.state, &mut self.scene, PointerEvent { pos, target });
        }

        fn control(&mut self, signal: ControlSignal) {
            if self.state.apply_control(signal) {
                self.update_controls();

                // Next visit starts where this one left off
                self.settings.spawn_rate = self.state.spawn_rate();
                self.settings.gravity = self.state.gravity();
                self.settings.save();
            }
        }

        fn update_controls(&self) {
            set_text("shape-per-sec-count", &self.state.spawn_rate_label());
            set_text("gravity-value", &self.state.gravity_label());
        }

        fn update_stats(&self) {
            if self.settings.show_stats {
                set_text("shape-count", &self.stats.count.to_string());
                set_text("shape-area", &self.stats.area_label());
            }
        }
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            el.set_text_content(Some(text));
        }
    }

    /// Canvas size in CSS pixels and device pixels
    fn canvas_sizes(canvas: &HtmlCanvasElement) -> ((f32, f32), (u32, u32)) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            (client_w as f32, client_h as f32),
            ((client_w as f64 * dpr) as u32, (client_h as f64 * dpr) as u32),
        )
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shape Rain starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ((css_w, css_h), (width, height)) = canvas_sizes(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let background = settings.background_color;
        if !settings.show_stats {
            if let Some(el) = document.get_element_by_id("stats") {
                let _ = el.set_attribute("class", "hidden");
            }
        }
        let app = Rc::new(RefCell::new(App::new(seed, settings, css_w, css_h)));
        log::info!("Session initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, background).await;
        {
            let mut a = app.borrow_mut();
            a.render_state = Some(render_state);

            let App { state, scene, .. } = &mut *a;
            start_session(state, scene);
            a.update_controls();
        }

        setup_pointer_handler(&canvas, app.clone());
        setup_control_buttons(app.clone());
        setup_resize_handler(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Shape Rain running!");
    }

    fn setup_pointer_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::PointerEvent| {
            event.prevent_default();
            app.borrow_mut()
                .pointer_down(event.offset_x() as f32, event.offset_y() as f32);
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_control_buttons(app: Rc<RefCell<App>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for signal in ControlSignal::ALL {
            let Some(btn) = document.get_element_by_id(signal.element_id()) else {
                log::warn!("Missing control button #{}", signal.element_id());
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().control(signal);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let ((css_w, css_h), (width, height)) = canvas_sizes(&canvas);
            canvas.set_width(width);
            canvas.set_height(height);

            let mut a = app.borrow_mut();
            a.scene.resize(css_w, css_h);
            if let Some(ref mut render_state) = a.render_state {
                render_state.resize(width, height);
            }
            log::info!("Canvas resized to {}x{}", css_w, css_h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
            a.update_stats();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Rain (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    run_headless(42, 600);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a session without a window and print the stats once a second
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seed: u64, frames: u32) {
    use shape_rain::consts::FRAME_MS;
    use shape_rain::sim::{SessionState, frame_delta_from_ms, pump_spawns, start_session, tick};
    use shape_rain::{ControlSignal, HeadlessDisplay, Settings};

    let settings = Settings::load();
    let mut display = HeadlessDisplay::new(960.0, 540.0);
    let mut state = SessionState::with_settings(seed, &settings);
    start_session(&mut state, &mut display);

    for frame in 1..=frames {
        // Halfway through, speed everything up like a user pressing "+"
        if frame == frames / 2 {
            state.apply_control(ControlSignal::IncreaseRate);
            state.apply_control(ControlSignal::IncreaseRate);
            state.apply_control(ControlSignal::IncreaseGravity);
        }

        pump_spawns(&mut state, &mut display, FRAME_MS);
        let stats = tick(&mut state, &mut display, frame_delta_from_ms(FRAME_MS));

        if frame % 60 == 0 {
            println!(
                "t={:>2}s rate={}/s gravity={} shapes={} area={}",
                frame / 60,
                state.spawn_rate_label(),
                state.gravity_label(),
                stats.count,
                stats.area_label()
            );
        }
    }
}

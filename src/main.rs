//! Fruit Slash entry point
//!
//! The browser host: canvas sizing, Canvas2D drawing of the per-frame
//! snapshot, pointer/touch listeners, and the animation-frame loop.
//!
//! Nothing attaches until the embedding application calls `host_ready()`,
//! and `teardown()` releases the loop and every listener together.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, MouseEvent, TouchEvent,
    };

    use fruit_slash::consts::FRAME_MS;
    use fruit_slash::render::{self, Frame, EXPLOSION_FONT_PX, FRAGMENT_FONT_PX, OBJECT_FONT_PX};
    use fruit_slash::settings::Settings;
    use fruit_slash::share;
    use fruit_slash::sim::{self, GameState, HostAction, SurfaceBounds};

    /// Host instance wrapping the simulation
    struct Host {
        state: GameState,
        canvas: HtmlCanvasElement,
        ctx: Option<CanvasRenderingContext2d>,
        settings: Settings,
        last_time: f64,
        running: bool,
        raf_id: Option<i32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Host {
        fn new(seed: u64, canvas: HtmlCanvasElement, settings: Settings) -> Self {
            let bounds = SurfaceBounds::new(canvas.width() as f32, canvas.height() as f32);
            Self {
                state: GameState::new(seed, bounds),
                canvas,
                ctx: None,
                settings,
                last_time: 0.0,
                running: true,
                raf_id: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// 2D context, acquired lazily so a not-yet-mounted canvas just
        /// skips frames instead of failing activation.
        fn context(&mut self) -> Option<CanvasRenderingContext2d> {
            if self.ctx.is_none() {
                self.ctx = self
                    .canvas
                    .get_context("2d")
                    .ok()
                    .flatten()
                    .and_then(|obj| obj.dyn_into().ok());
            }
            self.ctx.clone()
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn draw(&mut self) {
            let Some(ctx) = self.context() else {
                // Transient (e.g. before mount): skip this frame
                return;
            };
            let frame = render::snapshot(&self.state);
            let w = self.canvas.width() as f64;
            let h = self.canvas.height() as f64;

            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str("#000000");
            ctx.fill_rect(0.0, 0.0, w, h);

            self.draw_trail(&ctx, &frame);
            self.draw_sprites(&ctx, &frame);

            // Score
            ctx.set_global_alpha(1.0);
            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("24px Arial");
            ctx.set_text_align("left");
            ctx.set_text_baseline("alphabetic");
            let _ = ctx.fill_text(&frame.score.to_string(), 20.0, 40.0);

            if let Some(overlay) = &frame.overlay {
                self.draw_overlay(&ctx, overlay, w, h);
            }
            if frame.start_screen {
                self.draw_start_screen(&ctx, w, h);
            }

            if self.settings.show_fps {
                ctx.set_global_alpha(1.0);
                ctx.set_fill_style_str("#888888");
                ctx.set_font("14px Arial");
                ctx.set_text_align("right");
                let _ = ctx.fill_text(&format!("{} fps", self.fps), w - 10.0, 20.0);
            }
        }

        fn draw_trail(&self, ctx: &CanvasRenderingContext2d, frame: &Frame) {
            if frame.trail.len() < 2 {
                return;
            }

            let polyline = |ctx: &CanvasRenderingContext2d| {
                ctx.begin_path();
                ctx.move_to(frame.trail[0].x as f64, frame.trail[0].y as f64);
                for p in &frame.trail[1..] {
                    ctx.line_to(p.x as f64, p.y as f64);
                }
            };

            ctx.set_line_cap("round");
            ctx.set_line_join("round");

            // Soft glow under the blade
            if self.settings.effective_trail_glow() {
                polyline(ctx);
                ctx.set_stroke_style_str("rgba(120, 190, 255, 0.4)");
                ctx.set_line_width(8.0);
                ctx.stroke();
            }

            // Bright core
            polyline(ctx);
            ctx.set_stroke_style_str("rgba(255, 255, 255, 0.9)");
            ctx.set_line_width(3.0);
            ctx.stroke();

            // Sparkles at the blade tip
            if self.settings.effective_sparkles() {
                let tip = frame.trail[frame.trail.len() - 1];
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
                for _ in 0..3 {
                    let offset = js_sys::Math::random() * 10.0 - 5.0;
                    let size = js_sys::Math::random() * 5.0 + 2.0;
                    ctx.begin_path();
                    let _ = ctx.arc(
                        tip.x as f64 + offset,
                        tip.y as f64 + offset,
                        size,
                        0.0,
                        std::f64::consts::TAU,
                    );
                    ctx.fill();
                }
            }
        }

        fn draw_sprites(&self, ctx: &CanvasRenderingContext2d, frame: &Frame) {
            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");

            let object_font = format!("{}px Arial", OBJECT_FONT_PX);
            for sprite in frame.fruits.iter().chain(&frame.bombs) {
                ctx.save();
                ctx.set_global_alpha(1.0);
                let _ = ctx.translate(sprite.pos.x as f64, sprite.pos.y as f64);
                let _ = ctx.rotate(sprite.rotation as f64);
                ctx.set_font(&object_font);
                let _ = ctx.fill_text(sprite.emoji, 0.0, 0.0);
                ctx.restore();
            }

            let fragment_font = format!("{}px Arial", FRAGMENT_FONT_PX);
            for frag in &frame.fragments {
                ctx.save();
                ctx.set_global_alpha(frag.opacity as f64);
                let _ = ctx.translate(frag.pos.x as f64, frag.pos.y as f64);
                let _ = ctx.rotate(frag.rotation as f64);
                ctx.set_font(&fragment_font);
                let _ = ctx.fill_text(frag.emoji, 0.0, 0.0);
                ctx.restore();
            }

            let explosion_font = format!("{}px Arial", EXPLOSION_FONT_PX);
            for explosion in &frame.explosions {
                ctx.save();
                ctx.set_global_alpha(explosion.opacity as f64);
                let _ = ctx.translate(explosion.pos.x as f64, explosion.pos.y as f64);
                let _ = ctx.scale(explosion.scale as f64, explosion.scale as f64);
                ctx.set_font(&explosion_font);
                let _ = ctx.fill_text("\u{1F4A5}", 0.0, 0.0);
                ctx.restore();
            }
        }

        fn draw_overlay(
            &self,
            ctx: &CanvasRenderingContext2d,
            overlay: &render::Overlay,
            w: f64,
            h: f64,
        ) {
            let fade = overlay.fade as f64;

            ctx.set_global_alpha(fade);
            ctx.set_fill_style_str("#000000");
            ctx.fill_rect(0.0, 0.0, w, h);

            if overlay.fade <= 0.0 {
                return;
            }

            ctx.set_text_align("center");
            ctx.set_text_baseline("middle");

            ctx.set_fill_style_str("#ff3333");
            ctx.set_font("bold 60px Arial");
            let _ = ctx.fill_text("GAME OVER", w / 2.0, h * 0.3);

            ctx.set_fill_style_str("#ffffff");
            ctx.set_font("32px Arial");
            let _ = ctx.fill_text(
                &format!("Final Score: {}", overlay.final_score),
                w / 2.0,
                h * 0.45,
            );

            for (button, fill) in [(&overlay.share, "#7c65c1"), (&overlay.restart, "#4caf50")] {
                if button.opacity <= 0.0 {
                    continue;
                }
                let r = &button.rect;
                ctx.set_global_alpha(button.opacity as f64);
                ctx.set_fill_style_str(fill);
                ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
                ctx.set_stroke_style_str("#ffffff");
                ctx.set_line_width(3.0);
                ctx.stroke_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
                ctx.set_fill_style_str("#ffffff");
                ctx.set_font("bold 28px Arial");
                let _ = ctx.fill_text(
                    button.label,
                    (r.x + r.w / 2.0) as f64,
                    (r.y + r.h / 2.0) as f64,
                );
            }
            ctx.set_global_alpha(1.0);
        }

        fn draw_start_screen(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
            ctx.set_global_alpha(0.7);
            ctx.set_fill_style_str("#000000");
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_global_alpha(1.0);

            ctx.set_fill_style_str("#ffffff");
            ctx.set_text_align("center");
            ctx.set_text_baseline("alphabetic");
            ctx.set_font("48px Arial");
            let _ = ctx.fill_text("Fruit Slash", w / 2.0, h / 2.0 - 50.0);
            ctx.set_font("24px Arial");
            let _ = ctx.fill_text("Slash fruits! Avoid bombs!", w / 2.0, h / 2.0);
            ctx.set_font("18px Arial");
            let _ = ctx.fill_text("Tap to start", w / 2.0, h / 2.0 + 50.0);
        }
    }

    /// An attached DOM listener whose handle is retained so teardown can
    /// remove it (never `forget` these).
    struct Listener {
        target: EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn attach(
            target: &EventTarget,
            event: &'static str,
            handler: impl FnMut(web_sys::Event) + 'static,
        ) -> Option<Self> {
            let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
            match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            {
                Ok(()) => Some(Self {
                    target: target.clone(),
                    event,
                    closure,
                }),
                Err(err) => {
                    log::warn!("failed to attach {} listener: {:?}", event, err);
                    None
                }
            }
        }

        fn detach(&self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
        }
    }

    /// The active host: simulation plus every releasable handle
    struct App {
        host: Rc<RefCell<Host>>,
        listeners: Vec<Listener>,
    }

    thread_local! {
        static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    }

    fn mouse_pos(canvas: &HtmlCanvasElement, event: &MouseEvent) -> (f32, f32) {
        let rect = canvas.get_bounding_client_rect();
        (
            event.client_x() as f32 - rect.left() as f32,
            event.client_y() as f32 - rect.top() as f32,
        )
    }

    fn touch_pos(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        ))
    }

    fn perform(action: Option<HostAction>) {
        if let Some(HostAction::Share { score }) = action {
            let url = share::compose_url(score);
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.location().set_href(&url) {
                    log::warn!("share navigation failed: {:?}", err);
                }
            }
        }
    }

    /// Activate the game. Called by the embedding application once its
    /// own readiness (auth, mount) is settled; until then no listener is
    /// attached and no frame is scheduled.
    pub fn activate() {
        let already = APP.with(|app| app.borrow().is_some());
        if already {
            log::warn!("host_ready called twice; ignoring");
            return;
        }

        let Some(window) = web_sys::window() else {
            log::error!("no window; cannot activate");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document; cannot activate");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no #canvas element; cannot activate");
            return;
        };

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let host = Rc::new(RefCell::new(Host::new(seed, canvas.clone(), Settings::load())));
        log::info!("Fruit Slash activated with seed: {}", seed);

        let mut listeners = Vec::new();
        let canvas_target: &EventTarget = canvas.as_ref();

        // Pointer down: hit tests / run start / gesture start
        {
            let host = host.clone();
            let canvas = canvas.clone();
            listeners.extend(Listener::attach(canvas_target, "mousedown", move |event| {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let (x, y) = mouse_pos(&canvas, event);
                    let action = sim::pointer_down(&mut host.borrow_mut().state, x, y);
                    perform(action);
                }
            }));
        }
        {
            let host = host.clone();
            let canvas = canvas.clone();
            listeners.extend(Listener::attach(canvas_target, "touchstart", move |event| {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<TouchEvent>() {
                    if let Some((x, y)) = touch_pos(&canvas, event) {
                        let action = sim::pointer_down(&mut host.borrow_mut().state, x, y);
                        perform(action);
                    }
                }
            }));
        }

        // Pointer move: extend the gesture, collisions run inside
        {
            let host = host.clone();
            let canvas = canvas.clone();
            listeners.extend(Listener::attach(canvas_target, "mousemove", move |event| {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<MouseEvent>() {
                    let (x, y) = mouse_pos(&canvas, event);
                    sim::pointer_move(&mut host.borrow_mut().state, x, y);
                }
            }));
        }
        {
            let host = host.clone();
            let canvas = canvas.clone();
            listeners.extend(Listener::attach(canvas_target, "touchmove", move |event| {
                event.prevent_default();
                if let Some(event) = event.dyn_ref::<TouchEvent>() {
                    if let Some((x, y)) = touch_pos(&canvas, event) {
                        sim::pointer_move(&mut host.borrow_mut().state, x, y);
                    }
                }
            }));
        }

        // Pointer up / leave / cancel: end the gesture
        for event_name in ["mouseup", "mouseleave", "touchend", "touchcancel"] {
            let host = host.clone();
            listeners.extend(Listener::attach(canvas_target, event_name, move |_event| {
                sim::pointer_up(&mut host.borrow_mut().state);
            }));
        }

        // Window resize: resize the canvas and the sim bounds together
        {
            let host = host.clone();
            let canvas = canvas.clone();
            let window_target: &EventTarget = window.as_ref();
            listeners.extend(Listener::attach(window_target, "resize", move |_event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let w = window
                    .inner_width()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(800.0);
                let h = window
                    .inner_height()
                    .ok()
                    .and_then(|v| v.as_f64())
                    .unwrap_or(600.0);
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
                sim::resize(&mut host.borrow_mut().state, w as f32, h as f32);
            }));
        }

        APP.with(|app| {
            *app.borrow_mut() = Some(App {
                host: host.clone(),
                listeners,
            });
        });

        schedule_frame(host);
        log::info!("Fruit Slash running");
    }

    /// Release the frame loop and all listeners together.
    pub fn deactivate() {
        APP.with(|app| {
            let Some(app) = app.borrow_mut().take() else {
                log::warn!("teardown called with no active host");
                return;
            };
            for listener in &app.listeners {
                listener.detach();
            }
            let mut host = app.host.borrow_mut();
            host.running = false;
            if let (Some(id), Some(window)) = (host.raf_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
            log::info!("Fruit Slash torn down: loop and listeners released");
        });
    }

    fn schedule_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let host_for_frame = host.clone();
        let callback = Closure::once_into_js(move |time: f64| {
            frame(host_for_frame, time);
        });
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => host.borrow_mut().raf_id = Some(id),
            Err(err) => log::warn!("requestAnimationFrame failed: {:?}", err),
        }
    }

    fn frame(host: Rc<RefCell<Host>>, time: f64) {
        let keep_running = {
            let mut h = host.borrow_mut();
            if !h.running {
                false
            } else {
                // dt in frame units; the sim clamps against stalls
                let dt = if h.last_time > 0.0 {
                    ((time - h.last_time) / FRAME_MS as f64) as f32
                } else {
                    1.0
                };
                h.last_time = time;
                sim::tick(&mut h.state, dt);
                h.track_fps(time);
                h.draw();
                true
            }
        };
        if keep_running {
            schedule_frame(host);
        }
    }
}

/// Module load: logging only. Activation waits for `host_ready()`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Fruit Slash module loaded; waiting for host_ready()");
}

/// Called by the embedding application once it is ready (authenticated,
/// mounted). Attaches input listeners and starts the frame loop.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn host_ready() {
    wasm_host::activate();
}

/// Called by the embedding application on navigation/unmount. Releases
/// the frame loop and every listener; nothing dangles afterwards.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    wasm_host::deactivate();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Fruit Slash (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning slash smoke check...");
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use fruit_slash::consts::OBJECT_RADIUS;
    use fruit_slash::sim::state::{FallingObject, FruitKind, ObjectKind};
    use fruit_slash::sim::{self, GameState, SurfaceBounds};
    use glam::Vec2;

    let mut state = GameState::new(12345, SurfaceBounds::new(400.0, 800.0));
    // Tap to start, then slash straight through a known fruit
    sim::pointer_down(&mut state, 200.0, 400.0);
    state.fruits.push(FallingObject {
        pos: Vec2::new(200.0, 400.0),
        vel: Vec2::new(0.0, -16.0),
        radius: OBJECT_RADIUS,
        rotation: 0.0,
        spin: 0.0,
        kind: ObjectKind::Fruit(FruitKind::Apple),
        sliced: false,
    });
    sim::pointer_down(&mut state, 100.0, 400.0);
    sim::pointer_move(&mut state, 300.0, 400.0);
    assert_eq!(state.score, 1, "slash should score the fruit");
    assert_eq!(state.fragments.len(), 2, "slash should leave two halves");
    println!("✓ Slash smoke check passed!");
}

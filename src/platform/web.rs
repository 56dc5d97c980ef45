//! Browser host
//!
//! Binds a [`Driver`] to an `HtmlCanvasElement`: one tick per animation frame,
//! canvas resized with the window, theme read from the page every frame.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::driver::Driver;
use crate::renderer::{Canvas, Ink, Paint, Theme};
use crate::settings::Settings;
use crate::viewport::Viewport;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A host page may have installed a logger already
    let _ = console_log::init_with_level(log::Level::Info);
}

/// `Canvas` over a browser 2D context
struct WebCanvas {
    ctx: CanvasRenderingContext2d,
    /// Ink currently set as fill/stroke style
    ink: Option<Ink>,
}

impl WebCanvas {
    fn apply(&mut self, paint: Paint) {
        self.ctx.set_global_alpha(paint.alpha as f64);
        if self.ink != Some(paint.ink) {
            let css = paint.ink.to_css();
            self.ctx.set_fill_style_str(&css);
            self.ctx.set_stroke_style_str(&css);
            self.ink = Some(paint.ink);
        }
    }

    /// Resizing a canvas resets its context state
    fn reset(&mut self, pixel_ratio: f32) {
        self.ink = None;
        let r = pixel_ratio as f64;
        if let Err(e) = self.ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0) {
            log::warn!("setTransform failed: {:?}", e);
        }
    }
}

impl Canvas for WebCanvas {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, paint: Paint) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        self.apply(paint);
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn stroke_ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
        line_width: f32,
        paint: Paint,
    ) {
        if !(rx > 0.0 && ry > 0.0) {
            return;
        }
        self.apply(paint);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.begin_path();
        let traced = self
            .ctx
            .ellipse(cx as f64, cy as f64, rx as f64, ry as f64, 0.0, 0.0, TAU);
        if traced.is_ok() {
            self.ctx.stroke();
        }
    }
}

fn window_size(window: &Window) -> (f32, f32) {
    let extent = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (
        extent(window.inner_width()) as f32,
        extent(window.inner_height()) as f32,
    )
}

/// Dark mode is signalled by a `dark` class on `<html>`
fn page_theme() -> Theme {
    let dark = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false);
    Theme::from_dark(dark)
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|q| q.matches())
        .unwrap_or(false)
}

/// Everything a running shower owns on the page
struct Host {
    driver: Driver<Pcg32>,
    canvas: HtmlCanvasElement,
    surface: WebCanvas,
    /// Pending requestAnimationFrame handle
    frame_id: Option<i32>,
    on_frame: Option<Closure<dyn FnMut(f64)>>,
    on_resize: Option<Closure<dyn FnMut(web_sys::Event)>>,
}

impl Host {
    fn attach(canvas: HtmlCanvasElement) -> Option<Rc<RefCell<Host>>> {
        let Some(window) = web_sys::window() else {
            log::warn!("No window; meteor shower disabled");
            return None;
        };
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
        let Some(ctx) = ctx else {
            log::warn!("Canvas has no 2D context; meteor shower disabled");
            return None;
        };

        let mut settings = Settings::load();
        if prefers_reduced_motion(&window) {
            settings.reduced_motion = true;
        }
        let (width, height) = window_size(&window);
        let viewport = Viewport::new(width, height, window.device_pixel_ratio() as f32);
        let seed = js_sys::Date::now() as u64;

        let host = Rc::new(RefCell::new(Host {
            driver: Driver::with_seed(seed, viewport, settings),
            canvas,
            surface: WebCanvas { ctx, ink: None },
            frame_id: None,
            on_frame: None,
            on_resize: None,
        }));

        {
            let mut h = host.borrow_mut();
            h.fit_to_window();

            let weak = Rc::downgrade(&host);
            h.on_frame = Some(Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
                if let Some(host) = weak.upgrade() {
                    host.borrow_mut().frame();
                }
            }));

            let weak = Rc::downgrade(&host);
            let on_resize = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(host) = weak.upgrade() {
                    host.borrow_mut().fit_to_window();
                }
            });
            if let Err(e) = window
                .add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())
            {
                log::warn!("Cannot listen for resize: {:?}", e);
            }
            h.on_resize = Some(on_resize);

            h.schedule();
        }

        log::info!("Meteor shower attached (seed {})", seed);
        Some(host)
    }

    /// Match the canvas to the window: logical CSS size, scaled backing store
    fn fit_to_window(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = window_size(&window);
        self.driver
            .set_pixel_ratio(window.device_pixel_ratio() as f32);
        let size = self.driver.resize(width, height);

        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", width));
        let _ = style.set_property("height", &format!("{}px", height));

        self.surface.reset(self.driver.viewport().pixel_ratio());
    }

    fn frame(&mut self) {
        self.frame_id = None;
        let theme = page_theme();
        if self.driver.tick(&mut self.surface, theme).is_some() {
            self.schedule();
        }
    }

    fn schedule(&mut self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(callback) = self.on_frame.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.frame_id = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Cancel the pending frame and release listeners. Safe to repeat.
    fn teardown(&mut self) {
        if !self.driver.stop() {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Some(id) = self.frame_id.take() {
                let _ = window.cancel_animation_frame(id);
            }
            if let Some(callback) = self.on_resize.as_ref() {
                let _ = window.remove_event_listener_with_callback(
                    "resize",
                    callback.as_ref().unchecked_ref(),
                );
            }
        }
        self.frame_id = None;
        self.on_frame = None;
        self.on_resize = None;
    }
}

/// Handle returned to JavaScript.
///
/// `attach` never throws: if the canvas cannot be drawn on, the handle is
/// simply detached from the start.
#[wasm_bindgen]
pub struct MeteorShower {
    host: Option<Rc<RefCell<Host>>>,
}

#[wasm_bindgen]
impl MeteorShower {
    /// Start ticking on `canvas`
    pub fn attach(canvas: HtmlCanvasElement) -> MeteorShower {
        MeteorShower {
            host: Host::attach(canvas),
        }
    }

    /// Stop ticking and release listeners; a no-op when already detached
    pub fn detach(&mut self) {
        if let Some(host) = self.host.take() {
            host.borrow_mut().teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.host.is_some()
    }

    /// Live entities across all pools (0 when detached)
    #[wasm_bindgen(getter)]
    pub fn entities(&self) -> u32 {
        self.host
            .as_ref()
            .map(|h| h.borrow().driver.state().entity_count() as u32)
            .unwrap_or(0)
    }

    /// Toggle reduced motion and persist the choice
    #[wasm_bindgen(js_name = setReducedMotion)]
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        let Some(host) = self.host.as_ref() else {
            return;
        };
        let mut host = host.borrow_mut();
        let settings = Settings {
            reduced_motion: enabled,
            ..host.driver.settings().clone()
        };
        settings.save();
        host.driver.set_settings(settings);
    }
}

impl Drop for MeteorShower {
    fn drop(&mut self) {
        self.detach();
    }
}

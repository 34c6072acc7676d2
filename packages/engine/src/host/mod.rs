//! Browser glue: canvas surface, requestAnimationFrame, console tracing.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use tracing::{error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData, Window};

use crate::config::SceneConfig;
use crate::error::{FlowerError, FlowerResult};
use crate::render::frame::DrawTarget;
use crate::render::raster::Raster;
use crate::runtime::{AnimationLoop, FrameScheduler, RenderContext};
use crate::simulation::FlowerBackend;

static TRACING: Once = Once::new();

/// Route `tracing` events to the browser console. Safe to call repeatedly.
pub fn install_tracing() {
    TRACING.call_once(tracing_wasm::set_as_global_default);
}

fn js_error(e: JsValue) -> FlowerError {
    FlowerError::Host(format!("{:?}", e))
}

fn to_js(e: FlowerError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Composites into an offscreen raster and presents it as one `ImageData`
/// per frame.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    frame: Raster,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> FlowerResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(js_error)?
            .ok_or_else(|| FlowerError::Host("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FlowerError::Host("2d context has an unexpected type".into()))?;

        Ok(Self {
            ctx,
            frame: Raster::new(canvas.width(), canvas.height()),
        })
    }
}

impl DrawTarget for CanvasSurface {
    fn size(&self) -> (u32, u32) {
        (self.frame.width(), self.frame.height())
    }

    fn draw_image(&mut self, image: &Raster, x: i32, y: i32) {
        self.frame.blit(image, x, y);
    }

    fn finish_frame(&mut self) {
        let image = ImageData::new_with_u8_clamped_array_and_sh(
            Clamped(self.frame.as_rgba_bytes()),
            self.frame.width(),
            self.frame.height(),
        );
        match image {
            Ok(image) => {
                if let Err(e) = self.ctx.put_image_data(&image, 0.0, 0.0) {
                    error!(?e, "putImageData failed");
                }
            }
            Err(e) => error!(?e, "ImageData allocation failed"),
        }
    }
}

/// Calls the frame from `requestAnimationFrame`, re-arming after each call.
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn run(self, mut frame: Box<dyn FnMut()>) -> FlowerResult<()> {
        // The closure holds the only other handle to itself, so it lives
        // as long as the page.
        let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let rearm = callback.clone();
        let window = self.window.clone();

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame();
            if let Some(cb) = rearm.borrow().as_ref() {
                if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    error!(?e, "requestAnimationFrame failed, animation stopped");
                }
            }
        }) as Box<dyn FnMut()>));

        let first = callback.borrow();
        if let Some(cb) = first.as_ref() {
            self.window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(js_error)?;
        }
        Ok(())
    }
}

fn viewport_size(window: &Window) -> FlowerResult<(u32, u32)> {
    let dimension = |value: Result<JsValue, JsValue>, name: &str| -> FlowerResult<u32> {
        value
            .map_err(js_error)?
            .as_f64()
            .map(|v| v.max(0.0) as u32)
            .ok_or_else(|| FlowerError::Host(format!("window.{} is not a number", name)))
    };
    Ok((
        dimension(window.inner_width(), "innerWidth")?,
        dimension(window.inner_height(), "innerHeight")?,
    ))
}

fn find_canvas(window: &Window, canvas_id: &str) -> FlowerResult<HtmlCanvasElement> {
    window
        .document()
        .ok_or_else(|| FlowerError::Host("no document".into()))?
        .get_element_by_id(canvas_id)
        .ok_or_else(|| FlowerError::Host(format!("no element with id `{}`", canvas_id)))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| FlowerError::Host(format!("`{}` is not a canvas", canvas_id)))
}

fn start_scene(canvas_id: &str, config_json: Option<String>) -> FlowerResult<()> {
    let config = match config_json {
        Some(json) => SceneConfig::from_json(&json)?,
        None => SceneConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| FlowerError::Host("no window".into()))?;
    let (viewport_width, viewport_height) = viewport_size(&window)?;
    let (width, height) = config.surface_size(viewport_width, viewport_height);

    let canvas = find_canvas(&window, canvas_id)?;
    canvas.set_width(width);
    canvas.set_height(height);
    info!(canvas_id, width, height, "canvas sized");

    let surface = CanvasSurface::new(&canvas)?;
    let context = RenderContext::new(&FlowerBackend, &config, (width, height))?;
    AnimationLoop::new(context, surface)
        .with_perf(config.perf_metrics)
        .run(AnimationFrameScheduler::new(window))
}

/// Size `canvas_id` to the viewport and run the flower scene on it.
///
/// `config_json` overrides `SceneConfig` defaults, e.g. `{"particle_count": 5000}`.
#[wasm_bindgen]
pub fn start(canvas_id: &str, config_json: Option<String>) -> Result<(), JsValue> {
    install_tracing();
    start_scene(canvas_id, config_json).map_err(to_js)
}

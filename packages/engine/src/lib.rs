//! Flower - sprite-cached particle renderer over a zero-copy simulation engine
//!
//! Architecture:
//! - domain/     - colors and vectors shared by both sides of the memory boundary
//! - simulation/ - reference engine + palette (the only writer of shared arrays)
//! - render/     - memory views, sprite cache, backdrop, frame renderer (read only)
//! - runtime/    - render context, fixed-timestep loop, frame perf
//! - host/       - browser glue: canvas surface, requestAnimationFrame (wasm32 only)

pub mod config;
pub mod domain;
pub mod error;
pub mod render;
pub mod runtime;
pub mod simulation;

#[cfg(target_arch = "wasm32")]
pub mod host;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine: panic hook, console tracing, banner
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    host::install_tracing();

    web_sys::console::log_1(&"🌸 Flower WASM engine initialized!".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// Re-export main types
pub use config::{SceneConfig, SceneGeometry};
pub use domain::color::Rgb;
pub use domain::vec2::Vec2;
pub use error::{FlowerError, FlowerResult};
pub use render::{Backdrop, DrawTarget, FrameRenderer, MemoryView, Raster, SpriteCache};
pub use runtime::{AnimationLoop, FixedCadence, FrameClock, FrameScheduler, FrameStats, RenderContext};
pub use simulation::{ColorCalc, Engine, EngineBackend, EngineParams, FlowerBackend, Palette, PaletteSource, World, WorldCore};

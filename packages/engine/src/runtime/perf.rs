use wasm_bindgen::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    #[cfg(target_arch = "wasm32")]
    start_ms: f64,
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            PerfTimer { start_ms: js_sys::Date::now() }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            PerfTimer { start: std::time::Instant::now() }
        }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now() - self.start_ms
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.start.elapsed().as_secs_f64() * 1000.0
        }
    }
}

/// Timings of the most recent frame plus running totals.
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub(super) step_ms: f64,
    pub(super) render_ms: f64,
    pub(super) frames: u32,
    pub(super) sprites_drawn: u32,
    pub(super) sim_time: f64,
}

impl FrameStats {
    pub(crate) fn record(&mut self, step_ms: f64, render_ms: f64, sprites_drawn: usize, sim_time: f64) {
        self.step_ms = step_ms;
        self.render_ms = render_ms;
        self.frames = self.frames.wrapping_add(1);
        self.sprites_drawn = sprites_drawn as u32;
        self.sim_time = sim_time;
    }

    pub(crate) fn reset(&mut self) {
        *self = FrameStats::default();
    }
}

#[wasm_bindgen]
impl FrameStats {
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn render_ms(&self) -> f64 { self.render_ms }
    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> u32 { self.frames }
    #[wasm_bindgen(getter)]
    pub fn sprites_drawn(&self) -> u32 { self.sprites_drawn }
    /// Logical seconds simulated so far; `frames * dt`, not wall-clock.
    #[wasm_bindgen(getter)]
    pub fn sim_time(&self) -> f64 { self.sim_time }
}

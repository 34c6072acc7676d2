//! The engine contract the renderer consumes.
//!
//! The renderer never sees `WorldCore` directly; any engine that can step in
//! place, report a fixed particle count and lend out a `MemoryView` plugs in.

use crate::config::{SceneConfig, SceneGeometry};
use crate::error::FlowerResult;
use crate::render::memory_view::MemoryView;

use super::palette::Palette;
use super::WorldCore;

pub trait Engine {
    /// Advance by `dt`, writing positions and color indices in place.
    fn step(&mut self, dt: f32);

    /// Fixed at init.
    fn particle_count(&self) -> usize;

    /// Borrow the shared arrays. The borrow ends before the next `step`.
    fn view(&self) -> MemoryView<'_>;
}

/// Ordered bucket colors, packed `0xRRGGBB`.
pub trait PaletteSource {
    fn colors(&self) -> &[u32];

    fn color_count(&self) -> usize {
        self.colors().len()
    }

    /// Free the palette's engine-side resources. Taking `self` means it can
    /// only happen once.
    fn release(self);
}

/// Arguments of `engine.init`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineParams {
    pub particle_count: u32,
    /// Boundary radius the particles bounce off.
    pub radius: f32,
    /// Particle radius.
    pub threshold: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub dt: f32,
}

impl EngineParams {
    pub fn from_scene(config: &SceneConfig, geometry: &SceneGeometry) -> Self {
        Self {
            particle_count: config.particle_count,
            radius: geometry.engine_radius,
            threshold: config.threshold,
            center_x: geometry.center.x,
            center_y: geometry.center.y,
            dt: config.dt,
        }
    }
}

/// Creates an engine and its palette.
pub trait EngineBackend {
    type Engine: Engine;
    type Palette: PaletteSource;

    fn init(&self, params: &EngineParams) -> FlowerResult<Self::Engine>;

    fn build_palette(&self, radius: f32, particle_count: u32, dt: f32) -> Self::Palette;
}

/// The bundled flower simulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlowerBackend;

impl EngineBackend for FlowerBackend {
    type Engine = WorldCore;
    type Palette = Palette;

    fn init(&self, params: &EngineParams) -> FlowerResult<WorldCore> {
        WorldCore::new(
            params.particle_count,
            params.radius,
            params.threshold,
            params.center_x,
            params.center_y,
            params.dt,
        )
    }

    fn build_palette(&self, radius: f32, particle_count: u32, dt: f32) -> Palette {
        Palette::new(radius, particle_count, dt)
    }
}

impl Engine for WorldCore {
    fn step(&mut self, dt: f32) {
        WorldCore::step(self, dt);
    }

    fn particle_count(&self) -> usize {
        WorldCore::particle_count(self)
    }

    fn view(&self) -> MemoryView<'_> {
        self.shared_view()
    }
}

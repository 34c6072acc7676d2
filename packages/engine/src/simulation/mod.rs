//! World - radial "flower" burst simulation
//!
//! Every particle leaves the center along its own ray, at a speed that falls
//! off with its index, and bounces back in from the boundary circle. Each step
//! also buckets every particle by distance from the center; the bucket is the
//! color index the renderer uses to pick a sprite.
//!
//! Memory layout (the only state the renderer sees):
//! - one linear `u32` buffer: `[positions: N x (x, y) f32][color indices: N x u32]`
//! - allocated once, never resized; `ViewAnchor` pins its address and length
//!
//! Speeds, directions and bounce timers are engine-private arrays.

use crate::domain::vec2::Vec2;
use crate::error::FlowerResult;
use crate::render::memory_view::{MemoryView, ViewAnchor, ViewLayout};

mod backend;
#[path = "init/init.rs"]
mod init;
mod palette;
#[path = "step/step.rs"]
mod step;
#[path = "step/motion.rs"]
mod motion;
#[path = "step/colors.rs"]
mod colors;
mod facade;

pub use backend::{Engine, EngineBackend, EngineParams, FlowerBackend, PaletteSource};
pub use facade::{AbiLayout, ColorCalc, World};
pub use palette::{Palette, MAX_BUCKETS};

pub(crate) struct AbiLayoutData {
    pub(crate) positions_ptr: *const f32,
    pub(crate) positions_len_elements: usize,
    pub(crate) positions_len_bytes: usize,
    pub(crate) indices_ptr: *const u32,
    pub(crate) indices_len_elements: usize,
    pub(crate) indices_len_bytes: usize,
}

/// The simulation world
pub struct WorldCore {
    boundary_radius: f32,
    ball_radius: f32,
    spawn: Vec2,
    particle_count: usize,
    color_count: u32,

    // Shared with the renderer
    memory: Box<[u32]>,
    anchor: ViewAnchor,

    // Engine-private
    dir: Box<[Vec2]>,
    vel: Box<[f32]>,
    overlay_in: Box<[f32]>,
    overlay_out: Box<[f32]>,

    frame: u64,
}

/// Split the linear buffer into its position and color-index arrays.
#[inline]
fn split_shared(memory: &mut [u32], n: usize) -> (&mut [Vec2], &mut [u32]) {
    let (pos_words, idx_words) = memory.split_at_mut(2 * n);
    (bytemuck::cast_slice_mut(pos_words), &mut idx_words[..n])
}

impl WorldCore {
    /// Create a world with all particles at the spawn point.
    pub fn new(
        particle_count: u32,
        boundary_radius: f32,
        ball_radius: f32,
        spawn_x: f32,
        spawn_y: f32,
        dt: f32,
    ) -> FlowerResult<Self> {
        init::create_world_core(particle_count, boundary_radius, ball_radius, spawn_x, spawn_y, dt)
    }

    pub fn particle_count(&self) -> usize { self.particle_count }

    /// Number of color buckets; every color index is below this.
    pub fn color_count(&self) -> u32 { self.color_count }

    pub fn boundary_radius(&self) -> f32 { self.boundary_radius }

    pub fn ball_radius(&self) -> f32 { self.ball_radius }

    pub fn spawn(&self) -> Vec2 { self.spawn }

    pub fn frame(&self) -> u64 { self.frame }

    /// Advance the simulation by `dt`, in place.
    pub fn step(&mut self, dt: f32) {
        step::step(self, dt);
    }

    /// Steps the slowest particle needs to cross the boundary radius.
    pub fn get_color_capacity(&self, dt: f32) -> usize {
        let slowest = self.vel.last().map(|v| v.abs()).unwrap_or(0.0);
        (slowest * self.boundary_radius / dt).ceil() as usize
    }

    /// Read-only view of the shared arrays, valid until the next `step`.
    pub fn shared_view(&self) -> MemoryView<'_> {
        self.anchor.view(self.memory_bytes())
    }

    /// The whole shared buffer as bytes.
    pub fn memory_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.memory)
    }

    pub fn layout(&self) -> ViewLayout {
        self.anchor.layout()
    }

    /// Floored x of particle `i`.
    pub fn x(&self, i: u32) -> f32 {
        self.shared_view().x(i as usize)
    }

    /// Floored y of particle `i`.
    pub fn y(&self, i: u32) -> f32 {
        self.shared_view().y(i as usize)
    }

    /// Color bucket of particle `i`.
    pub fn color(&self, i: u32) -> u32 {
        self.shared_view().color_index(i as usize)
    }

    /// Get pointer to interleaved positions (for JS rendering)
    pub fn positions_ptr(&self) -> *const f32 {
        self.memory.as_ptr() as *const f32
    }

    /// Get pointer to color indices (for JS rendering)
    pub fn indices_ptr(&self) -> *const u32 {
        self.memory[2 * self.particle_count..].as_ptr()
    }

    pub(crate) fn abi_layout_data(&self) -> AbiLayoutData {
        let layout = self.layout();
        AbiLayoutData {
            positions_ptr: self.positions_ptr(),
            positions_len_elements: layout.len * 2,
            positions_len_bytes: layout.positions_bytes(),
            indices_ptr: self.indices_ptr(),
            indices_len_elements: layout.len,
            indices_len_bytes: layout.indices_bytes(),
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

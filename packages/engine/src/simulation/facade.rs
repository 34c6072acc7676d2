use wasm_bindgen::prelude::*;

use super::palette::Palette;
use super::WorldCore;

/// Where the shared arrays live in wasm linear memory, for JS hosts that
/// build their own typed-array views (`new Uint32Array(memory.buffer, ptr, len)`).
#[wasm_bindgen]
pub struct AbiLayout {
    positions_ptr: u32,
    positions_len_elements: u32,
    positions_len_bytes: u32,
    indices_ptr: u32,
    indices_len_elements: u32,
    indices_len_bytes: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn positions_ptr(&self) -> u32 { self.positions_ptr }
    #[wasm_bindgen(getter)]
    pub fn positions_len_elements(&self) -> u32 { self.positions_len_elements }
    #[wasm_bindgen(getter)]
    pub fn positions_len_bytes(&self) -> u32 { self.positions_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn indices_ptr(&self) -> u32 { self.indices_ptr }
    #[wasm_bindgen(getter)]
    pub fn indices_len_elements(&self) -> u32 { self.indices_len_elements }
    #[wasm_bindgen(getter)]
    pub fn indices_len_bytes(&self) -> u32 { self.indices_len_bytes }
}

#[wasm_bindgen]
pub struct World {
    core: WorldCore,
}

#[wasm_bindgen]
impl World {
    /// Create a world; all particles start at the spawn point
    #[wasm_bindgen(constructor)]
    pub fn new(
        nballs: u32,
        boundary_radius: f32,
        ball_radius: f32,
        spawn_x: f32,
        spawn_y: f32,
        dt: f32,
    ) -> Result<World, JsValue> {
        let core = WorldCore::new(nballs, boundary_radius, ball_radius, spawn_x, spawn_y, dt)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { core })
    }

    #[wasm_bindgen(getter)]
    pub fn particle_count(&self) -> u32 { self.core.particle_count() as u32 }

    #[wasm_bindgen(getter)]
    pub fn color_count(&self) -> u32 { self.core.color_count() }

    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.core.frame() }

    /// Step the simulation forward by `dt`
    pub fn simulate(&mut self, dt: f32) {
        self.core.step(dt);
    }

    pub fn get_color_capacity(&self, dt: f32) -> usize {
        self.core.get_color_capacity(dt)
    }

    pub fn x(&self, i: u32) -> f32 {
        self.core.x(i)
    }

    pub fn y(&self, i: u32) -> f32 {
        self.core.y(i)
    }

    pub fn color(&self, i: u32) -> u32 {
        self.core.color(i)
    }

    /// Get pointer to color indices (valid until memory grows)
    pub fn indices(&self) -> *const u32 {
        self.core.indices_ptr()
    }

    /// Get pointer to interleaved x,y positions
    pub fn positions(&self) -> *const f32 {
        self.core.positions_ptr()
    }

    pub fn abi_layout(&self) -> AbiLayout {
        let data = self.core.abi_layout_data();
        AbiLayout {
            positions_ptr: data.positions_ptr as u32,
            positions_len_elements: data.positions_len_elements as u32,
            positions_len_bytes: data.positions_len_bytes as u32,
            indices_ptr: data.indices_ptr as u32,
            indices_len_elements: data.indices_len_elements as u32,
            indices_len_bytes: data.indices_len_bytes as u32,
        }
    }
}

/// Palette builder for JS hosts. Call `free()` once the colors are copied out.
#[wasm_bindgen]
pub struct ColorCalc {
    palette: Palette,
}

#[wasm_bindgen]
impl ColorCalc {
    pub fn new(boundary_radius: f32, nballs: u32, dt: f32) -> ColorCalc {
        Self {
            palette: Palette::new(boundary_radius, nballs, dt),
        }
    }

    pub fn color_count(&self) -> usize {
        self.palette.color_count()
    }

    pub fn colors(&self) -> *const u32 {
        self.palette.colors().as_ptr()
    }
}
